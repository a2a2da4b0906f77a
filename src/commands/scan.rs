//! Abstraction of ZSCAN command and incremental iteration.
//!
//! For general information about this command, see the [Redis documentation](<https://redis.io/commands/zscan/>).
//!
//! # Single page
//! ```
//! use embedded_redis_core::commands::scan::ScanCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{ElementKind, ResultShape};
//!
//! let command = ScanCommand::new("leaderboard", 0).matching("player:*").count(100);
//! assert_eq!(ResultShape::cursor_page(ElementKind::MemberScore), command.shape());
//! assert_eq!(7, command.encode().unwrap().tokens().len());
//! ```
//! # Iteration
//! [ScanState] keeps the resumption cursor across pages. Iteration is complete once the server
//! returns cursor 0.
//! ```
//! use embedded_redis_core::commands::scan::ScanState;
//! use embedded_redis_core::reply::CursorPage;
//!
//! let mut state = ScanState::new("leaderboard");
//! assert!(state.next_command().is_some());
//!
//! state.advance(&CursorPage::<f64> { cursor: 12, elements: vec![] });
//! assert_eq!(12, state.cursor());
//!
//! state.advance(&CursorPage::<f64> { cursor: 0, elements: vec![] });
//! assert!(state.is_finished());
//! assert!(state.next_command().is_none());
//! ```
use crate::codec::{Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::{CursorPage, ElementKind, ResultShape};

#[derive(Debug, Clone)]
pub struct ScanCommand {
    key: Token,
    cursor: u64,

    /// MATCH option
    pattern: Option<Token>,

    /// COUNT option
    count: Option<u64>,
}

impl ScanCommand {
    /// Page starting at the given cursor. Zero starts a new iteration.
    pub fn new<K: TokenSource>(key: K, cursor: u64) -> Self {
        ScanCommand {
            key: key.into_token(),
            cursor,
            pattern: None,
            count: None,
        }
    }

    /// Only returns members matching the glob-style pattern
    pub fn matching<P: TokenSource>(mut self, pattern: P) -> Self {
        self.pattern = Some(pattern.into_token());
        self
    }

    /// Hint for the amount of work per page
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl Request for ScanCommand {
    fn shape(&self) -> ResultShape {
        ResultShape::cursor_page(ElementKind::MemberScore)
    }

    fn encode(self) -> Result<Command, BuildError> {
        if self.count == Some(0) {
            return Err(BuildError::ZeroCountNotAllowed);
        }

        let mut builder = CommandBuilder::new("ZSCAN").arg(self.key).arg_numeric(self.cursor);

        if let Some(pattern) = self.pattern {
            builder = builder.arg_static("MATCH").arg(pattern);
        }

        if let Some(count) = self.count {
            builder = builder.arg_static("COUNT").arg_numeric(count);
        }

        Ok(builder.into_command())
    }
}

/// Cursor state of an incremental iteration
#[derive(Debug, Clone)]
pub struct ScanState {
    key: Token,
    pattern: Option<Token>,
    count: Option<u64>,
    cursor: u64,
    finished: bool,
}

impl ScanState {
    pub fn new<K: TokenSource>(key: K) -> Self {
        ScanState {
            key: key.into_token(),
            pattern: None,
            count: None,
            cursor: 0,
            finished: false,
        }
    }

    /// Applies the MATCH option to all pages
    pub fn matching<P: TokenSource>(mut self, pattern: P) -> Self {
        self.pattern = Some(pattern.into_token());
        self
    }

    /// Applies the COUNT option to all pages
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Command for fetching the next page. None once the iteration is complete.
    pub fn next_command(&self) -> Option<ScanCommand> {
        if self.finished {
            return None;
        }

        Some(ScanCommand {
            key: self.key.clone(),
            cursor: self.cursor,
            pattern: self.pattern.clone(),
            count: self.count,
        })
    }

    /// Takes over the resumption cursor of the received page
    pub fn advance<N>(&mut self, page: &CursorPage<N>) {
        self.cursor = page.cursor;
        self.finished = page.is_last();
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
