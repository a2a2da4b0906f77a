//! Abstraction of pop commands, blocking and non-blocking.
//!
//! The keyword is chosen based on the options:
//!
//! | Blocking | Keys     | Count | Command                          | Reply                      |
//! |----------|----------|-------|----------------------------------|----------------------------|
//! | no       | one      | any   | `ZPOPMIN`/`ZPOPMAX`              | array of pairs             |
//! | no       | multiple | any   | `ZMPOP`                          | key tagged array or nil    |
//! | yes      | any      | none  | `BZPOPMIN`/`BZPOPMAX`            | key tagged pair or nil     |
//! | yes      | any      | given | `BZMPOP`                         | key tagged array or nil    |
//!
//! # Blocking pop
//! Blocking commands carry a server side timeout in seconds. Zero blocks indefinitely. Nil is
//! returned if the server timeout elapses without any member being available.
//! ```
//! use embedded_redis_core::commands::pop::PopCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{ElementKind, Payload, ResultShape};
//!
//! let command = PopCommand::min().key("queue:high").key("queue:low").blocking(5);
//! assert_eq!(
//!     ResultShape::key_tagged(ElementKind::MemberScore, Payload::Scalar).nullable(),
//!     command.shape()
//! );
//!
//! let command = command.encode().unwrap();
//! assert_eq!("BZPOPMIN", command.keyword());
//! assert_eq!("5", command.tokens()[3]);
//! assert_eq!(5000, command.blocking_timeout().unwrap().milliseconds());
//! ```
//! # Negative timeout
//! ```
//! use embedded_redis_core::commands::pop::PopCommand;
//! use embedded_redis_core::commands::{BuildError, Request};
//!
//! let command = PopCommand::max().key("queue").count(3).blocking(-1.0);
//! assert_eq!(Err(BuildError::NegativeTimeout), command.encode());
//! ```
use crate::codec::{Numeric, Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::{ElementKind, Payload, ResultShape};
use alloc::vec::Vec;

/// Which end of the sorted set is popped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopDirection {
    /// Lowest scores
    Min,
    /// Highest scores
    Max,
}

/// Pop command. N is the numeric type of the server timeout.
#[derive(Debug, Clone)]
pub struct PopCommand<N> {
    keys: Vec<Token>,
    direction: PopDirection,
    count: Option<u64>,

    /// Server timeout in seconds, present for blocking variants
    timeout: Option<N>,
}

impl PopCommand<f64> {
    pub fn new(direction: PopDirection) -> Self {
        PopCommand {
            keys: Vec::new(),
            direction,
            count: None,
            timeout: None,
        }
    }

    pub fn min() -> Self {
        Self::new(PopDirection::Min)
    }

    pub fn max() -> Self {
        Self::new(PopDirection::Max)
    }
}

impl<N: Numeric> PopCommand<N> {
    pub fn key<K: TokenSource>(mut self, key: K) -> Self {
        self.keys.push(key.into_token());
        self
    }

    pub fn keys<K: TokenSource, I: IntoIterator<Item = K>>(mut self, keys: I) -> Self {
        self.keys.extend(keys.into_iter().map(TokenSource::into_token));
        self
    }

    /// Maximum number of popped members
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Blocks on server side up to the given number of seconds. Zero blocks indefinitely.
    pub fn blocking<T: Numeric>(self, seconds: T) -> PopCommand<T> {
        PopCommand {
            keys: self.keys,
            direction: self.direction,
            count: self.count,
            timeout: Some(seconds),
        }
    }

    fn direction_suffix(&self) -> &'static str {
        match self.direction {
            PopDirection::Min => "MIN",
            PopDirection::Max => "MAX",
        }
    }

    /// ZMPOP and BZMPOP: numkeys keys... MIN|MAX [COUNT count]
    fn multi_pop(self, builder: CommandBuilder) -> CommandBuilder {
        let direction = self.direction_suffix();
        let count = self.count;

        let mut builder = builder
            .arg_numeric(self.keys.len())
            .args(self.keys)
            .arg_static(direction);

        if let Some(count) = count {
            builder = builder.arg_static("COUNT").arg_numeric(count);
        }

        builder
    }
}

impl<N: Numeric> Request for PopCommand<N> {
    fn shape(&self) -> ResultShape {
        match (self.timeout.is_some(), self.count.is_some(), self.keys.len() > 1) {
            (true, false, _) => ResultShape::key_tagged(ElementKind::MemberScore, Payload::Scalar).nullable(),
            (true, true, _) | (false, _, true) => {
                ResultShape::key_tagged(ElementKind::MemberScore, Payload::Array).nullable()
            }
            (false, _, false) => ResultShape::array(ElementKind::MemberScore),
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        if self.keys.is_empty() {
            return Err(BuildError::EmptyKeyList);
        }

        if self.count == Some(0) {
            return Err(BuildError::ZeroCountNotAllowed);
        }

        let builder = match (self.timeout, self.count) {
            (Some(timeout), None) => {
                let keyword = match self.direction {
                    PopDirection::Min => "BZPOPMIN",
                    PopDirection::Max => "BZPOPMAX",
                };

                CommandBuilder::new(keyword).args(self.keys).blocking(timeout)?
            }
            (Some(timeout), Some(_)) => {
                let builder = CommandBuilder::new("BZMPOP").blocking(timeout)?;
                self.multi_pop(builder)
            }
            (None, _) if self.keys.len() > 1 => self.multi_pop(CommandBuilder::new("ZMPOP")),
            (None, count) => {
                let keyword = match self.direction {
                    PopDirection::Min => "ZPOPMIN",
                    PopDirection::Max => "ZPOPMAX",
                };

                CommandBuilder::new(keyword).args(self.keys).arg_numeric_option(count)
            }
        };

        Ok(builder.into_command())
    }
}
