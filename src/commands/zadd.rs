//! Abstraction of ZADD command.
//!
//! For general information about this command, see the [Redis documentation](<https://redis.io/commands/zadd/>).
//!
//! # Basic usage
//! By default, the number of newly added members is returned.
//! ```
//! use embedded_redis_core::commands::zadd::AddCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::ResultShape;
//!
//! let command = AddCommand::new("leaderboard")
//!     .member(10.5, "alice")
//!     .member(7.0, "bob");
//!
//! assert_eq!(ResultShape::INTEGER, command.shape());
//!
//! let tokens = command.encode().unwrap();
//! assert_eq!(
//!     vec!["ZADD", "leaderboard", "10.5", "alice", "7", "bob"],
//!     tokens.tokens().iter().map(|token| core::str::from_utf8(token).unwrap()).collect::<Vec<_>>()
//! );
//! ```
//! # Conditional updates
//! NX/XX control the existence condition, GT/LT the comparison with the current score.
//! NX can not be combined with GT or LT.
//! ```
//! use embedded_redis_core::commands::zadd::{AddCommand, ComparisonMode, ExistenceMode};
//! use embedded_redis_core::commands::{BuildError, Request};
//!
//! let command = AddCommand::new("leaderboard")
//!     .existence(ExistenceMode::OnlyNew)
//!     .comparison(ComparisonMode::OnlyIfGreater)
//!     .member(1.0, "alice");
//!
//! assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
//! ```
//! # Increment
//! With INCR the new score is returned. Reply is nil if the update was refused by NX/XX/GT/LT.
//! ```
//! use embedded_redis_core::commands::zadd::AddCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::ResultShape;
//!
//! let command = AddCommand::new("leaderboard").member(2.5, "alice").increment();
//! assert_eq!(ResultShape::NUMBER.nullable(), command.shape());
//! ```
use crate::codec::{Numeric, Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::ResultShape;
use alloc::vec::Vec;

/// Existence condition of members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistenceMode {
    /// Adds new and updates existing members
    #[default]
    Always,
    /// NX option
    OnlyNew,
    /// XX option
    OnlyExisting,
}

/// Condition for updating the score of existing members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonMode {
    #[default]
    Always,
    /// GT option
    OnlyIfGreater,
    /// LT option
    OnlyIfLess,
}

#[derive(Debug, Clone)]
pub struct AddCommand<N> {
    key: Token,
    pairs: Vec<(N, Token)>,
    existence: ExistenceMode,
    comparison: ComparisonMode,

    /// CH option
    changed: bool,

    /// INCR option
    increment: bool,
}

impl<N: Numeric> AddCommand<N> {
    pub fn new<K: TokenSource>(key: K) -> Self {
        AddCommand {
            key: key.into_token(),
            pairs: Vec::new(),
            existence: ExistenceMode::Always,
            comparison: ComparisonMode::Always,
            changed: false,
            increment: false,
        }
    }

    /// Adds a member with the given score
    pub fn member<M: TokenSource>(mut self, score: N, member: M) -> Self {
        self.pairs.push((score, member.into_token()));
        self
    }

    /// Adds multiple (score, member) pairs in order
    pub fn members<M, I>(mut self, pairs: I) -> Self
    where
        M: TokenSource,
        I: IntoIterator<Item = (N, M)>,
    {
        self.pairs
            .extend(pairs.into_iter().map(|(score, member)| (score, member.into_token())));
        self
    }

    pub fn existence(mut self, mode: ExistenceMode) -> Self {
        self.existence = mode;
        self
    }

    pub fn comparison(mut self, mode: ComparisonMode) -> Self {
        self.comparison = mode;
        self
    }

    /// Return the number of changed members instead of the number of added members
    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Increments the score of the single member instead of setting it
    pub fn increment(mut self) -> Self {
        self.increment = true;
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        if self.pairs.is_empty() {
            return Err(BuildError::EmptyMemberList);
        }

        if self.existence == ExistenceMode::OnlyNew && self.comparison != ComparisonMode::Always {
            return Err(BuildError::ConflictingFlags("NX with GT or LT"));
        }

        if self.increment && self.pairs.len() > 1 {
            return Err(BuildError::ConflictingFlags("INCR with multiple members"));
        }

        Ok(())
    }
}

impl<N: Numeric> Request for AddCommand<N> {
    fn shape(&self) -> ResultShape {
        match self.increment {
            true => ResultShape::NUMBER.nullable(),
            false => ResultShape::INTEGER,
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        self.validate()?;

        let existence = match self.existence {
            ExistenceMode::Always => None,
            ExistenceMode::OnlyNew => Some("NX"),
            ExistenceMode::OnlyExisting => Some("XX"),
        };

        let comparison = match self.comparison {
            ComparisonMode::Always => None,
            ComparisonMode::OnlyIfGreater => Some("GT"),
            ComparisonMode::OnlyIfLess => Some("LT"),
        };

        let mut builder = CommandBuilder::new("ZADD")
            .arg(self.key)
            .arg_static_option(existence)
            .arg_static_option(comparison)
            .flag(self.changed, "CH")
            .flag(self.increment, "INCR");

        for (score, member) in self.pairs {
            builder = builder.arg_score(score)?.arg(member);
        }

        Ok(builder.into_command())
    }
}
