//! Abstraction of ZRANDMEMBER command.
//!
//! For general information about this command, see the [Redis documentation](<https://redis.io/commands/zrandmember/>).
//!
//! Without count a single member is returned, which is absent if the key does not exist.
//! A positive count returns distinct members, a negative count allows duplicates.
//! ```
//! use embedded_redis_core::commands::sample::RandomMemberCommand;
//! use embedded_redis_core::commands::{BuildError, Request};
//! use embedded_redis_core::reply::{ElementKind, ResultShape};
//!
//! let command = RandomMemberCommand::new("leaderboard");
//! assert_eq!(ResultShape::BYTES.nullable(), command.shape());
//!
//! let command = RandomMemberCommand::new("leaderboard").count(-5).with_scores();
//! assert_eq!(ResultShape::array(ElementKind::MemberScore), command.shape());
//! assert_eq!("-5", command.encode().unwrap().tokens()[2]);
//!
//! let command = RandomMemberCommand::new("leaderboard").count(0);
//! assert_eq!(Err(BuildError::ZeroCountNotAllowed), command.encode());
//! ```
use crate::codec::{Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::{ElementKind, ResultShape};

#[derive(Debug, Clone)]
pub struct RandomMemberCommand {
    key: Token,
    count: Option<i64>,

    /// WITHSCORES option
    with_scores: bool,
}

impl RandomMemberCommand {
    pub fn new<K: TokenSource>(key: K) -> Self {
        RandomMemberCommand {
            key: key.into_token(),
            count: None,
            with_scores: false,
        }
    }

    /// Number of members. Negative values allow the same member multiple times.
    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Return scores together with members. Requires a count.
    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }
}

impl Request for RandomMemberCommand {
    fn shape(&self) -> ResultShape {
        match (self.count, self.with_scores) {
            (None, _) => ResultShape::BYTES.nullable(),
            (Some(_), true) => ResultShape::array(ElementKind::MemberScore),
            (Some(_), false) => ResultShape::array(ElementKind::Bytes),
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        match self.count {
            Some(0) => return Err(BuildError::ZeroCountNotAllowed),
            None if self.with_scores => return Err(BuildError::ConflictingFlags("WITHSCORES without count")),
            _ => {}
        }

        Ok(CommandBuilder::new("ZRANDMEMBER")
            .arg(self.key)
            .arg_numeric_option(self.count)
            .flag(self.with_scores, "WITHSCORES")
            .into_command())
    }
}
