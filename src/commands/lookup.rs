//! Abstractions of single key lookups and removals.
//!
//! Covers [ZRANK](<https://redis.io/commands/zrank/>), [ZREVRANK](<https://redis.io/commands/zrevrank/>),
//! [ZSCORE](<https://redis.io/commands/zscore/>), [ZMSCORE](<https://redis.io/commands/zmscore/>),
//! [ZCARD](<https://redis.io/commands/zcard/>), [ZCOUNT](<https://redis.io/commands/zcount/>),
//! [ZLEXCOUNT](<https://redis.io/commands/zlexcount/>), [ZINCRBY](<https://redis.io/commands/zincrby/>),
//! [ZREM](<https://redis.io/commands/zrem/>) and the ZREMRANGEBY* family.
//!
//! # Rank with score
//! ```
//! use embedded_redis_core::commands::lookup::RankCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{ElementKind, ResultShape};
//!
//! let command = RankCommand::new("leaderboard", "alice").reverse().with_score();
//! assert_eq!(ResultShape::scalar(ElementKind::RankScore).nullable(), command.shape());
//!
//! let command = command.encode().unwrap();
//! assert_eq!("ZREVRANK", command.keyword());
//! assert_eq!("WITHSCORE", command.tokens()[3]);
//! ```
//! # Multiple scores
//! Scores of missing members are decoded as absent.
//! ```
//! use embedded_redis_core::commands::lookup::MultiScoreCommand;
//! use embedded_redis_core::commands::{BuildError, Request};
//!
//! let command = MultiScoreCommand::new("leaderboard").member("alice").member("bob");
//! assert_eq!(4, command.encode().unwrap().tokens().len());
//!
//! let empty = MultiScoreCommand::new("leaderboard");
//! assert_eq!(Err(BuildError::EmptyMemberList), empty.encode());
//! ```
use crate::codec::{Boundary, BoundaryMode, Numeric, Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::range::{is_index, RangeBy};
use crate::commands::{BuildError, Command, Request};
use crate::reply::{ElementKind, ResultShape};
use alloc::vec::Vec;

/// ZRANK and ZREVRANK
#[derive(Debug, Clone)]
pub struct RankCommand {
    key: Token,
    member: Token,

    /// Rank is counted from highest to lowest score
    reverse: bool,

    /// WITHSCORE option
    with_score: bool,
}

impl RankCommand {
    pub fn new<K: TokenSource, M: TokenSource>(key: K, member: M) -> Self {
        RankCommand {
            key: key.into_token(),
            member: member.into_token(),
            reverse: false,
            with_score: false,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn with_score(mut self) -> Self {
        self.with_score = true;
        self
    }
}

impl Request for RankCommand {
    fn shape(&self) -> ResultShape {
        match self.with_score {
            true => ResultShape::scalar(ElementKind::RankScore).nullable(),
            false => ResultShape::INTEGER.nullable(),
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        let keyword = match self.reverse {
            true => "ZREVRANK",
            false => "ZRANK",
        };

        Ok(CommandBuilder::new(keyword)
            .arg(self.key)
            .arg(self.member)
            .flag(self.with_score, "WITHSCORE")
            .into_command())
    }
}

/// ZSCORE
#[derive(Debug, Clone)]
pub struct ScoreCommand {
    key: Token,
    member: Token,
}

impl ScoreCommand {
    pub fn new<K: TokenSource, M: TokenSource>(key: K, member: M) -> Self {
        ScoreCommand {
            key: key.into_token(),
            member: member.into_token(),
        }
    }
}

impl Request for ScoreCommand {
    fn shape(&self) -> ResultShape {
        ResultShape::NUMBER.nullable()
    }

    fn encode(self) -> Result<Command, BuildError> {
        Ok(CommandBuilder::new("ZSCORE").arg(self.key).arg(self.member).into_command())
    }
}

/// ZMSCORE
#[derive(Debug, Clone)]
pub struct MultiScoreCommand {
    key: Token,
    members: Vec<Token>,
}

impl MultiScoreCommand {
    pub fn new<K: TokenSource>(key: K) -> Self {
        MultiScoreCommand {
            key: key.into_token(),
            members: Vec::new(),
        }
    }

    pub fn member<M: TokenSource>(mut self, member: M) -> Self {
        self.members.push(member.into_token());
        self
    }

    pub fn members<M: TokenSource, I: IntoIterator<Item = M>>(mut self, members: I) -> Self {
        self.members.extend(members.into_iter().map(TokenSource::into_token));
        self
    }
}

impl Request for MultiScoreCommand {
    fn shape(&self) -> ResultShape {
        ResultShape::array(ElementKind::Number).nullable()
    }

    fn encode(self) -> Result<Command, BuildError> {
        if self.members.is_empty() {
            return Err(BuildError::EmptyMemberList);
        }

        Ok(CommandBuilder::new("ZMSCORE")
            .arg(self.key)
            .args(self.members)
            .into_command())
    }
}

/// ZREM
#[derive(Debug, Clone)]
pub struct RemoveCommand {
    key: Token,
    members: Vec<Token>,
}

impl RemoveCommand {
    pub fn new<K: TokenSource>(key: K) -> Self {
        RemoveCommand {
            key: key.into_token(),
            members: Vec::new(),
        }
    }

    pub fn member<M: TokenSource>(mut self, member: M) -> Self {
        self.members.push(member.into_token());
        self
    }

    pub fn members<M: TokenSource, I: IntoIterator<Item = M>>(mut self, members: I) -> Self {
        self.members.extend(members.into_iter().map(TokenSource::into_token));
        self
    }
}

impl Request for RemoveCommand {
    /// Number of removed members
    fn shape(&self) -> ResultShape {
        ResultShape::INTEGER
    }

    fn encode(self) -> Result<Command, BuildError> {
        if self.members.is_empty() {
            return Err(BuildError::EmptyMemberList);
        }

        Ok(CommandBuilder::new("ZREM").arg(self.key).args(self.members).into_command())
    }
}

/// ZCARD
#[derive(Debug, Clone)]
pub struct CardinalityCommand {
    key: Token,
}

impl CardinalityCommand {
    pub fn new<K: TokenSource>(key: K) -> Self {
        CardinalityCommand { key: key.into_token() }
    }
}

impl Request for CardinalityCommand {
    fn shape(&self) -> ResultShape {
        ResultShape::INTEGER
    }

    fn encode(self) -> Result<Command, BuildError> {
        Ok(CommandBuilder::new("ZCARD").arg(self.key).into_command())
    }
}

/// ZCOUNT and ZLEXCOUNT
#[derive(Debug, Clone)]
pub struct CountCommand<N> {
    key: Token,
    min: Boundary<N>,
    max: Boundary<N>,
    mode: BoundaryMode,
}

impl<N: Numeric> CountCommand<N> {
    /// Number of members with a score between min and max
    pub fn by_score<K: TokenSource>(key: K, min: Boundary<N>, max: Boundary<N>) -> Self {
        CountCommand {
            key: key.into_token(),
            min,
            max,
            mode: BoundaryMode::Numeric,
        }
    }
}

impl CountCommand<f64> {
    /// Number of members between min and max, for sets with equal scores
    pub fn by_lex<K: TokenSource>(key: K, min: Boundary<f64>, max: Boundary<f64>) -> Self {
        CountCommand {
            key: key.into_token(),
            min,
            max,
            mode: BoundaryMode::Lexicographic,
        }
    }
}

impl<N: Numeric> Request for CountCommand<N> {
    fn shape(&self) -> ResultShape {
        ResultShape::INTEGER
    }

    fn encode(self) -> Result<Command, BuildError> {
        let keyword = match self.mode {
            BoundaryMode::Numeric => "ZCOUNT",
            BoundaryMode::Lexicographic => "ZLEXCOUNT",
        };

        Ok(CommandBuilder::new(keyword)
            .arg(self.key)
            .arg_boundary(&self.min, self.mode)?
            .arg_boundary(&self.max, self.mode)?
            .into_command())
    }
}

/// ZINCRBY
#[derive(Debug, Clone)]
pub struct IncrementCommand<N> {
    key: Token,
    increment: N,
    member: Token,
}

impl<N: Numeric> IncrementCommand<N> {
    pub fn new<K: TokenSource, M: TokenSource>(key: K, increment: N, member: M) -> Self {
        IncrementCommand {
            key: key.into_token(),
            increment,
            member: member.into_token(),
        }
    }
}

impl<N: Numeric> Request for IncrementCommand<N> {
    /// New score of the member
    fn shape(&self) -> ResultShape {
        ResultShape::NUMBER
    }

    fn encode(self) -> Result<Command, BuildError> {
        Ok(CommandBuilder::new("ZINCRBY")
            .arg(self.key)
            .arg_score(self.increment)?
            .arg(self.member)
            .into_command())
    }
}

/// ZREMRANGEBYRANK, ZREMRANGEBYSCORE and ZREMRANGEBYLEX
#[derive(Debug, Clone)]
pub struct RemoveRangeCommand<N> {
    key: Token,
    start: Boundary<N>,
    stop: Boundary<N>,
    by: RangeBy,
}

impl<N: Numeric> RemoveRangeCommand<N> {
    pub fn by_score<K: TokenSource>(key: K, min: Boundary<N>, max: Boundary<N>) -> Self {
        RemoveRangeCommand {
            key: key.into_token(),
            start: min,
            stop: max,
            by: RangeBy::Score,
        }
    }
}

impl RemoveRangeCommand<i64> {
    /// Both ranks are inclusive
    pub fn by_index<K: TokenSource>(key: K, start: i64, stop: i64) -> Self {
        RemoveRangeCommand {
            key: key.into_token(),
            start: Boundary::inclusive(start),
            stop: Boundary::inclusive(stop),
            by: RangeBy::Index,
        }
    }
}

impl RemoveRangeCommand<f64> {
    pub fn by_lex<K: TokenSource>(key: K, min: Boundary<f64>, max: Boundary<f64>) -> Self {
        RemoveRangeCommand {
            key: key.into_token(),
            start: min,
            stop: max,
            by: RangeBy::Lex,
        }
    }
}

impl<N: Numeric> Request for RemoveRangeCommand<N> {
    /// Number of removed members
    fn shape(&self) -> ResultShape {
        ResultShape::INTEGER
    }

    fn encode(self) -> Result<Command, BuildError> {
        let (keyword, mode) = match self.by {
            RangeBy::Index => ("ZREMRANGEBYRANK", BoundaryMode::Numeric),
            RangeBy::Score => ("ZREMRANGEBYSCORE", BoundaryMode::Numeric),
            RangeBy::Lex => ("ZREMRANGEBYLEX", BoundaryMode::Lexicographic),
        };

        if self.by == RangeBy::Index && (!is_index(&self.start) || !is_index(&self.stop)) {
            return Err(BuildError::InvalidBoundary);
        }

        Ok(CommandBuilder::new(keyword)
            .arg(self.key)
            .arg_boundary(&self.start, mode)?
            .arg_boundary(&self.stop, mode)?
            .into_command())
    }
}
