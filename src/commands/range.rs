//! Abstraction of ZRANGE and ZRANGESTORE commands.
//!
//! For general information about these commands, see the [Redis documentation](<https://redis.io/commands/zrange/>).
//!
//! # Index range
//! ```
//! use embedded_redis_core::commands::range::RangeCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{ElementKind, ResultShape};
//!
//! let command = RangeCommand::by_index("leaderboard", 0, -1).with_scores();
//! assert_eq!(ResultShape::array(ElementKind::MemberScore), command.shape());
//!
//! let command = command.encode().unwrap();
//! assert_eq!(6, command.tokens().len());
//! ```
//! # Score range
//! Boundaries may be exclusive or unbounded. With REV, start is the upper boundary.
//! ```
//! use embedded_redis_core::codec::Boundary;
//! use embedded_redis_core::commands::range::RangeCommand;
//! use embedded_redis_core::commands::Request;
//!
//! let command = RangeCommand::by_score("leaderboard", Boundary::exclusive(1.5), Boundary::positive_infinity())
//!     .limit(0, 10)
//!     .encode()
//!     .unwrap();
//!
//! assert_eq!("(1.5", command.tokens()[2]);
//! assert_eq!("+inf", command.tokens()[3]);
//! assert_eq!("BYSCORE", command.tokens()[4]);
//! ```
//! # Lexicographic range
//! ```
//! use embedded_redis_core::codec::Boundary;
//! use embedded_redis_core::commands::range::RangeCommand;
//! use embedded_redis_core::commands::Request;
//!
//! let command = RangeCommand::by_lex("names", Boundary::lex_inclusive("a"), Boundary::lex_maximum())
//!     .encode()
//!     .unwrap();
//!
//! assert_eq!("[a", command.tokens()[2]);
//! assert_eq!("+", command.tokens()[3]);
//! ```
//! # Storing the result
//! The STORE form returns the number of elements in the destination.
//! ```
//! use embedded_redis_core::commands::range::RangeCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::ResultShape;
//!
//! let command = RangeCommand::by_index("leaderboard", 0, 9).store("top10");
//! assert_eq!(ResultShape::INTEGER, command.shape());
//! assert_eq!("ZRANGESTORE", command.encode().unwrap().keyword());
//! ```
use crate::codec::{BoundValue, Boundary, BoundaryMode, Numeric, Token, TokenSource, Unbounded};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::{ElementKind, ResultShape};

/// Interpretation of start and stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBy {
    /// Zero based rank, negative values count from the end
    Index,
    /// BYSCORE option
    Score,
    /// BYLEX option
    Lex,
}

#[derive(Debug, Clone)]
pub struct RangeCommand<N> {
    /// Present for ZRANGESTORE
    destination: Option<Token>,
    key: Token,
    start: Boundary<N>,
    stop: Boundary<N>,
    by: RangeBy,

    /// REV option
    reverse: bool,

    /// LIMIT offset count
    limit: Option<(i64, i64)>,

    /// WITHSCORES option
    with_scores: bool,
}

impl<N: Numeric> RangeCommand<N> {
    pub fn new<K: TokenSource>(key: K, start: Boundary<N>, stop: Boundary<N>, by: RangeBy) -> Self {
        RangeCommand {
            destination: None,
            key: key.into_token(),
            start,
            stop,
            by,
            reverse: false,
            limit: None,
            with_scores: false,
        }
    }

    /// Range of scores between min and max
    pub fn by_score<K: TokenSource>(key: K, min: Boundary<N>, max: Boundary<N>) -> Self {
        Self::new(key, min, max, RangeBy::Score)
    }

    /// Stores the result in the destination key (ZRANGESTORE)
    pub fn store<D: TokenSource>(mut self, destination: D) -> Self {
        self.destination = Some(destination.into_token());
        self
    }

    /// Reverses the order. Start is then expected to be the higher boundary.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Skips `offset` elements and returns at most `count` elements. A negative count returns all.
    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some((offset, count));
        self
    }

    /// Return scores together with members
    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        match self.by {
            RangeBy::Index => {
                if self.limit.is_some() {
                    return Err(BuildError::LimitRequiresBy);
                }

                if !is_index(&self.start) || !is_index(&self.stop) {
                    return Err(BuildError::InvalidBoundary);
                }
            }
            RangeBy::Lex if self.with_scores && self.destination.is_none() => {
                return Err(BuildError::ConflictingFlags("WITHSCORES with BYLEX"));
            }
            _ => {}
        }

        Ok(())
    }
}

impl RangeCommand<i64> {
    /// Range of ranks, both inclusive
    pub fn by_index<K: TokenSource>(key: K, start: i64, stop: i64) -> Self {
        Self::new(key, Boundary::inclusive(start), Boundary::inclusive(stop), RangeBy::Index)
    }
}

impl RangeCommand<f64> {
    /// Range of members between min and max, for sets with equal scores
    pub fn by_lex<K: TokenSource>(key: K, min: Boundary<f64>, max: Boundary<f64>) -> Self {
        Self::new(key, min, max, RangeBy::Lex)
    }
}

/// Index boundaries are plain inclusive integers
pub(crate) fn is_index<N: Numeric>(boundary: &Boundary<N>) -> bool {
    match (&boundary.value, boundary.unbounded) {
        (BoundValue::Number(number), Unbounded::None) => {
            boundary.inclusive && number.to_i64().is_some()
        }
        _ => false,
    }
}

impl<N: Numeric> Request for RangeCommand<N> {
    fn shape(&self) -> ResultShape {
        match (self.destination.is_some(), self.with_scores) {
            (true, _) => ResultShape::INTEGER,
            (false, true) => ResultShape::array(ElementKind::MemberScore),
            (false, false) => ResultShape::array(ElementKind::Bytes),
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        self.validate()?;

        let (mode, by) = match self.by {
            RangeBy::Index => (BoundaryMode::Numeric, None),
            RangeBy::Score => (BoundaryMode::Numeric, Some("BYSCORE")),
            RangeBy::Lex => (BoundaryMode::Lexicographic, Some("BYLEX")),
        };

        let store = self.destination.is_some();
        let builder = match self.destination {
            None => CommandBuilder::new("ZRANGE"),
            Some(destination) => CommandBuilder::new("ZRANGESTORE").arg(destination),
        };

        let mut builder = builder
            .arg(self.key)
            .arg_boundary(&self.start, mode)?
            .arg_boundary(&self.stop, mode)?
            .arg_static_option(by)
            .flag(self.reverse, "REV");

        if let Some((offset, count)) = self.limit {
            builder = builder.arg_static("LIMIT").arg_numeric(offset).arg_numeric(count);
        }

        // Not accepted by ZRANGESTORE
        Ok(builder.flag(self.with_scores && !store, "WITHSCORES").into_command())
    }
}
