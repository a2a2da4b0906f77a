pub mod algebra;
pub mod builder;
pub mod custom;
pub mod lookup;
pub mod pop;
pub mod range;
pub mod sample;
pub mod scan;
pub mod zadd;
#[cfg(test)]
pub(crate) mod tests;

use crate::codec::Token;
use crate::reply::ResultShape;
use alloc::vec::Vec;
use core::str::from_utf8;

/// Invalid command arguments. Raised before anything is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Options which the server does not accept in combination. Inner value describes the conflict.
    #[error("conflicting options: {0}")]
    ConflictingFlags(&'static str),
    /// Member list is required to contain at least one member
    #[error("member list is empty")]
    EmptyMemberList,
    /// Key list is required to contain at least one key
    #[error("key list is empty")]
    EmptyKeyList,
    /// Count of zero is reserved by the protocol
    #[error("count must not be zero")]
    ZeroCountNotAllowed,
    #[error("timeout must not be negative")]
    NegativeTimeout,
    /// Timeout is NaN, infinite or exceeds the supported deadline range
    #[error("timeout is out of range")]
    TimeoutOutOfRange,
    /// Score, weight or increment is NaN
    #[error("number is not a valid score")]
    NotANumber,
    /// Boundary is not valid for the comparison mode of the command
    #[error("invalid range boundary")]
    InvalidBoundary,
    /// LIMIT requires BYSCORE or BYLEX
    #[error("limit requires a score or lexicographic range")]
    LimitRequiresBy,
    /// Weights were only given for some of the keys
    #[error("{weights} weights given for {keys} keys")]
    WeightCountMismatch { keys: usize, weights: usize },
}

/// Server side block timeout of blocking commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingTimeout {
    /// Server timeout rounded up to whole milliseconds. Zero blocks indefinitely.
    pub(crate) milliseconds: u32,
}

impl BlockingTimeout {
    /// Validates the given timeout in seconds
    pub(crate) fn from_seconds(seconds: f64) -> Result<Self, BuildError> {
        if seconds.is_nan() || seconds.is_infinite() {
            return Err(BuildError::TimeoutOutOfRange);
        }

        if seconds < 0.0 {
            return Err(BuildError::NegativeTimeout);
        }

        let exact = seconds * 1000.0;
        if exact > u32::MAX as f64 {
            return Err(BuildError::TimeoutOutOfRange);
        }

        // Rounding up, so the client never gives up before the server
        let mut milliseconds = exact as u32;
        if (milliseconds as f64) < exact {
            milliseconds = milliseconds.checked_add(1).ok_or(BuildError::TimeoutOutOfRange)?;
        }

        Ok(Self { milliseconds })
    }

    pub fn milliseconds(&self) -> u32 {
        self.milliseconds
    }

    /// True if the server waits without time limit
    pub fn is_infinite(&self) -> bool {
        self.milliseconds == 0
    }
}

/// Ordered token sequence of one wire request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub(crate) tokens: Vec<Token>,
    pub(crate) blocking: Option<BlockingTimeout>,
}

impl Command {
    /// All tokens, starting with the keyword
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Command keyword, e.g. "ZADD"
    pub fn keyword(&self) -> &str {
        self.tokens
            .first()
            .and_then(|keyword| from_utf8(keyword).ok())
            .unwrap_or_default()
    }

    /// Present for commands blocking on server side
    pub fn blocking_timeout(&self) -> Option<BlockingTimeout> {
        self.blocking
    }
}

/// Typed request: validated parameters plus the expected reply shape.
///
/// Implementations are pure and never block.
pub trait Request {
    /// Expected reply shape. Depends on the chosen options (e.g. WITHSCORES).
    fn shape(&self) -> ResultShape;

    /// Validates parameters and assembles the token sequence
    fn encode(self) -> Result<Command, BuildError>;
}
