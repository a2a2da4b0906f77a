//! Abstraction of set algebra commands ZUNION, ZINTER, ZDIFF and their STORE variants.
//!
//! For general information about these commands, see the [Redis documentation](<https://redis.io/commands/zunion/>).
//!
//! # Weighted union
//! Weights are either given for all keys or for none. WEIGHTS is only transmitted if at least one
//! weight differs from 1.
//! ```
//! use embedded_redis_core::commands::algebra::{Aggregate, AlgebraCommand};
//! use embedded_redis_core::commands::Request;
//!
//! let command = AlgebraCommand::union()
//!     .weighted_key("week:1", 1.0)
//!     .weighted_key("week:2", 2.0)
//!     .aggregate(Aggregate::Max)
//!     .with_scores()
//!     .encode()
//!     .unwrap();
//!
//! let tokens: Vec<_> = command.tokens().iter().map(|token| core::str::from_utf8(token).unwrap()).collect();
//! assert_eq!(
//!     vec!["ZUNION", "2", "week:1", "week:2", "WEIGHTS", "1", "2", "AGGREGATE", "MAX", "WITHSCORES"],
//!     tokens
//! );
//! ```
//! # Storing the result
//! ```
//! use embedded_redis_core::commands::algebra::AlgebraCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::ResultShape;
//!
//! let command = AlgebraCommand::<f64>::intersection()
//!     .keys(["a", "b"])
//!     .store("both");
//!
//! assert_eq!(ResultShape::INTEGER, command.shape());
//! assert_eq!("ZINTERSTORE", command.encode().unwrap().keyword());
//! ```
use crate::codec::{Numeric, Token, TokenSource};
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::{ElementKind, ResultShape};
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    /// ZUNION
    Union,
    /// ZINTER
    Intersection,
    /// ZDIFF
    Difference,
}

/// Combination of scores of members existing in multiple sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregate {
    #[default]
    Sum,
    Min,
    Max,
}

/// Key with an optional multiplication factor for its scores
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKey<N> {
    pub key: Token,
    pub weight: Option<N>,
}

#[derive(Debug, Clone)]
pub struct AlgebraCommand<N> {
    operation: SetOperation,

    /// Present for STORE variants
    destination: Option<Token>,
    keys: Vec<WeightedKey<N>>,
    aggregate: Aggregate,

    /// WITHSCORES option
    with_scores: bool,
}

impl<N: Numeric> AlgebraCommand<N> {
    pub fn new(operation: SetOperation) -> Self {
        AlgebraCommand {
            operation,
            destination: None,
            keys: Vec::new(),
            aggregate: Aggregate::Sum,
            with_scores: false,
        }
    }

    pub fn union() -> Self {
        Self::new(SetOperation::Union)
    }

    pub fn intersection() -> Self {
        Self::new(SetOperation::Intersection)
    }

    /// Members of the first set which are missing in all the following sets
    pub fn difference() -> Self {
        Self::new(SetOperation::Difference)
    }

    /// Adds a key without weight
    pub fn key<K: TokenSource>(mut self, key: K) -> Self {
        self.keys.push(WeightedKey {
            key: key.into_token(),
            weight: None,
        });
        self
    }

    pub fn weighted_key<K: TokenSource>(mut self, key: K, weight: N) -> Self {
        self.keys.push(WeightedKey {
            key: key.into_token(),
            weight: Some(weight),
        });
        self
    }

    /// Adds multiple keys without weight
    pub fn keys<K, I>(self, keys: I) -> Self
    where
        K: TokenSource,
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().fold(self, |command, key| command.key(key))
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Stores the result in the destination key (ZUNIONSTORE, ZINTERSTORE, ZDIFFSTORE)
    pub fn store<D: TokenSource>(mut self, destination: D) -> Self {
        self.destination = Some(destination.into_token());
        self
    }

    /// Return scores together with members. Ignored by the STORE variants.
    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        if self.keys.is_empty() {
            return Err(BuildError::EmptyKeyList);
        }

        let weights = self.keys.iter().filter(|key| key.weight.is_some()).count();
        if weights > 0 && weights != self.keys.len() {
            return Err(BuildError::WeightCountMismatch {
                keys: self.keys.len(),
                weights,
            });
        }

        if self.operation == SetOperation::Difference && (weights > 0 || self.aggregate != Aggregate::Sum) {
            return Err(BuildError::ConflictingFlags("ZDIFF with WEIGHTS or AGGREGATE"));
        }

        Ok(())
    }

    fn keyword(&self) -> &'static str {
        match (self.operation, self.destination.is_some()) {
            (SetOperation::Union, false) => "ZUNION",
            (SetOperation::Union, true) => "ZUNIONSTORE",
            (SetOperation::Intersection, false) => "ZINTER",
            (SetOperation::Intersection, true) => "ZINTERSTORE",
            (SetOperation::Difference, false) => "ZDIFF",
            (SetOperation::Difference, true) => "ZDIFFSTORE",
        }
    }
}

impl<N: Numeric> Request for AlgebraCommand<N> {
    fn shape(&self) -> ResultShape {
        match (self.destination.is_some(), self.with_scores) {
            (true, _) => ResultShape::INTEGER,
            (false, true) => ResultShape::array(ElementKind::MemberScore),
            (false, false) => ResultShape::array(ElementKind::Bytes),
        }
    }

    fn encode(self) -> Result<Command, BuildError> {
        self.validate()?;

        let store = self.destination.is_some();
        let weighted = self
            .keys
            .iter()
            .any(|key| key.weight.map(|weight| !weight.is_one()).unwrap_or(false));

        let mut builder = CommandBuilder::new(self.keyword())
            .arg_option(self.destination)
            .arg_numeric(self.keys.len());

        let mut weights = Vec::with_capacity(self.keys.len());
        for key in self.keys {
            weights.push(key.weight);
            builder = builder.arg(key.key);
        }

        if weighted {
            builder = builder.arg_static("WEIGHTS");
            for weight in weights.into_iter().flatten() {
                builder = builder.arg_score(weight)?;
            }
        }

        let aggregate = match self.aggregate {
            Aggregate::Sum => None,
            Aggregate::Min => Some("MIN"),
            Aggregate::Max => Some("MAX"),
        };

        if let Some(aggregate) = aggregate {
            builder = builder.arg_static("AGGREGATE").arg_static(aggregate);
        }

        Ok(builder.flag(self.with_scores && !store, "WITHSCORES").into_command())
    }
}
