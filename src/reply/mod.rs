//! Reply units and their typed counterparts
//!
//! A [ReplyUnit] is what the transport delivers per call. The [decoder](decode) maps it to a typed
//! [Value], as described by a [ResultShape].
pub use decoder::decode;
pub use shape::{Container, ElementKind, Optionality, Payload, ResultShape};

pub(crate) mod decoder;
pub(crate) mod shape;


use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::Bytes;

/// Decoded wire primitive. Produced once per call and consumed by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyUnit {
    Nil,
    Integer(i64),
    /// Bulk or simple string
    Bulk(Bytes),
    Array(Vec<ReplyUnit>),
    /// RESP3 double
    Double(f64),
    /// RESP3 boolean
    Boolean(bool),
    /// Error reply of the server. Inner value is the error message.
    Error(String),
}

impl ReplyUnit {
    pub fn kind(&self) -> UnitKind {
        match self {
            ReplyUnit::Nil => UnitKind::Nil,
            ReplyUnit::Integer(_) => UnitKind::Integer,
            ReplyUnit::Bulk(_) => UnitKind::Bulk,
            ReplyUnit::Array(_) => UnitKind::Array,
            ReplyUnit::Double(_) => UnitKind::Double,
            ReplyUnit::Boolean(_) => UnitKind::Boolean,
            ReplyUnit::Error(_) => UnitKind::Error,
        }
    }

    /// Shorthand for bulk units
    pub fn bulk<B>(data: B) -> Self
    where
        Bytes: From<B>,
    {
        ReplyUnit::Bulk(data.into())
    }
}

/// Discriminant of [ReplyUnit], reported in decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Nil,
    Integer,
    Bulk,
    Array,
    Double,
    Boolean,
    Error,
}

/// Reply did not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Wrong unit kind (or wrong arity) for the descriptor
    #[error("expected {expected:?}, received {observed:?}")]
    UnexpectedReplyShape { expected: ResultShape, observed: UnitKind },
    /// Numeric text or value does not fit into the requested representation
    #[error("numeric value does not fit into requested type")]
    NumericOverflow,
    /// Text element is not valid UTF-8
    #[error("text reply is not valid UTF-8")]
    InvalidUtf8,
}

/// Member with its score, e.g. of ZRANGE WITHSCORES
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember<N> {
    pub member: Bytes,
    pub score: N,
}

/// Rank with the member's score, e.g. of ZRANK WITHSCORE
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedScore<N> {
    pub rank: i64,
    pub score: N,
}

/// Payload reported together with the key which produced it
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTagged<N> {
    pub key: Bytes,
    pub value: Box<Value<N>>,
}

/// One page of an incremental iteration
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<N> {
    /// Resumption cursor. Zero signals end of iteration.
    pub cursor: u64,
    pub elements: Vec<Value<N>>,
}

impl<N> CursorPage<N> {
    /// True if this is the final page
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// Typed result. N is the caller's numeric representation for scores.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<N> {
    /// Nil received for a nullable shape
    Absent,
    Integer(i64),
    Number(N),
    Text(String),
    Bytes(Bytes),
    Boolean(bool),
    MemberScore(ScoredMember<N>),
    RankScore(RankedScore<N>),
    Array(Vec<Value<N>>),
    KeyTagged(KeyTagged<N>),
    CursorPage(CursorPage<N>),
}

impl<N> Value<N> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_number(self) -> Option<N> {
        match self {
            Value::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Value::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_member_score(self) -> Option<ScoredMember<N>> {
        match self {
            Value::MemberScore(pair) => Some(pair),
            _ => None,
        }
    }

    pub fn into_rank_score(self) -> Option<RankedScore<N>> {
        match self {
            Value::RankScore(pair) => Some(pair),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<Value<N>>> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn into_key_tagged(self) -> Option<KeyTagged<N>> {
        match self {
            Value::KeyTagged(tagged) => Some(tagged),
            _ => None,
        }
    }

    pub fn into_cursor_page(self) -> Option<CursorPage<N>> {
        match self {
            Value::CursorPage(page) => Some(page),
            _ => None,
        }
    }
}
