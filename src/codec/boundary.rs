use crate::codec::member::TokenSource;
use crate::codec::numeric::Numeric;
use crate::codec::Token;
use crate::commands::BuildError;
use bytes::{BufMut, Bytes, BytesMut};

/// Comparison mode of a range. Fixed per call by the command builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Score ranges (`1.5`, `(1.5`, `-inf`, `+inf`)
    Numeric,
    /// Lexicographic member ranges (`[a`, `(a`, `-`, `+`)
    Lexicographic,
}

/// Payload of a boundary
#[derive(Clone, Debug, PartialEq)]
pub enum BoundValue<N> {
    /// Used for unbounded boundaries
    Empty,
    Number(N),
    Lex(Bytes),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unbounded {
    /// Boundary is limited by its value
    None,
    /// `-inf`, numeric mode only
    NegativeInfinity,
    /// `+inf`, numeric mode only
    PositiveInfinity,
    /// `-`, lexicographic mode only
    LexMinimum,
    /// `+`, lexicographic mode only
    LexMaximum,
}

/// Range endpoint, either inclusive, exclusive or unbounded.
///
/// Fields are public to allow construction from external representations. The constructors
/// below always produce valid combinations, while [encode_boundary] rejects invalid ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary<N> {
    pub value: BoundValue<N>,
    pub inclusive: bool,
    pub unbounded: Unbounded,
}

impl<N: Numeric> Boundary<N> {
    pub fn inclusive(value: N) -> Self {
        Self::limited(BoundValue::Number(value), true)
    }

    pub fn exclusive(value: N) -> Self {
        Self::limited(BoundValue::Number(value), false)
    }

    pub fn negative_infinity() -> Self {
        Self::unlimited(Unbounded::NegativeInfinity)
    }

    pub fn positive_infinity() -> Self {
        Self::unlimited(Unbounded::PositiveInfinity)
    }

    pub fn lex_inclusive<M: TokenSource>(member: M) -> Self {
        Self::limited(BoundValue::Lex(member.into_token()), true)
    }

    pub fn lex_exclusive<M: TokenSource>(member: M) -> Self {
        Self::limited(BoundValue::Lex(member.into_token()), false)
    }

    pub fn lex_minimum() -> Self {
        Self::unlimited(Unbounded::LexMinimum)
    }

    pub fn lex_maximum() -> Self {
        Self::unlimited(Unbounded::LexMaximum)
    }

    pub fn is_unbounded(&self) -> bool {
        self.unbounded != Unbounded::None
    }

    fn limited(value: BoundValue<N>, inclusive: bool) -> Self {
        Boundary {
            value,
            inclusive,
            unbounded: Unbounded::None,
        }
    }

    fn unlimited(unbounded: Unbounded) -> Self {
        Boundary {
            value: BoundValue::Empty,
            inclusive: true,
            unbounded,
        }
    }
}

/// Renders the boundary in the given comparison mode
pub fn encode_boundary<N: Numeric>(boundary: &Boundary<N>, mode: BoundaryMode) -> Result<Token, BuildError> {
    match (&boundary.value, boundary.unbounded, mode) {
        (BoundValue::Empty, Unbounded::NegativeInfinity, BoundaryMode::Numeric) => Ok(Bytes::from_static(b"-inf")),
        (BoundValue::Empty, Unbounded::PositiveInfinity, BoundaryMode::Numeric) => Ok(Bytes::from_static(b"+inf")),
        (BoundValue::Empty, Unbounded::LexMinimum, BoundaryMode::Lexicographic) => Ok(Bytes::from_static(b"-")),
        (BoundValue::Empty, Unbounded::LexMaximum, BoundaryMode::Lexicographic) => Ok(Bytes::from_static(b"+")),
        (BoundValue::Number(value), Unbounded::None, BoundaryMode::Numeric) if !value.is_nan() => {
            let mut buf = BytesMut::with_capacity(25);
            if !boundary.inclusive {
                buf.put_u8(b'(');
            }
            value.write_decimal(&mut buf);
            Ok(buf.freeze())
        }
        (BoundValue::Lex(member), Unbounded::None, BoundaryMode::Lexicographic) => {
            let mut buf = BytesMut::with_capacity(member.len() + 1);
            buf.put_u8(if boundary.inclusive { b'[' } else { b'(' });
            buf.put_slice(member);
            Ok(buf.freeze())
        }
        _ => Err(BuildError::InvalidBoundary),
    }
}
