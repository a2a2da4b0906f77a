//! Scalar and boundary codec
//!
//! Renders scores, range boundaries and member payloads to wire tokens.
//!
//! ```
//! use embedded_redis_core::codec::{encode_boundary, encode_member, encode_score, Boundary, BoundaryMode};
//!
//! assert_eq!("2.5", encode_score(2.5_f64));
//! assert_eq!("+inf", encode_score(f64::INFINITY));
//!
//! let boundary: Boundary<i64> = Boundary::exclusive(10);
//! assert_eq!("(10", encode_boundary(&boundary, BoundaryMode::Numeric).unwrap());
//!
//! let boundary: Boundary<f64> = Boundary::lex_inclusive("apple");
//! assert_eq!("[apple", encode_boundary(&boundary, BoundaryMode::Lexicographic).unwrap());
//!
//! assert_eq!(encode_member("member"), encode_member(String::from("member")));
//! ```
pub use boundary::{encode_boundary, BoundValue, Boundary, BoundaryMode, Unbounded};
pub use member::{encode_member, TokenSource};
pub use numeric::{encode_score, Numeric};

pub(crate) mod boundary;
pub(crate) mod member;
pub(crate) mod numeric;

#[cfg(test)]
mod tests;

/// One wire argument
pub type Token = bytes::Bytes;
