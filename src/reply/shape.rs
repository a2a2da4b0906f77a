//! Result shape descriptor
//!
//! Describes the expected reply of a call along three independent axes. The descriptor is the
//! only input the [decoder](crate::reply::decode) needs besides the reply itself.
//!
//! ```
//! use embedded_redis_core::reply::{Container, ElementKind, Optionality, Payload, ResultShape};
//!
//! // ZSCORE
//! const SCORE: ResultShape = ResultShape::scalar(ElementKind::Number).nullable();
//!
//! // BZMPOP
//! const POPPED: ResultShape = ResultShape::key_tagged(ElementKind::MemberScore, Payload::Array).nullable();
//!
//! assert_eq!(Optionality::Nullable, SCORE.optionality());
//! assert_eq!(Container::KeyTagged(Payload::Array), POPPED.container());
//!
//! // Ranks are never paged
//! assert!(ResultShape::try_new(ElementKind::RankScore, Container::CursorPage, Optionality::Required).is_none());
//! ```

/// Kind of the (innermost) elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Integer reply, e.g. cardinality or rank
    Int64,
    /// Floating score, parsed into the caller's numeric representation
    Number,
    /// UTF-8 text
    Text,
    /// Raw bytes
    Bytes,
    /// Condition reply (RESP3 boolean or integer 0/1)
    Boolean,
    /// (member, score) pair
    MemberScore,
    /// (rank, score) pair
    RankScore,
}

/// Payload of key-tagged replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A single element
    Scalar,
    /// Array of elements
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Scalar,
    Array,
    /// `[key, payload]`, reported by multi-key pop commands
    KeyTagged(Payload),
    /// `[cursor, elements]`
    CursorPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optionality {
    Required,
    /// Nil is decoded to [Value::Absent](crate::reply::Value::Absent)
    Nullable,
}

/// Immutable descriptor of the expected reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultShape {
    element: ElementKind,
    container: Container,
    optionality: Optionality,
}

impl ResultShape {
    pub const INTEGER: ResultShape = ResultShape::scalar(ElementKind::Int64);
    pub const BOOLEAN: ResultShape = ResultShape::scalar(ElementKind::Boolean);
    pub const NUMBER: ResultShape = ResultShape::scalar(ElementKind::Number);
    pub const BYTES: ResultShape = ResultShape::scalar(ElementKind::Bytes);
    pub const TEXT: ResultShape = ResultShape::scalar(ElementKind::Text);

    /// Creates a new descriptor
    ///
    /// # Panics
    /// On combinations not listed in the compatibility table. Use it in `const` items to turn this
    /// into a compile time error.
    pub const fn new(element: ElementKind, container: Container, optionality: Optionality) -> Self {
        match Self::try_new(element, container, optionality) {
            Some(shape) => shape,
            None => panic!("invalid result shape combination"),
        }
    }

    /// Creates a new descriptor, None if the combination is invalid
    pub const fn try_new(element: ElementKind, container: Container, optionality: Optionality) -> Option<Self> {
        if !is_compatible(element, container, optionality) {
            return None;
        }

        Some(ResultShape {
            element,
            container,
            optionality,
        })
    }

    pub const fn scalar(element: ElementKind) -> Self {
        Self::new(element, Container::Scalar, Optionality::Required)
    }

    pub const fn array(element: ElementKind) -> Self {
        Self::new(element, Container::Array, Optionality::Required)
    }

    pub const fn key_tagged(element: ElementKind, payload: Payload) -> Self {
        Self::new(element, Container::KeyTagged(payload), Optionality::Required)
    }

    pub const fn cursor_page(element: ElementKind) -> Self {
        Self::new(element, Container::CursorPage, Optionality::Required)
    }

    /// Same shape, but Nil is accepted
    ///
    /// # Panics
    /// For cursor pages, which are never Nil
    pub const fn nullable(self) -> Self {
        Self::new(self.element, self.container, Optionality::Nullable)
    }

    pub const fn element(&self) -> ElementKind {
        self.element
    }

    pub const fn container(&self) -> Container {
        self.container
    }

    pub const fn optionality(&self) -> Optionality {
        self.optionality
    }

    pub const fn is_nullable(&self) -> bool {
        matches!(self.optionality, Optionality::Nullable)
    }
}

/// Static compatibility table
const fn is_compatible(element: ElementKind, container: Container, optionality: Optionality) -> bool {
    match container {
        Container::Scalar | Container::Array => true,
        Container::KeyTagged(_) => matches!(
            element,
            ElementKind::Bytes | ElementKind::Text | ElementKind::Number | ElementKind::MemberScore
        ),
        Container::CursorPage => {
            matches!(
                element,
                ElementKind::Bytes | ElementKind::Text | ElementKind::MemberScore
            ) && matches!(optionality, Optionality::Required)
        }
    }
}
