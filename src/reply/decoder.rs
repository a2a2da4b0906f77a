use crate::codec::Numeric;
use crate::reply::{
    Container, CursorPage, DecodeError, ElementKind, KeyTagged, Payload, RankedScore, ReplyUnit, ResultShape,
    ScoredMember, Value,
};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::Bytes;
use core::str::from_utf8;

/// Decodes the reply unit as described by the given shape.
///
/// Scores are converted into the numeric representation N, which may differ from the wire
/// representation. Structural mismatches are always reported, never replaced by default values.
///
/// ```
/// use bytes::Bytes;
/// use embedded_redis_core::reply::{decode, ElementKind, ReplyUnit, ResultShape, Value};
///
/// let reply = ReplyUnit::Array(vec![
///     ReplyUnit::bulk("first"),
///     ReplyUnit::bulk("1.5"),
///     ReplyUnit::bulk("second"),
///     ReplyUnit::bulk("2"),
/// ]);
///
/// let value = decode::<f64>(reply, ResultShape::array(ElementKind::MemberScore)).unwrap();
/// let pairs = value.into_array().unwrap();
///
/// assert_eq!(2, pairs.len());
/// let first = pairs[0].clone().into_member_score().unwrap();
/// assert_eq!(Bytes::from_static(b"first"), first.member);
/// assert_eq!(1.5, first.score);
/// ```
pub fn decode<N: Numeric>(unit: ReplyUnit, shape: ResultShape) -> Result<Value<N>, DecodeError> {
    Decoder { shape }.decode(unit)
}

struct Decoder {
    shape: ResultShape,
}

impl Decoder {
    fn decode<N: Numeric>(&self, unit: ReplyUnit) -> Result<Value<N>, DecodeError> {
        if unit == ReplyUnit::Nil && self.shape.is_nullable() {
            return Ok(Value::Absent);
        }

        match self.shape.container() {
            Container::Scalar => self.element(unit),
            Container::Array => self.array(unit),
            Container::KeyTagged(payload) => self.key_tagged(unit, payload),
            Container::CursorPage => self.cursor_page(unit),
        }
    }

    /// Decodes a single element
    fn element<N: Numeric>(&self, unit: ReplyUnit) -> Result<Value<N>, DecodeError> {
        match (self.shape.element(), unit) {
            (_, ReplyUnit::Nil) if self.shape.is_nullable() => Ok(Value::Absent),
            (ElementKind::Int64, unit) => Ok(Value::Integer(self.number(unit)?)),
            (ElementKind::Number, unit) => Ok(Value::Number(self.number(unit)?)),
            (ElementKind::Text, ReplyUnit::Bulk(data)) => Ok(Value::Text(text(data)?)),
            (ElementKind::Bytes, ReplyUnit::Bulk(data)) => Ok(Value::Bytes(data)),
            (ElementKind::Boolean, ReplyUnit::Boolean(condition)) => Ok(Value::Boolean(condition)),
            (ElementKind::Boolean, ReplyUnit::Integer(number)) => Ok(Value::Boolean(number != 0)),
            (ElementKind::MemberScore | ElementKind::RankScore, ReplyUnit::Array(items)) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(first), Some(second)) => self.pair(first, second),
                    _ => Err(self.mismatch(&ReplyUnit::Array(Vec::new()))),
                }
            }
            (_, unit) => Err(self.mismatch(&unit)),
        }
    }

    /// Decodes member/score or rank/score from two adjacent units
    fn pair<N: Numeric>(&self, first: ReplyUnit, second: ReplyUnit) -> Result<Value<N>, DecodeError> {
        match self.shape.element() {
            ElementKind::MemberScore => Ok(Value::MemberScore(ScoredMember {
                member: self.bytes(first)?,
                score: self.number(second)?,
            })),
            ElementKind::RankScore => Ok(Value::RankScore(RankedScore {
                rank: self.number(first)?,
                score: self.number(second)?,
            })),
            _ => Err(self.mismatch(&first)),
        }
    }

    fn array<N: Numeric>(&self, unit: ReplyUnit) -> Result<Value<N>, DecodeError> {
        match unit {
            ReplyUnit::Nil if self.shape.is_nullable() => Ok(Value::Absent),
            // RESP2 nil array
            ReplyUnit::Nil => Ok(Value::Array(Vec::new())),
            ReplyUnit::Array(items) => Ok(Value::Array(self.elements(items)?)),
            unit => Err(self.mismatch(&unit)),
        }
    }

    fn elements<N: Numeric>(&self, items: Vec<ReplyUnit>) -> Result<Vec<Value<N>>, DecodeError> {
        match self.shape.element() {
            ElementKind::MemberScore | ElementKind::RankScore => self.pairs(items),
            _ => items.into_iter().map(|item| self.element(item)).collect(),
        }
    }

    /// Accepts both nested `[[m1, s1], [m2, s2]]` and flat `[m1, s1, m2, s2]` pair arrays
    fn pairs<N: Numeric>(&self, items: Vec<ReplyUnit>) -> Result<Vec<Value<N>>, DecodeError> {
        let nested = !items.is_empty()
            && items
                .iter()
                .all(|item| matches!(item, ReplyUnit::Array(inner) if inner.len() == 2));

        if nested {
            return items.into_iter().map(|item| self.element(item)).collect();
        }

        if items.len() % 2 != 0 {
            return Err(self.mismatch(&ReplyUnit::Array(items)));
        }

        let mut pairs = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(first), Some(second)) = (items.next(), items.next()) {
            pairs.push(self.pair(first, second)?);
        }

        Ok(pairs)
    }

    fn key_tagged<N: Numeric>(&self, unit: ReplyUnit, payload: Payload) -> Result<Value<N>, DecodeError> {
        let items = match unit {
            ReplyUnit::Array(items) => items,
            unit => return Err(self.mismatch(&unit)),
        };

        let flat_pair = payload == Payload::Scalar && self.shape.element() == ElementKind::MemberScore;
        if items.len() != 2 && !(flat_pair && items.len() == 3) {
            return Err(self.mismatch(&ReplyUnit::Array(items)));
        }

        let mut items = items.into_iter();
        let (key, value) = match (items.next(), items.next(), items.next()) {
            (Some(key), Some(member), Some(score)) => (key, self.pair(member, score)?),
            (Some(key), Some(inner), None) => match payload {
                Payload::Scalar => (key, self.element(inner)?),
                Payload::Array => (key, self.array(inner)?),
            },
            _ => return Err(self.mismatch(&ReplyUnit::Array(Vec::new()))),
        };

        Ok(Value::KeyTagged(KeyTagged {
            key: self.bytes(key)?,
            value: Box::new(value),
        }))
    }

    fn cursor_page<N: Numeric>(&self, unit: ReplyUnit) -> Result<Value<N>, DecodeError> {
        let items = match unit {
            ReplyUnit::Array(items) if items.len() == 2 => items,
            unit => return Err(self.mismatch(&unit)),
        };

        let mut items = items.into_iter();
        match (items.next(), items.next()) {
            (Some(cursor), Some(ReplyUnit::Array(elements))) => Ok(Value::CursorPage(CursorPage {
                cursor: self.number(cursor)?,
                elements: self.elements(elements)?,
            })),
            (_, Some(unit)) => Err(self.mismatch(&unit)),
            _ => Err(self.mismatch(&ReplyUnit::Array(Vec::new()))),
        }
    }

    /// Converts integer, double or decimal text units
    fn number<T: Numeric>(&self, unit: ReplyUnit) -> Result<T, DecodeError> {
        match unit {
            ReplyUnit::Integer(number) => T::from_integer(number).ok_or(DecodeError::NumericOverflow),
            ReplyUnit::Double(number) => T::from_double(number).ok_or(DecodeError::NumericOverflow),
            ReplyUnit::Bulk(data) => from_utf8(&data)
                .ok()
                .and_then(T::parse_decimal)
                .ok_or(DecodeError::NumericOverflow),
            unit => Err(self.mismatch(&unit)),
        }
    }

    fn bytes(&self, unit: ReplyUnit) -> Result<Bytes, DecodeError> {
        match unit {
            ReplyUnit::Bulk(data) => Ok(data),
            unit => Err(self.mismatch(&unit)),
        }
    }

    fn mismatch(&self, unit: &ReplyUnit) -> DecodeError {
        DecodeError::UnexpectedReplyShape {
            expected: self.shape,
            observed: unit.kind(),
        }
    }
}

fn text(data: Bytes) -> Result<String, DecodeError> {
    String::from_utf8(data.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
}
