use crate::codec::Token;
use bytes::BytesMut;
use core::fmt::{Debug, Write};

/// Numeric values which can be written as invariant decimal text and parsed back.
///
/// Implemented for all native integer widths as well as `f32`/`f64`, so scores, weights, counts
/// and timeouts may be passed in whatever representation the caller works with.
///
/// The decimal form never depends on locale settings: `.` is the only decimal separator, no
/// grouping is used and infinities are rendered as `+inf`/`-inf`.
pub trait Numeric: Copy + PartialEq + PartialOrd + Debug {
    /// Appends the invariant decimal representation to the given buffer
    fn write_decimal(&self, buf: &mut BytesMut);

    /// Parses the invariant decimal representation. None if text is malformed or the value does
    /// not fit into this representation.
    fn parse_decimal(text: &str) -> Option<Self>;

    /// Converts a wire integer. None if the value does not fit.
    fn from_integer(value: i64) -> Option<Self>;

    /// Converts a wire double (RESP3). None if the value does not fit without loss of its integral part.
    fn from_double(value: f64) -> Option<Self>;

    /// Lossy conversion used for durations
    fn to_f64(self) -> f64;

    /// Exact conversion used for indexes. None if the value is not integral or does not fit.
    fn to_i64(self) -> Option<i64>;

    /// Only true for floating point NaN
    fn is_nan(&self) -> bool;

    fn is_negative(&self) -> bool;

    fn is_zero(&self) -> bool;

    /// Returns true if the value equals the multiplicative identity
    fn is_one(&self) -> bool;
}

/// Returns the invariant decimal token of the given value
pub fn encode_score<N: Numeric>(value: N) -> Token {
    let mut buf = BytesMut::with_capacity(24);
    value.write_decimal(&mut buf);
    buf.freeze()
}

/// Integral doubles in the range of i128 are converted exactly, everything else is rejected
fn integral(value: f64) -> Option<i128> {
    // 2^100, far beyond any native integer this is converted into
    const LIMIT: f64 = 1_267_650_600_228_229_401_496_703_205_376.0;

    if value.is_nan() || value >= LIMIT || value <= -LIMIT {
        return None;
    }

    let cast = value as i128;
    if cast as f64 != value {
        return None;
    }

    Some(cast)
}

macro_rules! integer_numeric {
    ($is_negative:path; $($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn write_decimal(&self, buf: &mut BytesMut) {
                    // Writing into BytesMut is infallible
                    let _ = write!(buf, "{}", self);
                }

                fn parse_decimal(text: &str) -> Option<Self> {
                    match text.parse::<$ty>() {
                        Ok(value) => Some(value),
                        // Server may render integral scores as e.g. "3.0" or "1e+20"
                        Err(_) => Self::from_double(text.parse::<f64>().ok()?),
                    }
                }

                fn from_integer(value: i64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                fn from_double(value: f64) -> Option<Self> {
                    <$ty>::try_from(integral(value)?).ok()
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_i64(self) -> Option<i64> {
                    i64::try_from(self).ok()
                }

                fn is_nan(&self) -> bool {
                    false
                }

                fn is_negative(&self) -> bool {
                    $is_negative(self)
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn is_one(&self) -> bool {
                    *self == 1
                }
            }
        )*
    };
}

fn below_zero<T: PartialOrd + Default>(value: &T) -> bool {
    *value < T::default()
}

fn unsigned<T>(_: &T) -> bool {
    false
}

integer_numeric!(below_zero; i8, i16, i32, i64, i128, isize);
integer_numeric!(unsigned; u8, u16, u32, u64, u128, usize);

macro_rules! float_numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn write_decimal(&self, buf: &mut BytesMut) {
                    let value = *self;

                    // Writing into BytesMut is infallible
                    let _ = if value == <$ty>::INFINITY {
                        buf.write_str("+inf")
                    } else if value == <$ty>::NEG_INFINITY {
                        buf.write_str("-inf")
                    } else if value != 0.0 && (value >= 1e16 || value <= -1e16 || (value < 1e-5 && value > -1e-5)) {
                        // Shortest round-trip form, but without hundreds of padding zeros
                        write!(buf, "{:e}", value)
                    } else {
                        write!(buf, "{}", value)
                    };
                }

                fn parse_decimal(text: &str) -> Option<Self> {
                    text.parse::<$ty>().ok()
                }

                fn from_integer(value: i64) -> Option<Self> {
                    Some(value as $ty)
                }

                fn from_double(value: f64) -> Option<Self> {
                    let converted = value as $ty;
                    if converted.is_infinite() && value.is_finite() {
                        return None;
                    }

                    Some(converted)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_i64(self) -> Option<i64> {
                    i64::try_from(integral(self as f64)?).ok()
                }

                fn is_nan(&self) -> bool {
                    <$ty>::is_nan(*self)
                }

                fn is_negative(&self) -> bool {
                    *self < 0.0
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn is_one(&self) -> bool {
                    *self == 1.0
                }
            }
        )*
    };
}

float_numeric!(f32, f64);
