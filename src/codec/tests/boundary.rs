use crate::codec::{encode_boundary, BoundValue, Boundary, BoundaryMode, Unbounded};
use crate::commands::BuildError;
use bytes::Bytes;

#[test]
fn test_numeric_inclusive() {
    let boundary = Boundary::inclusive(1.5_f64);
    assert_eq!("1.5", encode_boundary(&boundary, BoundaryMode::Numeric).unwrap());
}

#[test]
fn test_numeric_exclusive() {
    let boundary = Boundary::exclusive(-3_i64);
    assert_eq!("(-3", encode_boundary(&boundary, BoundaryMode::Numeric).unwrap());
}

#[test]
fn test_numeric_unbounded() {
    let min: Boundary<f64> = Boundary::negative_infinity();
    let max: Boundary<f64> = Boundary::positive_infinity();

    assert_eq!("-inf", encode_boundary(&min, BoundaryMode::Numeric).unwrap());
    assert_eq!("+inf", encode_boundary(&max, BoundaryMode::Numeric).unwrap());
}

#[test]
fn test_lex_inclusive_exclusive() {
    let inclusive: Boundary<f64> = Boundary::lex_inclusive("alpha");
    let exclusive: Boundary<f64> = Boundary::lex_exclusive(b"beta".as_slice());

    assert_eq!("[alpha", encode_boundary(&inclusive, BoundaryMode::Lexicographic).unwrap());
    assert_eq!("(beta", encode_boundary(&exclusive, BoundaryMode::Lexicographic).unwrap());
}

#[test]
fn test_lex_unbounded() {
    let min: Boundary<f64> = Boundary::lex_minimum();
    let max: Boundary<f64> = Boundary::lex_maximum();

    assert_eq!("-", encode_boundary(&min, BoundaryMode::Lexicographic).unwrap());
    assert_eq!("+", encode_boundary(&max, BoundaryMode::Lexicographic).unwrap());
}

#[test]
fn test_markers_are_distinguishable() {
    // Markers are unique within one mode, the mode itself is fixed by the command
    let numeric = [
        encode_boundary(&Boundary::inclusive(5_i32), BoundaryMode::Numeric).unwrap(),
        encode_boundary(&Boundary::exclusive(5_i32), BoundaryMode::Numeric).unwrap(),
        encode_boundary(&Boundary::<i32>::negative_infinity(), BoundaryMode::Numeric).unwrap(),
        encode_boundary(&Boundary::<i32>::positive_infinity(), BoundaryMode::Numeric).unwrap(),
    ];
    let lex = [
        encode_boundary(&Boundary::<i32>::lex_inclusive("5"), BoundaryMode::Lexicographic).unwrap(),
        encode_boundary(&Boundary::<i32>::lex_exclusive("5"), BoundaryMode::Lexicographic).unwrap(),
        encode_boundary(&Boundary::<i32>::lex_minimum(), BoundaryMode::Lexicographic).unwrap(),
        encode_boundary(&Boundary::<i32>::lex_maximum(), BoundaryMode::Lexicographic).unwrap(),
    ];

    for tokens in [numeric, lex] {
        for (index, token) in tokens.iter().enumerate() {
            for other in tokens.iter().skip(index + 1) {
                assert_ne!(token, other);
            }
        }
    }
}

#[test]
fn test_numeric_nan_rejected() {
    let boundary: Boundary<f64> = Boundary::exclusive(f64::NAN);
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Numeric).unwrap_err()
    );
}

#[test]
fn test_numeric_infinity_in_lex_mode() {
    let boundary: Boundary<f64> = Boundary::positive_infinity();
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Lexicographic).unwrap_err()
    );
}

#[test]
fn test_lex_minimum_in_numeric_mode() {
    let boundary: Boundary<f64> = Boundary::lex_minimum();
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Numeric).unwrap_err()
    );
}

#[test]
fn test_unbounded_with_value() {
    let boundary = Boundary {
        value: BoundValue::Number(3.0_f64),
        inclusive: true,
        unbounded: Unbounded::PositiveInfinity,
    };
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Numeric).unwrap_err()
    );

    let boundary: Boundary<f64> = Boundary {
        value: BoundValue::Lex(Bytes::from_static(b"a")),
        inclusive: true,
        unbounded: Unbounded::LexMaximum,
    };
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Lexicographic).unwrap_err()
    );
}

#[test]
fn test_missing_value() {
    let boundary: Boundary<f64> = Boundary {
        value: BoundValue::Empty,
        inclusive: true,
        unbounded: Unbounded::None,
    };
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Numeric).unwrap_err()
    );
}

#[test]
fn test_value_category_mismatch() {
    let boundary = Boundary::inclusive(1_i64);
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Lexicographic).unwrap_err()
    );

    let boundary: Boundary<i64> = Boundary::lex_inclusive("a");
    assert_eq!(
        BuildError::InvalidBoundary,
        encode_boundary(&boundary, BoundaryMode::Numeric).unwrap_err()
    );
}
