use crate::commands::algebra::{Aggregate, AlgebraCommand, SetOperation};
use crate::commands::tests::{assert_command, assert_rejected};
use crate::commands::{BuildError, Request};
use crate::reply::{ElementKind, ResultShape};
use alloc::vec;

#[test]
fn test_encode_union() {
    let command = AlgebraCommand::<f64>::union().keys(["a", "b", "c"]);
    assert_command(vec!["ZUNION", "3", "a", "b", "c"], command);
}

#[test]
fn test_encode_intersection_weights_and_aggregate() {
    let command = AlgebraCommand::intersection()
        .weighted_key("a", 2)
        .weighted_key("b", 3)
        .aggregate(Aggregate::Min)
        .with_scores();

    assert_command(
        vec!["ZINTER", "2", "a", "b", "WEIGHTS", "2", "3", "AGGREGATE", "MIN", "WITHSCORES"],
        command,
    );
}

#[test]
fn test_unit_weights_are_omitted() {
    let command = AlgebraCommand::union().weighted_key("a", 1.0).weighted_key("b", 1.0);
    assert_command(vec!["ZUNION", "2", "a", "b"], command);
}

#[test]
fn test_sum_aggregate_is_omitted() {
    let command = AlgebraCommand::<f64>::union().key("a").aggregate(Aggregate::Sum);
    assert_command(vec!["ZUNION", "1", "a"], command);
}

#[test]
fn test_encode_store_ignores_with_scores() {
    let command = AlgebraCommand::union()
        .weighted_key("a", 0.5)
        .weighted_key("b", 1.0)
        .aggregate(Aggregate::Max)
        .store("dest")
        .with_scores();

    assert_command(
        vec!["ZUNIONSTORE", "dest", "2", "a", "b", "WEIGHTS", "0.5", "1", "AGGREGATE", "MAX"],
        command,
    );
}

#[test]
fn test_encode_difference() {
    let command = AlgebraCommand::<f64>::difference().keys(["a", "b"]).with_scores();
    assert_command(vec!["ZDIFF", "2", "a", "b", "WITHSCORES"], command);

    let command = AlgebraCommand::<f64>::new(SetOperation::Difference).keys(["a", "b"]).store("d");
    assert_command(vec!["ZDIFFSTORE", "d", "2", "a", "b"], command);
}

#[test]
fn test_empty_key_list() {
    assert_rejected(BuildError::EmptyKeyList, AlgebraCommand::<f64>::union());
}

#[test]
fn test_partial_weights() {
    let command = AlgebraCommand::union().weighted_key("a", 2.0).key("b").key("c");
    assert_rejected(BuildError::WeightCountMismatch { keys: 3, weights: 1 }, command);
}

#[test]
fn test_difference_with_weights_conflicts() {
    let command = AlgebraCommand::difference().weighted_key("a", 2.0).weighted_key("b", 1.0);
    assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
}

#[test]
fn test_difference_with_aggregate_conflicts() {
    let command = AlgebraCommand::<f64>::difference().keys(["a", "b"]).aggregate(Aggregate::Max);
    assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
}

#[test]
fn test_shape() {
    let command = AlgebraCommand::<f64>::union().key("a");
    assert_eq!(ResultShape::array(ElementKind::Bytes), command.shape());
    assert_eq!(ResultShape::array(ElementKind::MemberScore), command.clone().with_scores().shape());
    assert_eq!(ResultShape::INTEGER, command.store("d").with_scores().shape());
}

#[test]
fn test_nan_weight_rejected() {
    let command = AlgebraCommand::union().weighted_key("a", 2.0).weighted_key("b", f64::NAN);
    assert_rejected(BuildError::NotANumber, command);
}
