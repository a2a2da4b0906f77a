use crate::commands::tests::{assert_command, assert_rejected};
use crate::commands::zadd::{AddCommand, ComparisonMode, ExistenceMode};
use crate::commands::{BuildError, Request};
use crate::reply::ResultShape;
use alloc::string::String;
use alloc::vec;

#[test]
fn test_encode_single_member() {
    let command = AddCommand::new("scores").member(1.5, "alice");
    assert_command(vec!["ZADD", "scores", "1.5", "alice"], command);
}

#[test]
fn test_encode_multiple_members_in_order() {
    let command = AddCommand::new("scores").members([(3, "c"), (1, "a"), (2, "b")]);
    assert_command(vec!["ZADD", "scores", "3", "c", "1", "a", "2", "b"], command);
}

#[test]
fn test_encode_all_options() {
    let command = AddCommand::new("scores")
        .existence(ExistenceMode::OnlyExisting)
        .comparison(ComparisonMode::OnlyIfLess)
        .changed()
        .increment()
        .member(-2.25, String::from("alice"));

    assert_command(vec!["ZADD", "scores", "XX", "LT", "CH", "INCR", "-2.25", "alice"], command);
}

#[test]
fn test_encode_only_new() {
    let command = AddCommand::new("scores").existence(ExistenceMode::OnlyNew).member(1, "a");
    assert_command(vec!["ZADD", "scores", "NX", "1", "a"], command);
}

#[test]
fn test_encode_only_greater() {
    let command = AddCommand::new("scores")
        .comparison(ComparisonMode::OnlyIfGreater)
        .member(f64::INFINITY, "top");

    assert_command(vec!["ZADD", "scores", "GT", "+inf", "top"], command);
}

#[test]
fn test_only_new_with_greater_conflicts() {
    let command = AddCommand::new("scores")
        .existence(ExistenceMode::OnlyNew)
        .comparison(ComparisonMode::OnlyIfGreater)
        .member(1.0, "alice");

    assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
}

#[test]
fn test_only_new_with_less_conflicts() {
    let command = AddCommand::new("scores")
        .existence(ExistenceMode::OnlyNew)
        .comparison(ComparisonMode::OnlyIfLess)
        .member(1.0, "alice");

    assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
}

#[test]
fn test_increment_with_multiple_members_conflicts() {
    let command = AddCommand::new("scores").increment().member(1, "a").member(2, "b");
    assert!(matches!(command.encode(), Err(BuildError::ConflictingFlags(_))));
}

#[test]
fn test_empty_member_list() {
    assert_rejected(BuildError::EmptyMemberList, AddCommand::<f64>::new("scores"));
}

#[test]
fn test_shape() {
    assert_eq!(ResultShape::INTEGER, AddCommand::new("scores").member(1, "a").shape());
    assert_eq!(
        ResultShape::NUMBER.nullable(),
        AddCommand::new("scores").member(1, "a").increment().shape()
    );
}

#[test]
fn test_nan_score_rejected() {
    assert_rejected(
        BuildError::NotANumber,
        AddCommand::new("board").member(1.0, "alice").member(f64::NAN, "bob"),
    );
}
