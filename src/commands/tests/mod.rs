use crate::commands::{BuildError, Command, Request};
use alloc::vec::Vec;
use core::str::from_utf8;

mod algebra;
mod zadd;

/// Token sequence as text
pub(crate) fn tokens(command: &Command) -> Vec<&str> {
    command.tokens().iter().map(|token| from_utf8(token).unwrap()).collect()
}

pub(crate) fn assert_command<R: Request>(expected: Vec<&'static str>, request: R) {
    let command = request.encode().unwrap();
    assert_eq!(expected, tokens(&command));
}

pub(crate) fn assert_rejected<R: Request>(expected: BuildError, request: R) {
    assert_eq!(Err(expected), request.encode());
}
