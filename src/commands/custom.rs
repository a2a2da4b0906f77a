//! Abstraction for arbitrary commands.
//!
//! [CustomCommand] in combination with [CommandBuilder] can be used for executing arbitrary commands,
//! which high level logic is not abstracted yet by this crate. The expected reply is described by
//! an explicit [ResultShape].
//!
//! Error replies are intercepted by the dispatcher and converted to [CallError::ErrorResponse](crate::network::CallError::ErrorResponse).
//!
//! *Please consider contributing command abstractions not supported yet.*
//!
//! # Basic usage
//! The following example builds [ZRANDMEMBER](<https://redis.io/commands/zrandmember/>) manually
//! ```
//! use embedded_redis_core::commands::builder::CommandBuilder;
//! use embedded_redis_core::commands::custom::CustomCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{ElementKind, ResultShape};
//!
//! let builder = CommandBuilder::new("ZRANDMEMBER").arg_static("leaderboard").arg_numeric(3);
//! let command = CustomCommand::new(builder, ResultShape::array(ElementKind::Bytes));
//!
//! assert_eq!(ResultShape::array(ElementKind::Bytes), command.shape());
//! assert_eq!(3, command.encode().unwrap().tokens().len());
//! ```
use crate::commands::builder::CommandBuilder;
use crate::commands::{BuildError, Command, Request};
use crate::reply::ResultShape;

/// Abstraction for arbitrary commands.
#[derive(Debug, Clone)]
pub struct CustomCommand {
    builder: CommandBuilder,
    shape: ResultShape,
}

impl CustomCommand {
    pub fn new(builder: CommandBuilder, shape: ResultShape) -> Self {
        CustomCommand { builder, shape }
    }
}

impl Request for CustomCommand {
    fn shape(&self) -> ResultShape {
        self.shape
    }

    fn encode(self) -> Result<Command, BuildError> {
        Ok(self.builder.into_command())
    }
}
