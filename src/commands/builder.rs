//! Builder for assembling token sequences
//!
//! Generic wrapper used by all command abstractions of this crate.
//! It can also be used to build arbitrary commands. See [CustomCommand](crate::commands::custom) for more details.
//!
//! # Creating commands
//! The following example creates the token sequence of [ZINCRBY](https://redis.io/commands/zincrby/).
//! ```
//! use embedded_redis_core::commands::builder::CommandBuilder;
//!
//! let command = CommandBuilder::new("ZINCRBY")
//!     .arg_static("leaderboard")
//!     .arg_numeric(2.5)
//!     .arg("player:1")
//!     .into_command();
//!
//! assert_eq!("ZINCRBY", command.keyword());
//! assert_eq!(4, command.tokens().len());
//! ```
//! # Improved performance
//! Owned payloads are moved into the token without copying. [Bytes](<https://docs.rs/bytes/latest/bytes/>)
//! is shared, as clone() is shallow.
//! ```
//!# use bytes::Bytes;
//! use embedded_redis_core::commands::builder::CommandBuilder;
//!
//! let member = Bytes::from_static("Large member".as_bytes());
//!
//! let _command = CommandBuilder::new("ZSCORE")
//!     .arg_static("scores")
//!     .arg(&member)
//!     .into_command();
//! ```
use crate::codec::{encode_boundary, Boundary, BoundaryMode, Numeric, Token, TokenSource};
use crate::commands::{BlockingTimeout, BuildError, Command};
use alloc::vec;
use alloc::vec::Vec;
use bytes::{Bytes, BytesMut};

/// Builder for ordered token sequences
#[derive(Clone, Default, Debug)]
pub struct CommandBuilder {
    pub(crate) elements: Vec<Token>,
    pub(crate) blocking: Option<BlockingTimeout>,
}

impl CommandBuilder {
    pub fn new(keyword: &'static str) -> Self {
        CommandBuilder {
            elements: vec![Bytes::from_static(keyword.as_bytes())],
            blocking: None,
        }
    }

    /// Converts builder to command ready for being dispatched
    pub fn into_command(self) -> Command {
        Command {
            tokens: self.elements,
            blocking: self.blocking,
        }
    }

    /// Adds a static argument
    pub fn arg_static(mut self, arg: &'static str) -> Self {
        self.elements.push(Bytes::from_static(arg.as_bytes()));
        self
    }

    /// Adds a static argument if option is Some
    pub fn arg_static_option(mut self, arg: Option<&'static str>) -> Self {
        if let Some(arg_str) = arg {
            self.elements.push(Bytes::from_static(arg_str.as_bytes()));
        }
        self
    }

    /// Adds a static argument if condition is true
    pub fn flag(self, enabled: bool, arg: &'static str) -> Self {
        self.arg_static_option(enabled.then_some(arg))
    }

    /// Adds invariant decimal representation of number
    pub fn arg_numeric<N: Numeric>(mut self, arg: N) -> Self {
        let mut buf = BytesMut::with_capacity(24);
        arg.write_decimal(&mut buf);
        self.elements.push(buf.freeze());
        self
    }

    /// Adds a score, weight or increment. NaN is rejected, as the server does not accept it.
    pub fn arg_score<N: Numeric>(self, arg: N) -> Result<Self, BuildError> {
        if arg.is_nan() {
            return Err(BuildError::NotANumber);
        }

        Ok(self.arg_numeric(arg))
    }

    /// Adds the number if option is Some
    pub fn arg_numeric_option<N: Numeric>(self, arg: Option<N>) -> Self {
        match arg {
            None => self,
            Some(number) => self.arg_numeric(number),
        }
    }

    /// Adds a text or binary argument
    /// Note: Owned values and Bytes are moved without copying
    pub fn arg<A: TokenSource>(mut self, arg: A) -> Self {
        self.elements.push(arg.into_token());
        self
    }

    /// Just adding the argument if option is Some
    pub fn arg_option<A: TokenSource>(self, arg: Option<A>) -> Self {
        match arg {
            None => self,
            Some(inner) => self.arg(inner),
        }
    }

    /// Adds all given tokens in order
    pub fn args<I: IntoIterator<Item = Token>>(mut self, args: I) -> Self {
        self.elements.extend(args);
        self
    }

    /// Adds a boundary rendered in the given mode
    pub fn arg_boundary<N: Numeric>(mut self, boundary: &Boundary<N>, mode: BoundaryMode) -> Result<Self, BuildError> {
        self.elements.push(encode_boundary(boundary, mode)?);
        Ok(self)
    }

    /// Marks the command as blocking on server side for the given number of seconds and adds the
    /// timeout argument
    pub fn blocking<N: Numeric>(mut self, seconds: N) -> Result<Self, BuildError> {
        if seconds.is_negative() {
            return Err(BuildError::NegativeTimeout);
        }

        self.blocking = Some(BlockingTimeout::from_seconds(seconds.to_f64())?);
        Ok(self.arg_numeric(seconds))
    }
}

impl From<CommandBuilder> for Command {
    fn from(builder: CommandBuilder) -> Self {
        builder.into_command()
    }
}
