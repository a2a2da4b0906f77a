use crate::codec::Numeric;
use crate::commands::{BuildError, Command, Request};
use crate::network::future::PendingCall;
use crate::network::timeout::{deadline, Timeout, TimeoutError};
use crate::network::transport::{CancellationToken, Transport};
use crate::reply::{DecodeError, ResultShape, Value};
use alloc::string::String;
use core::fmt::{Debug, Formatter};
use embedded_time::duration::Milliseconds;
use embedded_time::Clock;
use tracing::{debug, trace};

/// Error handling for call execution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CallError<E> {
    /// Invalid command parameters, nothing was transmitted
    #[error("invalid command: {0}")]
    Build(#[from] BuildError),
    /// Reply does not match the expected result shape
    #[error("unexpected reply: {0}")]
    Decode(#[from] DecodeError),
    /// Low level transport error, passed through unchanged
    #[error("transport failure: {0:?}")]
    Transport(E),
    /// Redis error response. Inner value is the error message received.
    #[error("error response: {0}")]
    ErrorResponse(String),
    /// Call was cancelled, either by token or by the client deadline.
    /// The late reply is discarded by the dispatcher.
    #[error("call cancelled")]
    Cancelled,
    /// Upstream timer/clock failure
    #[error("timer failure")]
    TimerError,
}

impl<E> From<TimeoutError> for CallError<E> {
    fn from(error: TimeoutError) -> Self {
        match error {
            TimeoutError::DeadlineOutOfRange => CallError::Build(BuildError::TimeoutOutOfRange),
            TimeoutError::TimerStartFailed | TimeoutError::TimerError => CallError::TimerError,
        }
    }
}

/// Timing parameters of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Max. time waiting for replies of regular (non-blocking) commands. Zero waits indefinitely.
    pub timeout: Milliseconds,

    /// Added to the server timeout of blocking commands, so that the server's nil reply is
    /// received before the client gives up
    pub grace: Milliseconds,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            timeout: Milliseconds(0),
            grace: Milliseconds(2_000),
        }
    }
}

/// Executes commands over the transport and decodes the replies
///
/// At most one call is in flight, as each [PendingCall] mutably borrows its dispatcher.
/// Replies of abandoned calls (dropped or cancelled) are discarded, so reply to call mapping stays
/// intact.
///
/// # Basic usage
/// ```
///# use bytes::Bytes;
///# use embedded_redis_core::commands::Command;
///# use embedded_redis_core::reply::ReplyUnit;
///# use embedded_redis_core::network::Transport;
///# use std_clock::StdClock;
///#
///# mod std_clock {
///#     use embedded_time::{clock::Error, fraction::Fraction, Clock, Instant};
///#     pub struct StdClock;
///#     impl Clock for StdClock {
///#         type T = u64;
///#         const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);
///#         fn try_now(&self) -> Result<Instant<Self>, Error> { Ok(Instant::new(0)) }
///#     }
///# }
///#
///# struct Loopback;
///# impl Transport for Loopback {
///#     type Error = ();
///#     fn send(&mut self, _: &Command) -> Result<(), ()> { Ok(()) }
///#     fn receive(&mut self) -> nb::Result<ReplyUnit, ()> { Ok(ReplyUnit::bulk("42.5")) }
///# }
///#
/// use embedded_redis_core::commands::lookup::ScoreCommand;
/// use embedded_redis_core::network::Dispatcher;
///
/// let clock = StdClock;
/// let mut dispatcher = Dispatcher::new(Loopback, Some(&clock));
///
/// let score = dispatcher.execute::<f64, _>(ScoreCommand::new("leaderboard", "alice")).unwrap();
/// assert_eq!(Some(42.5), score.into_number());
/// ```
pub struct Dispatcher<'a, T: Transport, C: Clock> {
    pub(crate) transport: T,
    pub(crate) clock: Option<&'a C>,
    pub(crate) config: DispatchConfig,

    /// Number of replies still expected for abandoned calls
    pub(crate) orphaned: usize,
}

impl<'a, T: Transport, C: Clock> Dispatcher<'a, T, C> {
    /// Without clock no deadlines are applied
    pub fn new(transport: T, clock: Option<&'a C>) -> Self {
        Self::with_config(transport, clock, DispatchConfig::default())
    }

    pub fn with_config(transport: T, clock: Option<&'a C>, config: DispatchConfig) -> Self {
        Dispatcher {
            transport,
            clock,
            config,
            orphaned: 0,
        }
    }

    /// Sets the max. duration waiting for replies of regular commands
    pub fn timeout(&mut self, timeout: Milliseconds) -> &mut Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the grace margin of blocking commands
    pub fn grace(&mut self, grace: Milliseconds) -> &mut Self {
        self.config.grace = grace;
        self
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Transmits the command and returns the pending call
    ///
    /// The deadline of the call starts right before transmission. Optionally the call may be cancelled by
    /// the given token.
    pub fn send<'b, N: Numeric>(
        &'b mut self,
        command: Command,
        shape: ResultShape,
        cancellation: Option<&'b CancellationToken>,
    ) -> Result<PendingCall<'b, 'a, T, C, N>, CallError<T::Error>> {
        let limit = deadline(command.blocking_timeout(), self.config.timeout, self.config.grace)?;

        // Timer is started first, so a failing clock leaves no reply on the wire
        let timeout = Timeout::new(self.clock, limit)?;

        self.transport.send(&command).map_err(CallError::Transport)?;
        debug!(keyword = command.keyword(), deadline_ms = limit.0, "command sent");

        Ok(PendingCall::new(self, shape, timeout, cancellation))
    }

    /// Validates and transmits the request, see [Dispatcher::send]
    pub fn dispatch<'b, N: Numeric, R: Request>(
        &'b mut self,
        request: R,
        cancellation: Option<&'b CancellationToken>,
    ) -> Result<PendingCall<'b, 'a, T, C, N>, CallError<T::Error>> {
        let shape = request.shape();
        let command = request.encode()?;
        self.send(command, shape, cancellation)
    }

    /// Sends the command and blocks until the reply is decoded
    pub fn call<N: Numeric>(&mut self, command: Command, shape: ResultShape) -> Result<Value<N>, CallError<T::Error>> {
        self.send(command, shape, None)?.wait()
    }

    /// Validates the request, sends it and blocks until the reply is decoded
    pub fn execute<N: Numeric, R: Request>(&mut self, request: R) -> Result<Value<N>, CallError<T::Error>> {
        self.dispatch(request, None)?.wait()
    }

    /// Discards already received replies of abandoned calls without blocking
    /// Returns the number of replies still expected.
    pub fn discard_orphaned(&mut self) -> Result<usize, CallError<T::Error>> {
        while self.orphaned > 0 {
            match self.transport.receive() {
                Ok(_) => {
                    self.orphaned -= 1;
                    trace!(remaining = self.orphaned, "discarded reply of abandoned call");
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(error)) => return Err(CallError::Transport(error)),
            }
        }

        Ok(self.orphaned)
    }

    /// Number of replies still expected for dropped or cancelled calls
    pub fn orphaned_replies(&self) -> usize {
        self.orphaned
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport, C: Clock> Debug for Dispatcher<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("orphaned", &self.orphaned)
            .finish()
    }
}
