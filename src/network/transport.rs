use crate::commands::Command;
use crate::network::timeout::TimeoutError;
use crate::reply::ReplyUnit;
use core::sync::atomic::{AtomicBool, Ordering};

/// Error type of [MockTransport]
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTransportError {
    Error1,
}

/// Ordered request/reply channel
///
/// Replies are delivered in the order the commands were sent. Connection management is up to the
/// implementation, see [Connection](crate::network::Connection) for a reference implementation.
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Error = MockTransportError;))]
pub trait Transport {
    type Error;

    /// Transmits the full token sequence of the command
    fn send(&mut self, command: &Command) -> Result<(), Self::Error>;

    /// Returns the next complete reply unit
    /// [nb::Error::WouldBlock] is returned while the reply is not (fully) received yet.
    fn receive(&mut self) -> nb::Result<ReplyUnit, Self::Error>;
}

/// Cooperative cancellation, polled while waiting for a reply
pub trait Cancellation {
    /// True once the wait should be abandoned
    fn is_cancelled(&self) -> Result<bool, TimeoutError>;
}

/// Caller controlled cancellation flag
///
/// Can be shared with an interrupt handler or another thread, as it only requires a shared reference.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub const fn new() -> Self {
        CancellationToken {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Requests cancellation of all calls observing this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Rearms the token for further calls
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Cancellation for CancellationToken {
    fn is_cancelled(&self) -> Result<bool, TimeoutError> {
        Ok(CancellationToken::is_cancelled(self))
    }
}
