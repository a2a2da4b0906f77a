use crate::codec::Numeric;
use crate::network::dispatcher::{CallError, Dispatcher};
use crate::network::timeout::Timeout;
use crate::network::transport::{Cancellation, CancellationToken, Transport};
use crate::reply::{decode, ReplyUnit, ResultShape, Value};
use core::marker::PhantomData;
use core::pin::Pin;
use core::task::{Context, Poll};
use embedded_time::Clock;
use tracing::{debug, trace, warn};

/// Reply management of a transmitted command
///
/// The reply can be awaited in three ways, all sharing the same receive step and decoder:
/// * [PendingCall::wait] blocks until the reply is decoded
/// * [PendingCall::ready] checks without blocking
/// * as [core::future::Future], suspending while no data is pending
///
/// Dropping an unfinished call marks its reply for being discarded.
pub struct PendingCall<'b, 'a, T: Transport, C: Clock, N> {
    dispatcher: &'b mut Dispatcher<'a, T, C>,
    shape: ResultShape,
    timeout: Timeout<'a, C>,
    cancellation: Option<&'b CancellationToken>,

    /// Cached outcome of ready(). Will be returned on wait() call.
    outcome: Option<Result<Value<N>, CallError<T::Error>>>,

    /// Reply was received or the call was abandoned
    finished: bool,

    numeric: PhantomData<fn() -> N>,
}

impl<'b, 'a, T: Transport, C: Clock, N: Numeric> PendingCall<'b, 'a, T, C, N> {
    pub(crate) fn new(
        dispatcher: &'b mut Dispatcher<'a, T, C>,
        shape: ResultShape,
        timeout: Timeout<'a, C>,
        cancellation: Option<&'b CancellationToken>,
    ) -> Self {
        PendingCall {
            dispatcher,
            shape,
            timeout,
            cancellation,
            outcome: None,
            finished: false,
            numeric: PhantomData,
        }
    }

    /// Blocks until the reply is received and returns the decoded value
    /// Fails on error replies, unexpected reply shapes or cancellation.
    pub fn wait(mut self) -> Result<Value<N>, CallError<T::Error>> {
        if let Some(outcome) = self.outcome.take() {
            return outcome;
        }

        nb::block!(self.step())
    }

    /// Non blocking method for checking if the reply is ready
    /// So if true is returned, wait() is non-blocking.
    /// Errors are preserved and returned on wait() call
    pub fn ready(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }

        match self.step() {
            Ok(value) => self.outcome = Some(Ok(value)),
            Err(nb::Error::Other(error)) => self.outcome = Some(Err(error)),
            Err(nb::Error::WouldBlock) => return false,
        }

        true
    }

    pub fn shape(&self) -> ResultShape {
        self.shape
    }

    /// Receive step shared by all waiting strategies
    fn step(&mut self) -> nb::Result<Value<N>, CallError<T::Error>> {
        loop {
            match self.dispatcher.transport.receive() {
                Ok(unit) => {
                    // Replies arrive in order, so pending replies of abandoned calls come first
                    if self.dispatcher.orphaned > 0 {
                        self.dispatcher.orphaned -= 1;
                        trace!(remaining = self.dispatcher.orphaned, "discarded reply of abandoned call");
                        continue;
                    }

                    self.finished = true;
                    return self.evaluate(unit).map_err(nb::Error::Other);
                }
                Err(nb::Error::Other(error)) => {
                    self.finished = true;
                    return Err(nb::Error::Other(CallError::Transport(error)));
                }
                Err(nb::Error::WouldBlock) => {
                    return match self.is_cancelled() {
                        Ok(false) => Err(nb::Error::WouldBlock),
                        Ok(true) => {
                            warn!("call cancelled before reply was received");
                            self.abandon();
                            Err(nb::Error::Other(CallError::Cancelled))
                        }
                        Err(error) => {
                            self.abandon();
                            Err(nb::Error::Other(error))
                        }
                    };
                }
            }
        }
    }

    fn is_cancelled(&self) -> Result<bool, CallError<T::Error>> {
        if let Some(token) = self.cancellation {
            if Cancellation::is_cancelled(token)? {
                return Ok(true);
            }
        }

        Ok(self.timeout.is_cancelled()?)
    }

    /// Reply is still expected, so it's discarded once received
    fn abandon(&mut self) {
        self.finished = true;
        self.dispatcher.orphaned += 1;
    }

    fn evaluate(&self, unit: ReplyUnit) -> Result<Value<N>, CallError<T::Error>> {
        if let ReplyUnit::Error(message) = unit {
            debug!(message = message.as_str(), "received error response");
            return Err(CallError::ErrorResponse(message));
        }

        let value = decode(unit, self.shape)?;
        debug!(absent = value.is_absent(), "reply decoded");
        Ok(value)
    }
}

impl<T: Transport, C: Clock, N: Numeric> core::future::Future for PendingCall<'_, '_, T, C, N> {
    type Output = Result<Value<N>, CallError<T::Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let call = self.get_mut();

        if let Some(outcome) = call.outcome.take() {
            return Poll::Ready(outcome);
        }

        // Polled after completion
        if call.finished {
            return Poll::Pending;
        }

        match call.step() {
            Ok(value) => Poll::Ready(Ok(value)),
            Err(nb::Error::Other(error)) => Poll::Ready(Err(error)),
            Err(nb::Error::WouldBlock) => {
                // Transport has no readiness notification, so polling continues on the next run
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}

// No field is structurally pinned
impl<T: Transport, C: Clock, N> Unpin for PendingCall<'_, '_, T, C, N> {}

impl<T: Transport, C: Clock, N> Drop for PendingCall<'_, '_, T, C, N> {
    fn drop(&mut self) {
        if !self.finished {
            self.dispatcher.orphaned += 1;
        }
    }
}
