use crate::commands::BlockingTimeout;
use crate::network::transport::Cancellation;
use embedded_time::duration::Milliseconds;
use embedded_time::timer::param::{OneShot, Running};
use embedded_time::{Clock, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeoutError {
    #[error("failed to start timer")]
    TimerStartFailed,
    #[error("timer failure")]
    TimerError,
    /// Server timeout plus grace exceeds the timer range
    #[error("deadline exceeds timer range")]
    DeadlineOutOfRange,
}

/// Client side deadline of a call
#[derive(Debug)]
pub struct Timeout<'a, C: Clock> {
    timer: Option<Timer<'a, OneShot, Running, C, Milliseconds>>,
}

impl<'a, C: Clock> Timeout<'a, C> {
    /// Starts the deadline timer. No deadline is applied without clock or for a zero duration.
    pub fn new(clock: Option<&'a C>, duration: Milliseconds) -> Result<Timeout<'a, C>, TimeoutError> {
        let clock = match clock {
            Some(clock) if duration.0 > 0 => clock,
            _ => return Ok(Self::none()),
        };

        let timer = clock
            .new_timer(duration)
            .start()
            .map_err(|_| TimeoutError::TimerStartFailed)?;

        Ok(Self { timer: Some(timer) })
    }

    /// Never expiring timeout
    pub fn none() -> Self {
        Self { timer: None }
    }

    pub fn is_limited(&self) -> bool {
        self.timer.is_some()
    }

    pub fn expired(&self) -> Result<bool, TimeoutError> {
        match &self.timer {
            None => Ok(false),
            Some(timer) => timer.is_expired().map_err(|_| TimeoutError::TimerError),
        }
    }
}

impl<C: Clock> Cancellation for Timeout<'_, C> {
    fn is_cancelled(&self) -> Result<bool, TimeoutError> {
        self.expired()
    }
}

/// Client deadline of a command
///
/// * Regular commands use the default timeout of the dispatcher.
/// * Commands blocking indefinitely on server side (timeout 0) never time out on client side.
/// * Other blocking commands get the server timeout plus grace, so the server's nil reply
///   arrives before the client gives up.
///
/// Zero is returned for "no deadline".
pub(crate) fn deadline(
    blocking: Option<BlockingTimeout>,
    default: Milliseconds,
    grace: Milliseconds,
) -> Result<Milliseconds, TimeoutError> {
    match blocking {
        None => Ok(default),
        Some(timeout) if timeout.is_infinite() => Ok(Milliseconds(0)),
        Some(timeout) => timeout
            .milliseconds()
            .checked_add(grace.0)
            .map(Milliseconds)
            .ok_or(TimeoutError::DeadlineOutOfRange),
    }
}
