pub use connection::{Connection, ConnectionError};
pub use dispatcher::{CallError, DispatchConfig, Dispatcher};
pub use future::PendingCall;
pub use protocol::{Protocol, Resp2, Resp3};
pub use response::MemoryParameters;
pub use timeout::{Timeout, TimeoutError};
pub use transport::{Cancellation, CancellationToken, Transport};

#[cfg(feature = "mock")]
pub use transport::{MockTransport, MockTransportError};

pub(crate) mod connection;
pub(crate) mod dispatcher;
pub(crate) mod future;
pub(crate) mod protocol;
pub(crate) mod response;
pub(crate) mod timeout;
pub(crate) mod transport;

#[cfg(test)]
pub(crate) mod tests;
