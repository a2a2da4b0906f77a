use crate::commands::Command;
use crate::network::protocol::Protocol;
use crate::network::response::{MemoryParameters, ResponseBuffer};
use crate::network::transport::Transport;
use crate::reply::ReplyUnit;
use bytes::BytesMut;
use core::fmt::{Debug, Formatter};
use embedded_nal::TcpClientStack;
use tracing::{error, trace};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError<E> {
    /// Low level TCP error of the network stack
    #[error("tcp failure: {0:?}")]
    Tcp(E),
    /// Encoding of the request frame failed
    #[error("failed to encode command")]
    EncodingCommandFailed,
    /// Network stack accepted no data
    #[error("network stack accepted no data")]
    WriteZero,
    /// Received data is not valid RESP. The connection should be reestablished.
    #[error("protocol violation")]
    ProtocolViolation,
    /// Unparsed data exceeds the memory limit
    #[error("response buffer full")]
    BufferFull,
}

/// [Transport] over an established TCP socket of an [embedded-nal](embedded_nal) network stack
///
/// Socket management (connect, reconnect, close) stays with the caller.
pub struct Connection<'a, N: TcpClientStack, P: Protocol> {
    stack: &'a mut N,
    socket: &'a mut N::TcpSocket,
    protocol: P,
    buffer: ResponseBuffer<P>,
}

impl<'a, N: TcpClientStack, P: Protocol> Connection<'a, N, P> {
    pub fn new(stack: &'a mut N, socket: &'a mut N::TcpSocket, protocol: P) -> Self {
        Self::with_memory(stack, socket, protocol, MemoryParameters::default())
    }

    pub fn with_memory(stack: &'a mut N, socket: &'a mut N::TcpSocket, protocol: P, memory: MemoryParameters) -> Self {
        Connection {
            stack,
            socket,
            buffer: ResponseBuffer::new(protocol.clone(), memory),
            protocol,
        }
    }

    /// Drops all received data, e.g. after a protocol violation
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of complete replies not yet taken
    pub fn pending_replies(&self) -> usize {
        self.buffer.pending_unit_count()
    }

    /// Appends up to 32 bytes to the response buffer
    fn receive_chunk(&mut self) -> nb::Result<(), ConnectionError<N::Error>> {
        let mut local_buffer: [u8; 32] = [0; 32];

        match self.stack.receive(self.socket, &mut local_buffer) {
            Ok(0) => Err(nb::Error::WouldBlock),
            Ok(byte_count) => {
                trace!(bytes = byte_count, "received chunk");
                self.buffer.append(&local_buffer[0..byte_count]);
                Ok(())
            }
            Err(error) => Err(error.map(ConnectionError::Tcp)),
        }
    }

    /// Raw network logic for sending a frame
    fn send_bytes(&mut self, data: &[u8]) -> Result<(), ConnectionError<N::Error>> {
        let mut remaining = data;

        while !remaining.is_empty() {
            let sent = nb::block!(self.stack.send(self.socket, remaining)).map_err(ConnectionError::Tcp)?;
            if sent == 0 {
                return Err(ConnectionError::WriteZero);
            }

            remaining = &remaining[sent.min(remaining.len())..];
        }

        Ok(())
    }
}

impl<N: TcpClientStack, P: Protocol> Transport for Connection<'_, N, P> {
    type Error = ConnectionError<N::Error>;

    fn send(&mut self, command: &Command) -> Result<(), Self::Error> {
        let frame = self.protocol.request(command);

        let mut buffer = BytesMut::new();
        if self.protocol.encode_bytes(&mut buffer, &frame).is_err() {
            return Err(ConnectionError::EncodingCommandFailed);
        }

        self.send_bytes(buffer.as_ref())
    }

    fn receive(&mut self) -> nb::Result<ReplyUnit, Self::Error> {
        loop {
            if let Some(unit) = self.buffer.take_unit() {
                return Ok(unit);
            }

            if self.buffer.is_faulty() {
                error!("received invalid RESP data, reply mapping is lost");
                return Err(nb::Error::Other(ConnectionError::ProtocolViolation));
            }

            if self.buffer.is_full() {
                error!("response buffer exceeded memory limit");
                return Err(nb::Error::Other(ConnectionError::BufferFull));
            }

            self.receive_chunk()?;
        }
    }
}

impl<N: TcpClientStack, P: Protocol> Debug for Connection<'_, N, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Connection")
            .field("pending_replies", &self.buffer.pending_unit_count())
            .finish()
    }
}
