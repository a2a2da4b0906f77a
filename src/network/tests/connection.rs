use crate::commands::builder::CommandBuilder;
use crate::commands::Command;
use crate::network::tests::mocks::{MockTcpError, NetworkMockBuilder, SocketMock};
use crate::network::{Connection, ConnectionError, MemoryParameters, Resp2, Resp3, Transport};
use crate::reply::ReplyUnit;
use alloc::vec;

fn score_command() -> Command {
    CommandBuilder::new("ZSCORE").arg("board").arg("alice").into_command()
}

#[test]
fn test_send_encodes_command() {
    let mut stack = NetworkMockBuilder::default()
        .send(164, "*3\r\n$6\r\nZSCORE\r\n$5\r\nboard\r\n$5\r\nalice\r\n")
        .into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    connection.send(&score_command()).unwrap();
}

#[test]
fn test_send_partial_writes() {
    let mut stack = NetworkMockBuilder::default()
        .send_partial(10)
        .send_would_block()
        .send_partial(17)
        .send(164, "$5\r\nalice\r\n")
        .into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp3 {});
    connection.send(&score_command()).unwrap();
}

#[test]
fn test_send_tcp_error() {
    let mut stack = NetworkMockBuilder::default().send_error().into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(
        Err(ConnectionError::Tcp(MockTcpError::Error1)),
        connection.send(&score_command())
    );
}

#[test]
fn test_send_write_zero() {
    let mut stack = NetworkMockBuilder::default().send_partial(0).into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(Err(ConnectionError::WriteZero), connection.send(&score_command()));
}

#[test]
fn test_receive_chunked_reply() {
    let mut stack = NetworkMockBuilder::default()
        .response(b"*4\r\n$5\r\nalice\r\n$3\r\n1.5\r\n$3\r\nbob\r\n$17\r\n2.000000000000001\r\n")
        .into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(
        ReplyUnit::Array(vec![
            ReplyUnit::bulk("alice"),
            ReplyUnit::bulk("1.5"),
            ReplyUnit::bulk("bob"),
            ReplyUnit::bulk("2.000000000000001"),
        ]),
        connection.receive().unwrap()
    );
}

#[test]
fn test_receive_would_block() {
    let mut stack = NetworkMockBuilder::default()
        .response(b":4")
        .response_no_data()
        .response_empty()
        .into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(Err(nb::Error::WouldBlock), connection.receive());
    assert_eq!(Err(nb::Error::WouldBlock), connection.receive());
}

#[test]
fn test_receive_multiple_replies_in_one_chunk() {
    let mut stack = NetworkMockBuilder::default().response(b":4\r\n$-1\r\n").into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(Ok(ReplyUnit::Integer(4)), connection.receive());
    assert_eq!(1, connection.pending_replies());
    assert_eq!(Ok(ReplyUnit::Nil), connection.receive());
}

#[test]
fn test_receive_resp3_push_skipped() {
    let mut stack = NetworkMockBuilder::default()
        .response(b">2\r\n+invalidate\r\n_\r\n")
        .response(b",3.25\r\n")
        .into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp3 {});
    assert_eq!(Ok(ReplyUnit::Double(3.25)), connection.receive());
}

#[test]
fn test_receive_tcp_error() {
    let mut stack = NetworkMockBuilder::default().receive_tcp_error().into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(
        Err(nb::Error::Other(ConnectionError::Tcp(MockTcpError::Error1))),
        connection.receive()
    );
}

#[test]
fn test_receive_protocol_violation() {
    let mut stack = NetworkMockBuilder::default().response(b"?invalid\r\n").into_mock();
    let mut socket = SocketMock::new(164);

    let mut connection = Connection::new(&mut stack, &mut socket, Resp2 {});
    assert_eq!(
        Err(nb::Error::Other(ConnectionError::ProtocolViolation)),
        connection.receive()
    );

    // Fatal until reset
    assert_eq!(
        Err(nb::Error::Other(ConnectionError::ProtocolViolation)),
        connection.receive()
    );
    connection.reset();
}

#[test]
fn test_receive_buffer_full() {
    let mut stack = NetworkMockBuilder::default().response(b"$100\r\n0123456789").into_mock();
    let mut socket = SocketMock::new(164);

    let memory = MemoryParameters {
        buffer_size: 16,
        unit_capacity: 1,
        memory_limit: Some(16),
    };
    let mut connection = Connection::with_memory(&mut stack, &mut socket, Resp2 {}, memory);
    assert_eq!(Err(nb::Error::Other(ConnectionError::BufferFull)), connection.receive());
}
