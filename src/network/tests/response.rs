use crate::network::protocol::{Resp2, Resp3};
use crate::network::response::{MemoryParameters, ResponseBuffer};
use crate::reply::ReplyUnit;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

#[test]
fn test_take_unit_empty_buffer() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());

    assert_eq!(None, buffer.take_unit());
}

#[test]
fn test_take_unit_incomplete_simple_string() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"+test");

    assert_eq!(None, buffer.take_unit());
    assert_eq!(5, buffer.unparsed_len());
}

#[test]
fn test_take_unit_incomplete_crlf() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"+test\r");

    assert_eq!(None, buffer.take_unit());
    assert!(!buffer.is_faulty());
}

#[test]
fn test_take_unit_completed_by_second_append() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"$5\r\nhel");
    buffer.append(b"lo\r\n");

    assert_eq!(Some(ReplyUnit::bulk("hello")), buffer.take_unit());
    assert_eq!(0, buffer.unparsed_len());
}

#[test]
fn test_fault_prefix() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"_test\r\n");

    assert_eq!(None, buffer.take_unit());
    assert!(buffer.is_faulty());
}

#[test]
fn test_error_string() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"-Error\r\n");

    assert_eq!(Some(ReplyUnit::Error("Error".to_string())), buffer.take_unit());
}

#[test]
fn test_multiple_units_in_order() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b":1\r\n*2\r\n$1\r\na\r\n$3\r\n1.5\r\n$-1\r\n+Ok");

    assert_eq!(3, buffer.pending_unit_count());
    assert_eq!(Some(ReplyUnit::Integer(1)), buffer.take_unit());
    assert_eq!(
        Some(ReplyUnit::Array(vec![ReplyUnit::bulk("a"), ReplyUnit::bulk("1.5")])),
        buffer.take_unit()
    );
    assert_eq!(Some(ReplyUnit::Nil), buffer.take_unit());
    assert_eq!(None, buffer.take_unit());
    assert_eq!(3, buffer.unparsed_len());
}

#[test]
fn test_resp3_push_skipped() {
    let mut buffer = ResponseBuffer::new(Resp3 {}, MemoryParameters::default());
    buffer.append(b">2\r\n+invalidate\r\n_\r\n,2.5\r\n");

    assert_eq!(Some(ReplyUnit::Double(2.5)), buffer.take_unit());
    assert_eq!(None, buffer.take_unit());
}

#[test]
fn test_is_full() {
    let mut buffer = ResponseBuffer::new(
        Resp2 {},
        MemoryParameters {
            buffer_size: 8,
            unit_capacity: 1,
            memory_limit: Some(8),
        },
    );

    buffer.append(b"$10\r\n012");
    assert!(buffer.is_full());
}

#[test]
fn test_is_full_no_limit() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"$1000\r\n0123456789");

    assert!(!buffer.is_full());
}

#[test]
fn test_clear() {
    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    buffer.append(b"+Ok\r\n_test\r\n");
    assert!(buffer.is_faulty());

    buffer.clear();
    assert!(!buffer.is_faulty());
    assert_eq!(0, buffer.pending_unit_count());
    assert_eq!(0, buffer.unparsed_len());
}

#[test]
fn test_large_reply_in_small_chunks() {
    let payload: Vec<u8> = (0..4096).map(|i| b'a' + (i % 26) as u8).collect();
    let mut data = Vec::new();
    data.extend_from_slice(b"$4096\r\n");
    data.extend_from_slice(&payload);
    data.extend_from_slice(b"\r\n:7\r\n$3\r\nab");

    let mut buffer = ResponseBuffer::new(Resp2 {}, MemoryParameters::default());
    for chunk in data.chunks(7) {
        buffer.append(chunk);
    }

    assert_eq!(Some(ReplyUnit::Bulk(payload.into())), buffer.take_unit());
    assert_eq!(Some(ReplyUnit::Integer(7)), buffer.take_unit());
    assert_eq!(None, buffer.take_unit());

    // Only the incomplete frame is left
    assert_eq!(6, buffer.unparsed_len());
    assert!(!buffer.is_faulty());
}
