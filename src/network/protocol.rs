use crate::commands::Command;
use crate::reply::ReplyUnit;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bytes::BytesMut;
use redis_protocol::resp2::types::Frame as Resp2Frame;
use redis_protocol::resp3::types::Frame as Resp3Frame;
use redis_protocol::types::RedisProtocolError;
use redis_protocol::{resp2, resp3};

/// Generic wrapper for redis-protocol encode/decode methods
pub trait Protocol: Clone {
    type FrameType;

    /// Splits the first complete frame off the buffer without copying
    /// Incomplete data is left in place
    fn decode(&self, buffer: &mut BytesMut) -> Result<Option<Self::FrameType>, RedisProtocolError>;

    /// Encodes Frame to buffer
    fn encode_bytes(&self, buf: &mut BytesMut, frame: &Self::FrameType) -> Result<usize, RedisProtocolError>;

    /// Request frame of the command
    fn request(&self, command: &Command) -> Self::FrameType;

    /// Converts a received frame to a reply unit
    /// None is returned for out-of-band frames not belonging to any call (e.g. RESP3 push)
    fn reply_unit(&self, frame: Self::FrameType) -> Option<ReplyUnit>;
}

/// Abstraction for RESP2 protocol
#[derive(Clone, Debug, Default)]
pub struct Resp2 {}

impl Protocol for Resp2 {
    type FrameType = Resp2Frame;

    fn decode(&self, buffer: &mut BytesMut) -> Result<Option<Self::FrameType>, RedisProtocolError> {
        Ok(resp2::decode::decode_mut(buffer)?.map(|(frame, _, _)| frame))
    }

    fn encode_bytes(&self, buf: &mut BytesMut, frame: &Self::FrameType) -> Result<usize, RedisProtocolError> {
        resp2::encode::encode_bytes(buf, frame)
    }

    fn request(&self, command: &Command) -> Self::FrameType {
        command.into()
    }

    fn reply_unit(&self, frame: Self::FrameType) -> Option<ReplyUnit> {
        Some(frame.into())
    }
}

/// Abstraction for RESP3 protocol
///
/// The connection is expected to be switched to RESP3 already (HELLO 3).
#[derive(Clone, Debug, Default)]
pub struct Resp3 {}

impl Protocol for Resp3 {
    type FrameType = Resp3Frame;

    /// Currently just decodes complete frames
    /// Streamed frames are rejected, no sorted set command replies with a stream.
    fn decode(&self, buffer: &mut BytesMut) -> Result<Option<Self::FrameType>, RedisProtocolError> {
        Ok(resp3::decode::complete::decode_mut(buffer)?.map(|(frame, _, _)| frame))
    }

    fn encode_bytes(&self, buf: &mut BytesMut, frame: &Self::FrameType) -> Result<usize, RedisProtocolError> {
        resp3::encode::complete::encode_bytes(buf, frame)
    }

    fn request(&self, command: &Command) -> Self::FrameType {
        command.into()
    }

    fn reply_unit(&self, frame: Self::FrameType) -> Option<ReplyUnit> {
        match frame {
            Resp3Frame::Push { .. } => None,
            frame => Some(resp3_unit(frame)),
        }
    }
}

impl From<&Command> for Resp2Frame {
    fn from(command: &Command) -> Self {
        Resp2Frame::Array(
            command
                .tokens()
                .iter()
                .map(|token| Resp2Frame::BulkString(token.clone()))
                .collect(),
        )
    }
}

impl From<&Command> for Resp3Frame {
    fn from(command: &Command) -> Self {
        Resp3Frame::Array {
            data: command
                .tokens()
                .iter()
                .map(|token| Resp3Frame::BlobString {
                    data: token.clone(),
                    attributes: None,
                })
                .collect(),
            attributes: None,
        }
    }
}

impl From<Resp2Frame> for ReplyUnit {
    fn from(frame: Resp2Frame) -> Self {
        match frame {
            Resp2Frame::SimpleString(data) => ReplyUnit::Bulk(data),
            Resp2Frame::BulkString(data) => ReplyUnit::Bulk(data),
            Resp2Frame::Error(message) => ReplyUnit::Error(message.to_string()),
            Resp2Frame::Integer(number) => ReplyUnit::Integer(number),
            Resp2Frame::Array(items) => ReplyUnit::Array(items.into_iter().map(ReplyUnit::from).collect()),
            Resp2Frame::Null => ReplyUnit::Nil,
        }
    }
}

/// Maps and sets are flattened, as no reply shape describes them
fn resp3_unit(frame: Resp3Frame) -> ReplyUnit {
    match frame {
        Resp3Frame::BlobString { data, .. } => ReplyUnit::Bulk(data),
        Resp3Frame::SimpleString { data, .. } => ReplyUnit::Bulk(data),
        Resp3Frame::VerbatimString { data, .. } => ReplyUnit::Bulk(data),
        Resp3Frame::ChunkedString(data) => ReplyUnit::Bulk(data),
        // Arbitrary precision, parsed by the decoder
        Resp3Frame::BigNumber { data, .. } => ReplyUnit::Bulk(data),
        Resp3Frame::SimpleError { data, .. } => ReplyUnit::Error(data.to_string()),
        Resp3Frame::BlobError { data, .. } => ReplyUnit::Error(String::from_utf8_lossy(&data).to_string()),
        Resp3Frame::Number { data, .. } => ReplyUnit::Integer(data),
        Resp3Frame::Double { data, .. } => ReplyUnit::Double(data),
        Resp3Frame::Boolean { data, .. } => ReplyUnit::Boolean(data),
        Resp3Frame::Null => ReplyUnit::Nil,
        Resp3Frame::Array { data, .. } | Resp3Frame::Push { data, .. } => {
            ReplyUnit::Array(data.into_iter().map(resp3_unit).collect())
        }
        Resp3Frame::Set { data, .. } => ReplyUnit::Array(data.into_iter().map(resp3_unit).collect()),
        Resp3Frame::Map { data, .. } => {
            let mut items = Vec::with_capacity(data.len() * 2);
            for (key, value) in data {
                items.push(resp3_unit(key));
                items.push(resp3_unit(value));
            }
            ReplyUnit::Array(items)
        }
        // Request only frame
        Resp3Frame::Hello { .. } => ReplyUnit::Error(String::from("unexpected HELLO frame")),
    }
}
