use crate::codec::Token;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

/// Anything that can be written into a growable byte buffer as one wire argument.
///
/// Owned inputs (`String`, `Vec<u8>`, `Bytes`) hand over their allocation without copying.
/// Borrowed views (`&str`, `&[u8]`) are written straight into the destination token, so no
/// intermediate owned value is created. Equal content always results in identical tokens.
pub trait TokenSource {
    /// Number of bytes written by [TokenSource::write_to]
    fn encoded_len(&self) -> usize;

    /// Appends the raw bytes to the given buffer
    fn write_to(&self, buf: &mut BytesMut);

    /// Converts to a standalone token
    fn into_token(self) -> Token
    where
        Self: Sized,
    {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }
}

/// Returns the token of a member (or key) payload
pub fn encode_member<M: TokenSource>(member: M) -> Token {
    member.into_token()
}

impl TokenSource for &str {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self.as_bytes());
    }
}

impl TokenSource for &[u8] {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self);
    }
}

impl<const LEN: usize> TokenSource for &[u8; LEN] {
    fn encoded_len(&self) -> usize {
        LEN
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self.as_slice());
    }
}

impl TokenSource for &String {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self.as_bytes());
    }
}

impl TokenSource for String {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self.as_bytes());
    }

    fn into_token(self) -> Token {
        Bytes::from(self)
    }
}

impl TokenSource for Vec<u8> {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self);
    }

    fn into_token(self) -> Token {
        Bytes::from(self)
    }
}

impl TokenSource for Bytes {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self);
    }

    /// Shallow, reference counted
    fn into_token(self) -> Token {
        self
    }
}

impl TokenSource for &Bytes {
    fn encoded_len(&self) -> usize {
        self.len()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        buf.put_slice(self);
    }

    fn into_token(self) -> Token {
        self.clone()
    }
}
