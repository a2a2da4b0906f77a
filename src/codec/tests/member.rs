use crate::codec::{encode_member, TokenSource};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bytes::{Bytes, BytesMut};

#[test]
fn test_all_forms_identical() {
    let text = "sorted member \u{00e4}";

    let borrowed = encode_member(text);
    let owned_text = encode_member(text.to_string());
    let owned_bytes = encode_member(text.as_bytes().to_vec());
    let bytes = encode_member(Bytes::copy_from_slice(text.as_bytes()));
    let slice = encode_member(text.as_bytes());

    assert_eq!(borrowed, owned_text);
    assert_eq!(borrowed, owned_bytes);
    assert_eq!(borrowed, bytes);
    assert_eq!(borrowed, slice);
}

#[test]
fn test_empty_member() {
    assert_eq!(Bytes::new(), encode_member(""));
    assert_eq!(Bytes::new(), encode_member(String::new()));
}

#[test]
fn test_binary_payload() {
    let payload: &[u8] = &[0, 159, 146, 150, 255];
    assert_eq!(payload, encode_member(payload).as_ref());
    assert_eq!(payload, encode_member(payload.to_vec()).as_ref());
}

#[test]
fn test_owned_bytes_not_copied() {
    let original = Bytes::from_static(b"static member");
    let token = encode_member(original.clone());

    assert_eq!(original.as_ptr(), token.as_ptr());
}

#[test]
fn test_owned_vec_not_copied() {
    let original: Vec<u8> = b"vector member".to_vec();
    let pointer = original.as_ptr();

    assert_eq!(pointer, encode_member(original).as_ptr());
}

#[test]
fn test_borrowed_view_written_into_buffer() {
    let mut buffer = BytesMut::from("prefix:");
    let member = "member";

    assert_eq!(6, member.encoded_len());
    member.write_to(&mut buffer);

    assert_eq!(b"prefix:member".as_slice(), buffer.as_ref());
}
