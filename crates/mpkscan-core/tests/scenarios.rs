use mpkscan_core::navigate::{index_array, skip};
use mpkscan_core::{BlobKind, DecodeError, Message, Value, ValueKind};

#[test]
fn positive_fixint() {
    let bytes = [0x05];
    let value = Message::new(&bytes).element_at(0).expect("decode");
    assert_eq!(value.kind(), &ValueKind::UInt8(5));
    assert_eq!(value.as_u64(), Some(5));
}

#[test]
fn negative_fixint() {
    let bytes = [0xe0];
    let value = Message::new(&bytes).element_at(0).expect("decode");
    assert_eq!(value.kind(), &ValueKind::Int8(-32));
    assert_eq!(value.as_i64(), Some(-32));
}

#[test]
fn explicit_uint8() {
    let bytes = [0xcc, 0xff];
    let value = Message::new(&bytes).element_at(0).expect("decode");
    assert_eq!(value.kind(), &ValueKind::UInt8(255));
}

#[test]
fn fixstr_blob() {
    let bytes = [0xa3, 0x61, 0x62, 0x63];
    let value = Message::new(&bytes).element_at(0).expect("decode");
    let blob = value.as_blob().expect("blob");
    assert_eq!(blob.kind(), BlobKind::Str);
    assert_eq!(blob.len(), 3);
    assert_eq!(blob.data(), b"abc");
    assert_eq!(blob.data_offset(), 1);
}

#[test]
fn fixarray_indexing() {
    let bytes = [0x92, 0x01, 0x02];
    let array = Message::new(&bytes)
        .element_at(0)
        .expect("decode")
        .as_collection()
        .expect("array");
    assert_eq!(index_array(&array, 0).expect("index 0").as_u64(), Some(1));
    assert_eq!(index_array(&array, 1).expect("index 1").as_u64(), Some(2));
    assert_eq!(
        index_array(&array, 2),
        Err(DecodeError::IndexOutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn fixmap_lookup() {
    let bytes = [0x81, 0xa1, 0x78, 0x01];
    let map = Message::new(&bytes)
        .element_at(0)
        .expect("decode")
        .as_collection()
        .expect("map");
    assert_eq!(map.find(&Value::str_key("x")).expect("x").as_u64(), Some(1));
    assert!(matches!(
        map.find(&Value::str_key("y")),
        Err(DecodeError::KeyNotFound { offset: 0 })
    ));
}

#[test]
fn skip_flattens_nested_array() {
    let bytes = [0x92, 0x91, 0x01, 0x02];
    let message = Message::new(&bytes);
    let outer = message.element_at(0).expect("outer").as_collection().expect("array");
    let inner = message.element_at(outer.first_child()).expect("inner");
    let landed = skip(message, inner, 1).expect("skip");
    assert_eq!(landed.header_offset(), 3);
    assert_eq!(landed.as_u64(), Some(2));
}

#[test]
fn skip_past_last_element_reports_end_of_message() {
    let bytes = [0x92, 0x91, 0x01, 0x02];
    let message = Message::new(&bytes);
    let outer = message.element_at(0).expect("outer");
    assert_eq!(
        skip(message, outer, 1),
        Err(DecodeError::EndOfMessage { offset: 4 })
    );
    assert_eq!(outer.collection_size(), Ok(4));
}

#[test]
fn float_headers_are_bit_cast() {
    // f32 1.0 and f64 -2.5
    let bytes = [
        0x92, 0xca, 0x3f, 0x80, 0x00, 0x00, 0xcb, 0xc0, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    let array = Message::new(&bytes)
        .element_at(0)
        .expect("decode")
        .as_collection()
        .expect("array");
    assert_eq!(array.index(0).expect("f32").kind(), &ValueKind::Float32(1.0));
    assert_eq!(array.index(1).expect("f64").as_f64(), Some(-2.5));
}

#[test]
fn raw_bytes_of_nested_map() {
    // [{"k": [1, 2]}, nil]
    let bytes = [0x92, 0x81, 0xa1, b'k', 0x92, 0x01, 0x02, 0xc0];
    let message = Message::new(&bytes);
    let map = message.element_at(1).expect("map");
    assert_eq!(map.raw_bytes().expect("raw"), &bytes[1..7]);
}

#[test]
fn reserved_header_is_rejected() {
    let bytes = [0xc1];
    assert_eq!(
        Message::new(&bytes).element_at(0),
        Err(DecodeError::ReservedHeader {
            offset: 0,
            byte: 0xc1
        })
    );
}

#[test]
fn truncated_length_field_is_rejected() {
    // str16 header with one length byte missing
    let bytes = [0xda, 0x00];
    assert!(matches!(
        Message::new(&bytes).element_at(0),
        Err(DecodeError::OutOfBounds { .. })
    ));
}
