use log::{debug, trace};

use super::skip::skip;
use crate::decode::element_at;
use crate::error::DecodeError;
use crate::value::{Collection, CollectionKind, Value, ValueKind};

/// Zero-based random access into an array.
///
/// # Examples
/// ```
/// use mpkscan_core::{Message, navigate::index_array};
///
/// let message = Message::new(&[0x92, 0x01, 0x02]);
/// let array = message.element_at(0)?.as_collection().unwrap();
/// assert_eq!(index_array(&array, 1)?.as_u64(), Some(2));
/// assert!(index_array(&array, 2).is_err());
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
pub fn index_array<'a>(array: &Collection<'a>, index: usize) -> Result<Value<'a>, DecodeError> {
    if array.kind() != CollectionKind::Array {
        return Err(DecodeError::NotAnArray {
            offset: array.header_offset(),
        });
    }
    if index >= array.len() as usize {
        return Err(DecodeError::IndexOutOfRange {
            index,
            len: array.len(),
        });
    }
    let message = array.message();
    let first = element_at(message, array.first_child())?;
    skip(message, first, index as u64)
}

/// Linear scan of a map for `key`, returning the paired value.
///
/// Keys match only when their tags are identical; a `u8` key of 5 does not
/// match an `i16` lookup key of 5. Array and map lookup keys are rejected.
pub fn find_in_map<'a>(map: &Collection<'a>, key: &Value<'_>) -> Result<Value<'a>, DecodeError> {
    if map.kind() != CollectionKind::Map {
        return Err(DecodeError::NotAMap {
            offset: map.header_offset(),
        });
    }
    if matches!(key.kind(), ValueKind::Collection(_)) {
        return Err(DecodeError::CompositeKey);
    }
    let not_found = DecodeError::KeyNotFound {
        offset: map.header_offset(),
    };
    if map.is_empty() {
        return Err(not_found);
    }

    let message = map.message();
    let pairs = map.len();
    let mut candidate = element_at(message, map.first_child())?;
    for pair in 0..pairs {
        if candidate.key_eq(key) {
            trace!(
                "find_in_map: key matched at offset {}",
                candidate.header_offset()
            );
            return skip(message, candidate, 1);
        }
        if pair + 1 < pairs {
            candidate = skip(message, candidate, 2)?;
        }
    }
    debug!(
        "find_in_map: {} key not found among {pairs} pairs at offset {}",
        key.tag(),
        map.header_offset()
    );
    Err(not_found)
}

fn expect_collection<'a>(value: &Value<'a>) -> Result<Collection<'a>, DecodeError> {
    value
        .as_collection()
        .ok_or(DecodeError::UnexpectedKind {
            offset: value.header_offset(),
            expected: "array or map",
            found: value.tag(),
        })
}

/// Header-inclusive encoded length of a collection value.
///
/// A collection that ends exactly at the end of the message is measured up
/// to the message end; every other skip failure is an error.
pub fn collection_size(value: &Value<'_>) -> Result<usize, DecodeError> {
    let col = expect_collection(value)?;
    let header = col.header_offset();
    let raw_len = col.raw_len();
    if raw_len == 0 {
        return Ok(col.first_child() - header);
    }

    let message = col.message();
    let first = element_at(message, col.first_child())?;
    match skip(message, first, raw_len) {
        Ok(end) => Ok(end.header_offset() - header),
        Err(DecodeError::EndOfMessage { .. }) => Ok(message.size() - header),
        Err(err) => Err(err),
    }
}

/// Encoded bytes of a collection value, ready to be copied elsewhere.
pub fn collection_bytes<'a>(value: &Value<'a>) -> Result<&'a [u8], DecodeError> {
    let col = expect_collection(value)?;
    let len = collection_size(value)?;
    col.message().slice(col.header_offset(), len)
}

#[cfg(test)]
mod tests {
    use super::{collection_bytes, collection_size, find_in_map, index_array};
    use crate::error::DecodeError;
    use crate::message::Message;
    use crate::value::{Collection, Value, ValueKind};

    fn root(bytes: &[u8]) -> Collection<'_> {
        Message::new(bytes)
            .element_at(0)
            .unwrap()
            .as_collection()
            .unwrap()
    }

    #[test]
    fn index_nested_elements() {
        // [{"a": 1}, [2, 3], "x"]
        let bytes = [
            0x93, 0x81, 0xa1, b'a', 0x01, 0x92, 0x02, 0x03, 0xa1, b'x',
        ];
        let array = root(&bytes);
        assert_eq!(index_array(&array, 0).unwrap().header_offset(), 1);
        assert_eq!(index_array(&array, 1).unwrap().header_offset(), 5);
        assert_eq!(index_array(&array, 2).unwrap().as_str(), Some("x"));
    }

    #[test]
    fn index_out_of_range() {
        let bytes = [0x91, 0x01];
        let err = index_array(&root(&bytes), 1).unwrap_err();
        assert_eq!(err, DecodeError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn index_rejects_map() {
        let bytes = [0x81, 0x01, 0x02];
        let err = index_array(&root(&bytes), 0).unwrap_err();
        assert_eq!(err, DecodeError::NotAnArray { offset: 0 });
    }

    #[test]
    fn find_skips_nested_values() {
        // {"a": [1, [2]], 7: nil, "b": true}
        let bytes = [
            0x83, 0xa1, b'a', 0x92, 0x01, 0x91, 0x02, 0x07, 0xc0, 0xa1, b'b', 0xc3,
        ];
        let map = root(&bytes);
        let hit = find_in_map(&map, &Value::str_key("b")).unwrap();
        assert_eq!(hit.as_bool(), Some(true));
        let hit = find_in_map(&map, &Value::detached(ValueKind::UInt8(7))).unwrap();
        assert!(hit.is_nil());
        let hit = find_in_map(&map, &Value::str_key("a")).unwrap();
        assert_eq!(hit.header_offset(), 3);
    }

    #[test]
    fn find_advances_past_mismatched_tags() {
        // {1: "one", "k": "v"}
        let bytes = [0x82, 0x01, 0xa3, b'o', b'n', b'e', 0xa1, b'k', 0xa1, b'v'];
        let hit = find_in_map(&root(&bytes), &Value::str_key("k")).unwrap();
        assert_eq!(hit.as_str(), Some("v"));
    }

    #[test]
    fn find_requires_same_numeric_tag() {
        let bytes = [0x81, 0x05, 0xc3];
        let err = find_in_map(&root(&bytes), &Value::detached(ValueKind::Int8(5))).unwrap_err();
        assert!(matches!(err, DecodeError::KeyNotFound { .. }));
    }

    #[test]
    fn find_rejects_composite_keys() {
        let bytes = [0x81, 0x90, 0x01, 0x01];
        let key_bytes = [0x90, 0x00];
        let key = Message::new(&key_bytes).element_at(0).unwrap();
        let err = find_in_map(&root(&bytes), &key).unwrap_err();
        assert_eq!(err, DecodeError::CompositeKey);
    }

    #[test]
    fn find_rejects_array() {
        let bytes = [0x91, 0x01];
        let err = find_in_map(&root(&bytes), &Value::str_key("a")).unwrap_err();
        assert_eq!(err, DecodeError::NotAMap { offset: 0 });
    }

    #[test]
    fn size_of_nested_collection() {
        // [[1, 2], 3]
        let bytes = [0x92, 0x92, 0x01, 0x02, 0x03];
        let message = Message::new(&bytes);
        let inner = message.element_at(1).unwrap();
        assert_eq!(collection_size(&inner), Ok(3));
        assert_eq!(collection_bytes(&inner).unwrap(), &[0x92, 0x01, 0x02]);
    }

    #[test]
    fn size_of_trailing_collection() {
        let bytes = [0x92, 0x01, 0xa2, b'h', b'i'];
        let value = Message::new(&bytes).element_at(0).unwrap();
        assert_eq!(collection_size(&value), Ok(5));
        assert_eq!(collection_bytes(&value).unwrap(), &bytes);
    }

    #[test]
    fn size_of_empty_collection() {
        let bytes = [0x91, 0xdc, 0x00, 0x00, 0x01];
        let value = Message::new(&bytes).element_at(1).unwrap();
        assert_eq!(collection_size(&value), Ok(3));
    }

    #[test]
    fn size_of_truncated_collection() {
        let bytes = [0x93, 0x01, 0x02];
        let value = Message::new(&bytes).element_at(0).unwrap();
        assert!(matches!(
            collection_size(&value),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn size_of_detached_collection_uses_its_own_header() {
        let bytes = [0x01, 0x01, 0x92, 0x01, 0x02];
        let decoded = Message::new(&bytes).element_at(2).unwrap();
        let detached = Value::detached(*decoded.kind());
        assert_eq!(detached.header_offset(), 0);
        assert_eq!(collection_size(&detached), Ok(3));
        assert_eq!(collection_size(&detached), collection_size(&decoded));
        assert_eq!(collection_bytes(&detached).unwrap(), &bytes[2..]);
    }

    #[test]
    fn size_of_scalar_fails() {
        let bytes = [0x01];
        let value = Message::new(&bytes).element_at(0).unwrap();
        assert!(matches!(
            collection_size(&value),
            Err(DecodeError::UnexpectedKind { found: "u8", .. })
        ));
    }
}
