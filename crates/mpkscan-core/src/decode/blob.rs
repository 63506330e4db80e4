use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{Blob, BlobKind};
use crate::wire::classify::{is_bin, is_ext, is_fixext, is_fixstr, is_str};
use crate::wire::layout;
use crate::wire::reader::MessageReader;

/// Parse the str/bin/ext header at `offset` and borrow its payload.
///
/// Fails when the header is not a blob, when the length field or the ext
/// subtype byte runs past the message, or when the payload does.
///
/// # Examples
/// ```
/// use mpkscan_core::{Message, decode::parse_blob};
///
/// let message = Message::new(&[0xa3, b'a', b'b', b'c']);
/// let blob = parse_blob(message, 0)?;
/// assert_eq!(blob.data(), b"abc");
/// assert_eq!(blob.data_offset(), 1);
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
pub fn parse_blob(message: Message<'_>, offset: usize) -> Result<Blob<'_>, DecodeError> {
    let reader = MessageReader::new(message);
    let byte = reader.header(offset)?;
    if !(is_str(byte) || is_bin(byte) || is_ext(byte)) {
        return Err(DecodeError::NotABlob { offset, byte });
    }

    let (len, width) = if is_fixstr(byte) {
        (u32::from(byte & layout::FIXSTR_LEN_MASK), 0)
    } else if is_fixext(byte) {
        (layout::FIXEXT_SIZES[usize::from(byte - layout::FIXEXT1)], 0)
    } else {
        let width = layout::length_field_width(byte);
        (reader.read_length(offset, width)?, width)
    };

    let mut data_offset = offset + layout::HEADER_LEN + width;
    let kind = if is_str(byte) {
        BlobKind::Str
    } else if is_bin(byte) {
        BlobKind::Bin
    } else {
        let subtype = message.byte_at(data_offset)? as i8;
        data_offset += layout::EXT_TYPE_LEN;
        BlobKind::Ext(subtype)
    };

    let data = message.slice(data_offset, len as usize)?;
    Ok(Blob::new(data_offset, data, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_blob;
    use crate::error::DecodeError;
    use crate::message::Message;
    use crate::value::BlobKind;

    #[test]
    fn parse_fixstr() {
        let bytes = [0xa3, b'a', b'b', b'c'];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert_eq!(blob.kind(), BlobKind::Str);
        assert_eq!(blob.len(), 3);
        assert_eq!(blob.as_str(), Some("abc"));
        assert_eq!(blob.end_offset(), 4);
    }

    #[test]
    fn parse_empty_str_at_end() {
        let bytes = [0xa0];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert!(blob.is_empty());
        assert_eq!(blob.data_offset(), 1);
    }

    #[test]
    fn parse_bin16() {
        let bytes = [0xc5, 0x00, 0x02, 0xaa, 0xbb];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert_eq!(blob.kind(), BlobKind::Bin);
        assert_eq!(blob.data(), &[0xaa, 0xbb]);
        assert_eq!(blob.data_offset(), 3);
    }

    #[test]
    fn parse_str8() {
        let bytes = [0xd9, 0x01, b'z'];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert_eq!(blob.as_str(), Some("z"));
    }

    #[test]
    fn parse_fixext_reads_subtype() {
        let bytes = [0xd5, 0xff, 0x10, 0x20];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert_eq!(blob.kind(), BlobKind::Ext(-1));
        assert_eq!(blob.data(), &[0x10, 0x20]);
        assert_eq!(blob.data_offset(), 2);
    }

    #[test]
    fn parse_ext8_reads_subtype_after_length() {
        let bytes = [0xc7, 0x01, 0x05, 0x42];
        let blob = parse_blob(Message::new(&bytes), 0).unwrap();
        assert_eq!(blob.kind(), BlobKind::Ext(5));
        assert_eq!(blob.data(), &[0x42]);
        assert_eq!(blob.data_offset(), 3);
    }

    #[test]
    fn parse_truncated_payload() {
        let bytes = [0xa3, b'a', b'b'];
        let err = parse_blob(Message::new(&bytes), 0).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { .. }));
    }

    #[test]
    fn parse_truncated_length_field() {
        let bytes = [0xda, 0x00];
        let err = parse_blob(Message::new(&bytes), 0).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { offset: 1, .. }));
    }

    #[test]
    fn parse_missing_ext_subtype() {
        let bytes = [0xd4];
        assert!(parse_blob(Message::new(&bytes), 0).is_err());
    }

    #[test]
    fn parse_non_blob() {
        let bytes = [0x92, 0x01, 0x02];
        let err = parse_blob(Message::new(&bytes), 0).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NotABlob {
                offset: 0,
                byte: 0x92,
            }
        );
    }
}
