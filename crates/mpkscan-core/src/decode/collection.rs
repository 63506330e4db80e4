use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{Collection, CollectionKind};
use crate::wire::classify::{is_array, is_fixarray, is_fixmap, is_map};
use crate::wire::layout;
use crate::wire::reader::MessageReader;

/// Parse the array/map header at `offset`.
///
/// The first-child offset must be addressable, so a collection header that
/// is the final byte of the message does not parse, even when it declares no
/// children.
///
/// # Examples
/// ```
/// use mpkscan_core::{CollectionKind, Message, decode::parse_collection};
///
/// let message = Message::new(&[0x82, 0x01, 0x02, 0x03, 0x04]);
/// let map = parse_collection(message, 0)?;
/// assert_eq!(map.kind(), CollectionKind::Map);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.raw_len(), 4);
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
pub fn parse_collection(
    message: Message<'_>,
    offset: usize,
) -> Result<Collection<'_>, DecodeError> {
    let reader = MessageReader::new(message);
    let byte = reader.header(offset)?;
    let kind = if is_array(byte) {
        CollectionKind::Array
    } else if is_map(byte) {
        CollectionKind::Map
    } else {
        return Err(DecodeError::NotACollection { offset, byte });
    };

    let (len, width) = if is_fixarray(byte) || is_fixmap(byte) {
        (u32::from(byte & layout::FIXCOL_LEN_MASK), 0)
    } else {
        let width = layout::length_field_width(byte);
        (reader.read_length(offset, width)?, width)
    };

    let first_child = offset + layout::HEADER_LEN + width;
    message.byte_at(first_child)?;
    Ok(Collection::new(message, offset, first_child, len, kind))
}
