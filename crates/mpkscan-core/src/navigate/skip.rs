use log::trace;

use crate::decode::element_at;
use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{Value, ValueKind};
use crate::wire::layout;

/// Advance `cursor` past `count` sibling elements and decode the element
/// that follows.
///
/// Collections are never jumped over directly: the cursor moves to the first
/// child and the remaining count grows by the collection's raw element count.
/// Nesting depth therefore costs no stack, only iterations.
///
/// When the final step lands exactly on the end of the message the skip
/// fails with [`DecodeError::EndOfMessage`]; landing there with elements
/// still pending fails with [`DecodeError::Truncated`].
///
/// `cursor` must have been decoded from `message`: a scalar cursor sitting
/// on a blob, collection or reserved header is rejected.
///
/// # Examples
/// ```
/// use mpkscan_core::{Message, navigate::skip};
///
/// let message = Message::new(&[0x92, 0x91, 0x01, 0x02]);
/// let outer = message.element_at(0)?.as_collection().unwrap();
/// let inner = message.element_at(outer.first_child())?;
/// let second = skip(message, inner, 1)?;
/// assert_eq!(second.as_u64(), Some(2));
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
pub fn skip<'a>(
    message: Message<'a>,
    cursor: Value<'a>,
    count: u64,
) -> Result<Value<'a>, DecodeError> {
    let size = message.size();
    let mut cursor = cursor;
    let mut remaining = count;
    trace!(
        "skip: {count} elements from offset {}",
        cursor.header_offset()
    );

    while remaining != 0 {
        let offset = cursor.header_offset();
        let header = message.byte_at(offset)?;
        let next = if let Some(len) = layout::static_size(header) {
            offset + len
        } else {
            match cursor.kind() {
                ValueKind::Blob(blob) => blob.end_offset(),
                ValueKind::Collection(col) => {
                    remaining = remaining
                        .checked_add(col.raw_len())
                        .ok_or(DecodeError::CountOverflow { offset })?;
                    col.first_child()
                }
                // Only a cursor decoded from another message lands here.
                _ if header == layout::RESERVED => {
                    return Err(DecodeError::ReservedHeader {
                        offset,
                        byte: header,
                    });
                }
                _ => {
                    return Err(DecodeError::UnexpectedKind {
                        offset,
                        expected: "str, bin, ext, array or map",
                        found: cursor.tag(),
                    });
                }
            }
        };
        remaining -= 1;

        if next >= size {
            trace!("skip: reached end of message with {remaining} left");
            return Err(if remaining == 0 {
                DecodeError::EndOfMessage { offset: next }
            } else {
                DecodeError::Truncated {
                    offset: next,
                    remaining,
                }
            });
        }
        cursor = element_at(message, next)?;
    }

    Ok(cursor)
}
