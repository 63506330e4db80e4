use crate::error::DecodeError;
use crate::value::Value;

/// Read-only view over an encoded buffer.
///
/// The decoder never copies or mutates the bytes; every value decoded from a
/// message borrows from it for `'a`.
///
/// # Examples
/// ```
/// use mpkscan_core::Message;
///
/// let message = Message::new(&[0x92, 0x01, 0x02]);
/// assert_eq!(message.size(), 3);
/// let root = message.element_at(0)?;
/// assert_eq!(root.header_offset(), 0);
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    bytes: &'a [u8],
}

impl<'a> Message<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Decode the element whose header starts at `offset`.
    pub fn element_at(&self, offset: usize) -> Result<Value<'a>, DecodeError> {
        crate::decode::element_at(*self, offset)
    }

    pub(crate) fn byte_at(&self, offset: usize) -> Result<u8, DecodeError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(DecodeError::OutOfBounds {
                offset,
                needed: 1,
                size: self.bytes.len(),
            })
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], DecodeError> {
        let out_of_bounds = DecodeError::OutOfBounds {
            offset,
            needed: len,
            size: self.bytes.len(),
        };
        let end = offset.checked_add(len).ok_or(out_of_bounds.clone())?;
        self.bytes.get(offset..end).ok_or(out_of_bounds)
    }
}

impl<'a> From<&'a [u8]> for Message<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
