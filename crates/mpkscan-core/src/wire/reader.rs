use super::layout;
use crate::error::DecodeError;
use crate::message::Message;

/// Fold a big-endian byte run (at most 8 bytes) into a host-order bit pattern.
///
/// The result is only meaningful once reinterpreted at the run's width.
///
/// # Examples
/// ```
/// use mpkscan_core::wire::reader::be_bits;
///
/// assert_eq!(be_bits(&[0x01, 0x02]), 0x0102);
/// assert_eq!(be_bits(&[]), 0);
/// ```
pub fn be_bits(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Bounds-checked scalar extraction over a message.
///
/// Every `read_*` method takes the offset of the element *header* and reads
/// the fixed-width field immediately after it.
pub struct MessageReader<'a> {
    message: Message<'a>,
}

impl<'a> MessageReader<'a> {
    pub fn new(message: Message<'a>) -> Self {
        Self { message }
    }

    pub fn header(&self, offset: usize) -> Result<u8, DecodeError> {
        self.message.byte_at(offset)
    }

    /// The `width` bytes following the header at `header_offset`.
    pub fn field(&self, header_offset: usize, width: usize) -> Result<&'a [u8], DecodeError> {
        let start = header_offset
            .checked_add(layout::HEADER_LEN)
            .ok_or(DecodeError::OutOfBounds {
                offset: header_offset,
                needed: layout::HEADER_LEN + width,
                size: self.message.size(),
            })?;
        self.message.slice(start, width)
    }

    fn bits(&self, header_offset: usize, width: usize) -> Result<u64, DecodeError> {
        self.field(header_offset, width).map(be_bits)
    }

    pub fn read_positive_fixint(&self, offset: usize) -> Result<u8, DecodeError> {
        self.header(offset)
    }

    pub fn read_negative_fixint(&self, offset: usize) -> Result<i8, DecodeError> {
        self.header(offset).map(|byte| byte as i8)
    }

    pub fn read_u8(&self, header_offset: usize) -> Result<u8, DecodeError> {
        Ok(self.bits(header_offset, 1)? as u8)
    }

    pub fn read_u16(&self, header_offset: usize) -> Result<u16, DecodeError> {
        Ok(self.bits(header_offset, 2)? as u16)
    }

    pub fn read_u32(&self, header_offset: usize) -> Result<u32, DecodeError> {
        Ok(self.bits(header_offset, 4)? as u32)
    }

    pub fn read_u64(&self, header_offset: usize) -> Result<u64, DecodeError> {
        self.bits(header_offset, 8)
    }

    pub fn read_i8(&self, header_offset: usize) -> Result<i8, DecodeError> {
        Ok(self.bits(header_offset, 1)? as u8 as i8)
    }

    pub fn read_i16(&self, header_offset: usize) -> Result<i16, DecodeError> {
        Ok(self.bits(header_offset, 2)? as u16 as i16)
    }

    pub fn read_i32(&self, header_offset: usize) -> Result<i32, DecodeError> {
        Ok(self.bits(header_offset, 4)? as u32 as i32)
    }

    pub fn read_i64(&self, header_offset: usize) -> Result<i64, DecodeError> {
        Ok(self.bits(header_offset, 8)? as i64)
    }

    /// IEEE-754 bit reinterpretation, not a numeric conversion.
    pub fn read_f32(&self, header_offset: usize) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.bits(header_offset, 4)? as u32))
    }

    pub fn read_f64(&self, header_offset: usize) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.bits(header_offset, 8)?))
    }

    /// Unsigned length field of `width` bytes (1, 2 or 4) after the header.
    pub fn read_length(&self, header_offset: usize, width: usize) -> Result<u32, DecodeError> {
        match width {
            1 => self.read_u8(header_offset).map(u32::from),
            2 => self.read_u16(header_offset).map(u32::from),
            _ => self.read_u32(header_offset),
        }
    }
}
