use super::{parse_blob, parse_collection};
use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{Value, ValueKind};
use crate::wire::classify::{HeaderClass, classify};
use crate::wire::layout;
use crate::wire::reader::MessageReader;

/// Decode the single element whose header is at `offset`.
///
/// Positive fixints decode as `UInt8` and negative fixints as `Int8`.
///
/// # Examples
/// ```
/// use mpkscan_core::{Message, ValueKind, decode::element_at};
///
/// let message = Message::new(&[0xcc, 0xff]);
/// let value = element_at(message, 0)?;
/// assert_eq!(value.kind(), &ValueKind::UInt8(255));
/// # Ok::<(), mpkscan_core::DecodeError>(())
/// ```
pub fn element_at(message: Message<'_>, offset: usize) -> Result<Value<'_>, DecodeError> {
    let reader = MessageReader::new(message);
    let byte = reader.header(offset)?;
    let class = classify(byte).ok_or(DecodeError::ReservedHeader { offset, byte })?;

    let kind = match class {
        HeaderClass::Str | HeaderClass::Bin | HeaderClass::Ext => {
            ValueKind::Blob(parse_blob(message, offset)?)
        }
        HeaderClass::Array | HeaderClass::Map => {
            ValueKind::Collection(parse_collection(message, offset)?)
        }
        HeaderClass::Bool => ValueKind::Bool(byte == layout::TRUE),
        HeaderClass::Nil => ValueKind::Nil,
        HeaderClass::PositiveFixint => ValueKind::UInt8(reader.read_positive_fixint(offset)?),
        HeaderClass::NegativeFixint => ValueKind::Int8(reader.read_negative_fixint(offset)?),
        HeaderClass::UInt8 => ValueKind::UInt8(reader.read_u8(offset)?),
        HeaderClass::UInt16 => ValueKind::UInt16(reader.read_u16(offset)?),
        HeaderClass::UInt32 => ValueKind::UInt32(reader.read_u32(offset)?),
        HeaderClass::UInt64 => ValueKind::UInt64(reader.read_u64(offset)?),
        HeaderClass::Int8 => ValueKind::Int8(reader.read_i8(offset)?),
        HeaderClass::Int16 => ValueKind::Int16(reader.read_i16(offset)?),
        HeaderClass::Int32 => ValueKind::Int32(reader.read_i32(offset)?),
        HeaderClass::Int64 => ValueKind::Int64(reader.read_i64(offset)?),
        HeaderClass::Float32 => ValueKind::Float32(reader.read_f32(offset)?),
        HeaderClass::Float64 => ValueKind::Float64(reader.read_f64(offset)?),
    };

    Ok(Value::new(offset, kind))
}
