//! Header byte classification.
//!
//! Every predicate is a pure function of one byte. Apart from the reserved
//! code point `0xc1`, each byte belongs to exactly one family; `classify`
//! is the total form of the predicates below.

use super::layout::*;

/// Format family of a header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    PositiveFixint,
    NegativeFixint,
    Nil,
    Bool,
    Float32,
    Float64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Str,
    Bin,
    Ext,
    Array,
    Map,
}

impl HeaderClass {
    pub fn is_blob(self) -> bool {
        matches!(self, HeaderClass::Str | HeaderClass::Bin | HeaderClass::Ext)
    }

    pub fn is_collection(self) -> bool {
        matches!(self, HeaderClass::Array | HeaderClass::Map)
    }
}

/// Classify a header byte. Returns `None` only for the reserved byte.
///
/// # Examples
/// ```
/// use mpkscan_core::wire::classify::{classify, HeaderClass};
///
/// assert_eq!(classify(0x05), Some(HeaderClass::PositiveFixint));
/// assert_eq!(classify(0x92), Some(HeaderClass::Array));
/// assert_eq!(classify(0xc1), None);
/// ```
pub fn classify(byte: u8) -> Option<HeaderClass> {
    let class = if is_positive_fixint(byte) {
        HeaderClass::PositiveFixint
    } else if is_negative_fixint(byte) {
        HeaderClass::NegativeFixint
    } else if is_str(byte) {
        HeaderClass::Str
    } else if is_bin(byte) {
        HeaderClass::Bin
    } else if is_ext(byte) {
        HeaderClass::Ext
    } else if is_array(byte) {
        HeaderClass::Array
    } else if is_map(byte) {
        HeaderClass::Map
    } else if is_nil(byte) {
        HeaderClass::Nil
    } else if is_bool(byte) {
        HeaderClass::Bool
    } else {
        match byte {
            FLOAT32 => HeaderClass::Float32,
            FLOAT64 => HeaderClass::Float64,
            UINT8 => HeaderClass::UInt8,
            UINT16 => HeaderClass::UInt16,
            UINT32 => HeaderClass::UInt32,
            UINT64 => HeaderClass::UInt64,
            INT8 => HeaderClass::Int8,
            INT16 => HeaderClass::Int16,
            INT32 => HeaderClass::Int32,
            INT64 => HeaderClass::Int64,
            _ => return None,
        }
    };
    Some(class)
}

pub fn is_positive_fixint(byte: u8) -> bool {
    byte & 0x80 == POSITIVE_FIXINT
}

pub fn is_negative_fixint(byte: u8) -> bool {
    byte & 0xe0 == NEGATIVE_FIXINT
}

pub fn is_fix_numeric(byte: u8) -> bool {
    is_positive_fixint(byte) || is_negative_fixint(byte)
}

pub fn is_fixmap(byte: u8) -> bool {
    byte & 0xf0 == FIXMAP
}

pub fn is_fixarray(byte: u8) -> bool {
    byte & 0xf0 == FIXARRAY
}

pub fn is_fixstr(byte: u8) -> bool {
    byte & 0xe0 == FIXSTR
}

pub fn is_fixext(byte: u8) -> bool {
    (FIXEXT1..=FIXEXT16).contains(&byte)
}

pub fn is_array(byte: u8) -> bool {
    is_fixarray(byte) || (ARRAY16..=ARRAY32).contains(&byte)
}

pub fn is_map(byte: u8) -> bool {
    is_fixmap(byte) || (MAP16..=MAP32).contains(&byte)
}

pub fn is_collection(byte: u8) -> bool {
    is_array(byte) || is_map(byte)
}

pub fn is_str(byte: u8) -> bool {
    is_fixstr(byte) || (STR8..=STR32).contains(&byte)
}

pub fn is_bin(byte: u8) -> bool {
    (BIN8..=BIN32).contains(&byte)
}

pub fn is_ext(byte: u8) -> bool {
    is_fixext(byte) || (EXT8..=EXT32).contains(&byte)
}

pub fn is_blob(byte: u8) -> bool {
    is_str(byte) || is_bin(byte) || is_ext(byte)
}

pub fn is_numeric(byte: u8) -> bool {
    is_fix_numeric(byte) || (FLOAT32..=INT64).contains(&byte)
}

pub fn is_nil(byte: u8) -> bool {
    byte == NIL
}

pub fn is_bool(byte: u8) -> bool {
    byte == TRUE || byte == FALSE
}
