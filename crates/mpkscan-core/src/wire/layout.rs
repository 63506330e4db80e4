pub const POSITIVE_FIXINT: u8 = 0x00;
pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;
pub const NIL: u8 = 0xc0;
pub const RESERVED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;
pub const NEGATIVE_FIXINT: u8 = 0xe0;

/// Header byte length. Every element starts with exactly one.
pub const HEADER_LEN: usize = 1;
/// Extension subtype byte following an ext length field.
pub const EXT_TYPE_LEN: usize = 1;

pub const FIXSTR_LEN_MASK: u8 = 0x1f;
pub const FIXCOL_LEN_MASK: u8 = 0x0f;

/// Payload lengths of fixext1..fixext16, indexed by `byte - FIXEXT1`.
pub const FIXEXT_SIZES: [u32; 5] = [1, 2, 4, 8, 16];

/// Encoded size (header included) of elements whose size is fully determined
/// by their header byte. Returns `None` for blobs and collections, and for the
/// reserved code point.
///
/// # Examples
/// ```
/// use mpkscan_core::wire::layout::{static_size, UINT16};
///
/// assert_eq!(static_size(0x05), Some(1));
/// assert_eq!(static_size(UINT16), Some(3));
/// assert_eq!(static_size(0xa3), None);
/// ```
pub fn static_size(byte: u8) -> Option<usize> {
    match byte {
        0x00..=0x7f | NEGATIVE_FIXINT..=0xff | NIL | FALSE | TRUE => Some(HEADER_LEN),
        UINT8 | INT8 => Some(HEADER_LEN + 1),
        UINT16 | INT16 => Some(HEADER_LEN + 2),
        UINT32 | INT32 | FLOAT32 => Some(HEADER_LEN + 4),
        UINT64 | INT64 | FLOAT64 => Some(HEADER_LEN + 8),
        _ => None,
    }
}

/// Width in bytes of the explicit length field that follows a blob or
/// collection header. Fix variants and non-length headers return 0.
pub fn length_field_width(byte: u8) -> usize {
    match byte {
        BIN8 | EXT8 | STR8 => 1,
        BIN16 | EXT16 | STR16 | ARRAY16 | MAP16 => 2,
        BIN32 | EXT32 | STR32 | ARRAY32 | MAP32 => 4,
        _ => 0,
    }
}
