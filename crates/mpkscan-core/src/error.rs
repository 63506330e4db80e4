use thiserror::Error;

/// Decode failures returned by every fallible operation in the engine.
///
/// All variants are the same kind of failure from a caller's perspective: the
/// requested element could not be produced from the message. The variants
/// exist so that reports and logs can say *why*.
///
/// # Examples
/// ```
/// use mpkscan_core::DecodeError;
///
/// let err = DecodeError::OutOfBounds { offset: 4, needed: 2, size: 5 };
/// assert!(err.to_string().contains("out of bounds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("read out of bounds at offset {offset}: need {needed} bytes, message has {size}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        size: usize,
    },
    #[error("message ended at offset {offset} with {remaining} elements left to skip")]
    Truncated { offset: usize, remaining: u64 },
    #[error("skip ended exactly at the end of the message (offset {offset})")]
    EndOfMessage { offset: usize },
    #[error("reserved header byte 0x{byte:02x} at offset {offset}")]
    ReservedHeader { offset: usize, byte: u8 },
    #[error("header byte 0x{byte:02x} at offset {offset} is not a str/bin/ext")]
    NotABlob { offset: usize, byte: u8 },
    #[error("header byte 0x{byte:02x} at offset {offset} is not an array/map")]
    NotACollection { offset: usize, byte: u8 },
    #[error("element at offset {offset} is {found}, expected {expected}")]
    UnexpectedKind {
        offset: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("element at offset {offset} is not an array")]
    NotAnArray { offset: usize },
    #[error("element at offset {offset} is not a map")]
    NotAMap { offset: usize },
    #[error("index {index} out of range for array of {len} elements")]
    IndexOutOfRange { index: usize, len: u32 },
    #[error("array and map keys are not supported")]
    CompositeKey,
    #[error("key not found in map at offset {offset}")]
    KeyNotFound { offset: usize },
    #[error("element count overflow at offset {offset}")]
    CountOverflow { offset: usize },
}

impl DecodeError {
    /// Stable, short identifier used in reports and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::OutOfBounds { .. } => "MPK-OUT-OF-BOUNDS",
            DecodeError::Truncated { .. } => "MPK-TRUNCATED",
            DecodeError::EndOfMessage { .. } => "MPK-END-OF-MESSAGE",
            DecodeError::ReservedHeader { .. } => "MPK-RESERVED-HEADER",
            DecodeError::NotABlob { .. } => "MPK-NOT-A-BLOB",
            DecodeError::NotACollection { .. } => "MPK-NOT-A-COLLECTION",
            DecodeError::UnexpectedKind { .. } => "MPK-UNEXPECTED-KIND",
            DecodeError::NotAnArray { .. } => "MPK-NOT-AN-ARRAY",
            DecodeError::NotAMap { .. } => "MPK-NOT-A-MAP",
            DecodeError::IndexOutOfRange { .. } => "MPK-INDEX-OUT-OF-RANGE",
            DecodeError::CompositeKey => "MPK-COMPOSITE-KEY",
            DecodeError::KeyNotFound { .. } => "MPK-KEY-NOT-FOUND",
            DecodeError::CountOverflow { .. } => "MPK-COUNT-OVERFLOW",
        }
    }
}
