//! Buffer sources.
//!
//! The decoder itself never performs I/O; sources load whole buffers into
//! memory and hand out [`Message`](crate::Message) views over them.

mod file;

pub use file::MessageFile;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is empty: {path}")]
    Empty { path: String },
}
