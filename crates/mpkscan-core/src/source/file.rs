use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::SourceError;
use crate::message::Message;

/// An encoded buffer loaded from disk.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use mpkscan_core::MessageFile;
///
/// let file = MessageFile::open(Path::new("doc.mpk"))?;
/// let root = file.message().element_at(0)?;
/// println!("root is {}", root.tag());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct MessageFile {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl MessageFile {
    /// # Errors
    /// Returns `SourceError::Io` when the file cannot be read and
    /// `SourceError::Empty` when it has no bytes.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(SourceError::Empty {
                path: path.display().to_string(),
            });
        }
        debug!("loaded {} bytes from {}", bytes.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn message(&self) -> Message<'_> {
        Message::new(&self.bytes)
    }
}
