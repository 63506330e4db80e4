use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::error::DecodeError;
use crate::message::Message;
use crate::navigate::{PathError, parse_path, resolve_path};
use crate::source::{MessageFile, SourceError};
use crate::{MEMORY_INPUT_LABEL, Report, make_stub_report};

mod summary;

use summary::summarize;

/// Default limit on how many collection levels a report descends into.
pub const DEFAULT_MAX_DEPTH: usize = 16;
/// Largest accepted `max_depth`. Reports are trees, and serializing or
/// dropping them recurses once per level.
pub const MAX_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("max depth {requested} exceeds the limit of {limit}")]
    DepthLimit { requested: usize, limit: usize },
}

/// Inspection settings.
///
/// # Examples
/// ```
/// use mpkscan_core::InspectOptions;
///
/// let options = InspectOptions {
///     path: Some("/items/0".to_string()),
///     ..InspectOptions::default()
/// };
/// assert_eq!(options.max_depth, mpkscan_core::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Path (as accepted by `navigate::parse_path`) to the element to report.
    pub path: Option<String>,
    /// Collection levels to expand below the reported element.
    pub max_depth: usize,
    /// Input label written to the report.
    pub input_label: String,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            path: None,
            max_depth: DEFAULT_MAX_DEPTH,
            input_label: MEMORY_INPUT_LABEL.to_string(),
        }
    }
}

/// Load `path` and inspect its first element. The report's input label is
/// the file path.
pub fn inspect_file(path: &Path, options: &InspectOptions) -> Result<Report, InspectError> {
    let file = MessageFile::open(path)?;
    let options = InspectOptions {
        input_label: path.display().to_string(),
        ..options.clone()
    };
    inspect_message(file.message().bytes(), &options)
}

/// Inspect the element at `options.path` (or the root) of an encoded buffer.
///
/// # Examples
/// ```
/// use mpkscan_core::{InspectOptions, inspect_message};
///
/// let report = inspect_message(&[0x92, 0x01, 0x02], &InspectOptions::default())?;
/// assert_eq!(report.root.kind, "array");
/// assert_eq!(report.root.items.as_ref().map(Vec::len), Some(2));
/// # Ok::<(), mpkscan_core::InspectError>(())
/// ```
pub fn inspect_message(bytes: &[u8], options: &InspectOptions) -> Result<Report, InspectError> {
    if options.max_depth > MAX_DEPTH_LIMIT {
        return Err(InspectError::DepthLimit {
            requested: options.max_depth,
            limit: MAX_DEPTH_LIMIT,
        });
    }
    let message = Message::new(bytes);
    let path_text = options.path.as_deref().unwrap_or("");
    let segments = parse_path(path_text)?;
    debug!(
        "inspect: {} bytes, {} path segments, max depth {}",
        message.size(),
        segments.len(),
        options.max_depth
    );

    let target = resolve_path(message, 0, &segments)?;
    let root = summarize(message, &target, options.max_depth)?;

    let mut report = make_stub_report(&options.input_label, message.size() as u64, root);
    report.path = options.path.clone();
    Ok(report)
}
