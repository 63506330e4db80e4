//! Zero-copy MessagePack decoding with random access.
//!
//! The engine decodes elements in place over a caller-owned buffer: header
//! classification and scalar extraction live in `wire`
//! (layout/classify/reader), single-element decoding in `decode`, and
//! traversal in `navigate`. Nothing is copied; blobs and collections borrow
//! from the [`Message`] they were decoded from.
//!
//! Invariants:
//! - Every read is bounds-checked against the message; truncated input
//!   yields a [`DecodeError`], never a panic or an out-of-range view.
//! - Skipping is iterative: nested collections are flattened into a single
//!   pending-element counter, so nesting depth never grows the call stack.
//! - Map keys match only on identical tags (no numeric coercion); array and
//!   map keys are unsupported.
//!
//! On top of the engine, `inspect` builds a deterministic structural
//! [`Report`] of a buffer, and `source` loads buffers from files.
//!
//! # Examples
//! ```
//! use mpkscan_core::{Message, Value};
//!
//! // {"x": [1, 2]}
//! let bytes = [0x81, 0xa1, b'x', 0x92, 0x01, 0x02];
//! let message = Message::new(&bytes);
//! let map = message.element_at(0)?.as_collection().unwrap();
//! let list = map.find(&Value::str_key("x"))?.as_collection().unwrap();
//! assert_eq!(list.index(1)?.as_u64(), Some(2));
//! # Ok::<(), mpkscan_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod decode;
mod error;
mod inspect;
mod message;
pub mod navigate;
mod source;
mod value;
pub mod wire;

pub use error::DecodeError;
pub use inspect::{
    DEFAULT_MAX_DEPTH, InspectError, InspectOptions, MAX_DEPTH_LIMIT, inspect_file, inspect_message,
};
pub use message::Message;
pub use source::{MessageFile, SourceError};
pub use value::{Blob, BlobKind, Collection, CollectionKind, Value, ValueKind};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Label used for buffers that did not come from a file.
pub const MEMORY_INPUT_LABEL: &str = "<memory>";

/// Structural report of one encoded buffer.
///
/// # Examples
/// ```
/// use mpkscan_core::{ElementSummary, make_stub_report};
///
/// let report = make_stub_report("doc.mpk", 1, ElementSummary::new(0, "nil", 1));
/// assert_eq!(report.report_version, mpkscan_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input buffer metadata.
    pub input: InputInfo,
    /// Path the root was resolved from, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Summary of the inspected element.
    pub root: ElementSummary,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided, or [`MEMORY_INPUT_LABEL`].
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// One element of the report tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSummary {
    /// Header offset in the buffer.
    pub offset: u64,
    /// Lower-case tag (`u8`, `f64`, `str`, `map`, ...).
    pub kind: String,
    /// Encoded length, header included.
    pub encoded_len: u64,
    /// Scalar value as text; short UTF-8 strings are included verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Blob byte length, or collection element count (pairs for maps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Extension subtype.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_type: Option<i8>,
    /// Array items, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ElementSummary>>,
    /// Map entries, in wire order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<PairSummary>>,
    /// Set when the depth limit stopped descent into this collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

impl ElementSummary {
    pub fn new(offset: u64, kind: impl Into<String>, encoded_len: u64) -> Self {
        Self {
            offset,
            kind: kind.into(),
            encoded_len,
            value: None,
            length: None,
            ext_type: None,
            items: None,
            pairs: None,
            truncated: None,
        }
    }
}

/// Key/value entry of a map summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub key: ElementSummary,
    pub value: ElementSummary,
}

/// Build a report shell with tool/input metadata filled in.
pub fn make_stub_report(input_path: &str, input_bytes: u64, root: ElementSummary) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mpkscan".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        path: None,
        root,
    }
}
