//! Element decoding.
//!
//! `element_at` classifies a header byte and dispatches to the scalar reader
//! or to the blob/collection header parsers. Decoding never descends into
//! children; `navigate` handles traversal.

mod blob;
mod collection;
mod element;

pub use blob::parse_blob;
pub use collection::parse_collection;
pub use element::element_at;
