//! MessagePack wire format primitives.
//!
//! The wire layer follows the same split as the rest of the decoder:
//! - `layout`: header code points, size tables and length-field widths
//! - `classify`: pure predicates mapping a header byte to its family
//! - `reader`: bounds-checked, big-endian scalar extraction
//!
//! Nothing in here knows about decoded values; `decode` builds on top.

pub mod classify;
pub mod layout;
pub mod reader;
