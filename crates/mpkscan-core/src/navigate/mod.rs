//! Traversal over decoded elements.
//!
//! Everything here is built on `skip`, which advances a decoded cursor past
//! sibling elements with an explicit work counter instead of recursion.
//! Array indexing, map lookup, collection sizing, child iteration and path
//! resolution are thin layers over it.

mod elements;
mod lookup;
mod path;
mod skip;

pub use elements::Elements;
pub use lookup::{collection_bytes, collection_size, find_in_map, index_array};
pub use path::{PathError, PathSegment, parse_path, resolve_path};
pub use skip::skip;
