use std::borrow::Cow;

use thiserror::Error;

use crate::decode::element_at;
use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{CollectionKind, Value};

/// One step of a path into nested collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment<'p> {
    /// Map lookup by `str` key.
    Key(Cow<'p, str>),
    /// Array index, or a map lookup by the index's decimal text.
    Index(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid escape in path segment '{segment}'")]
    InvalidEscape { segment: String },
}

/// Parse a `/`-separated path such as `/servers/0/name`.
///
/// The leading `/` is optional and the empty string is the root. `~1` and
/// `~0` unescape to `/` and `~`.
///
/// # Examples
/// ```
/// use mpkscan_core::navigate::{PathSegment, parse_path};
///
/// let path = parse_path("/servers/0/a~1b")?;
/// assert_eq!(path[1], PathSegment::Index(0));
/// assert_eq!(path[2], PathSegment::Key("a/b".into()));
/// # Ok::<(), mpkscan_core::navigate::PathError>(())
/// ```
pub fn parse_path(text: &str) -> Result<Vec<PathSegment<'_>>, PathError> {
    if text.is_empty() || text == "/" {
        return Ok(Vec::new());
    }
    let body = text.strip_prefix('/').unwrap_or(text);
    body.split('/').map(parse_segment).collect()
}

fn parse_segment(raw: &str) -> Result<PathSegment<'_>, PathError> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = raw.parse::<usize>() {
            return Ok(PathSegment::Index(index));
        }
    }
    if !raw.contains('~') {
        return Ok(PathSegment::Key(Cow::Borrowed(raw)));
    }

    let mut key = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            key.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => key.push('~'),
            Some('1') => key.push('/'),
            _ => {
                return Err(PathError::InvalidEscape {
                    segment: raw.to_string(),
                });
            }
        }
    }
    Ok(PathSegment::Key(Cow::Owned(key)))
}

/// Follow `path` from the element at `root_offset`.
pub fn resolve_path<'a>(
    message: Message<'a>,
    root_offset: usize,
    path: &[PathSegment<'_>],
) -> Result<Value<'a>, DecodeError> {
    let mut current = element_at(message, root_offset)?;
    for segment in path {
        let col = current
            .as_collection()
            .ok_or(DecodeError::UnexpectedKind {
                offset: current.header_offset(),
                expected: "array or map",
                found: current.tag(),
            })?;
        current = match (segment, col.kind()) {
            (PathSegment::Index(index), CollectionKind::Array) => col.index(*index)?,
            (PathSegment::Index(index), CollectionKind::Map) => {
                let text = index.to_string();
                col.find(&Value::str_key(&text))?
            }
            (PathSegment::Key(key), CollectionKind::Map) => col.find(&Value::str_key(key))?,
            (PathSegment::Key(_), CollectionKind::Array) => {
                return Err(DecodeError::NotAMap {
                    offset: col.header_offset(),
                });
            }
        };
    }
    Ok(current)
}
