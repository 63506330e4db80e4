use crate::error::DecodeError;
use crate::message::Message;

/// Semantic tag of a blob payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Str,
    Bin,
    /// Extension payload with its application-defined subtype.
    Ext(i8),
}

/// A decoded str/bin/ext payload borrowed from its message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob<'a> {
    data_offset: usize,
    data: &'a [u8],
    kind: BlobKind,
}

impl<'a> Blob<'a> {
    pub(crate) fn new(data_offset: usize, data: &'a [u8], kind: BlobKind) -> Self {
        Self {
            data_offset,
            data,
            kind,
        }
    }

    /// Offset of the first payload byte.
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    /// Payload length in bytes.
    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn kind(&self) -> BlobKind {
        self.kind
    }

    /// Offset one past the last payload byte.
    pub fn end_offset(&self) -> usize {
        self.data_offset + self.data.len()
    }

    /// Payload as UTF-8, for `str` blobs holding valid text.
    pub fn as_str(&self) -> Option<&'a str> {
        match self.kind {
            BlobKind::Str => std::str::from_utf8(self.data).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Array,
    Map,
}

/// A decoded array or map header.
///
/// `len` counts logical elements: array items, or key/value pairs for maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collection<'a> {
    message: Message<'a>,
    header: usize,
    first_child: usize,
    len: u32,
    kind: CollectionKind,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(
        message: Message<'a>,
        header: usize,
        first_child: usize,
        len: u32,
        kind: CollectionKind,
    ) -> Self {
        Self {
            message,
            header,
            first_child,
            len,
            kind,
        }
    }

    pub fn message(&self) -> Message<'a> {
        self.message
    }

    /// Offset of the collection's own header.
    pub fn header_offset(&self) -> usize {
        self.header
    }

    /// Offset of the first child element's header.
    pub fn first_child(&self) -> usize {
        self.first_child
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Number of raw elements the children occupy; map pairs count twice.
    pub fn raw_len(&self) -> u64 {
        match self.kind {
            CollectionKind::Array => u64::from(self.len),
            CollectionKind::Map => u64::from(self.len) * 2,
        }
    }

    /// Element at `index` of an array.
    pub fn index(&self, index: usize) -> Result<Value<'a>, DecodeError> {
        crate::navigate::index_array(self, index)
    }

    /// Value stored under `key` in a map.
    pub fn find(&self, key: &Value<'_>) -> Result<Value<'a>, DecodeError> {
        crate::navigate::find_in_map(self, key)
    }

    /// Iterate the raw children in wire order.
    pub fn elements(&self) -> crate::navigate::Elements<'a> {
        crate::navigate::Elements::new(*self)
    }
}

/// Payload of a decoded element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind<'a> {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Nil,
    Blob(Blob<'a>),
    Collection(Collection<'a>),
}

impl ValueKind<'_> {
    /// Lower-case tag name used in reports.
    pub fn tag(&self) -> &'static str {
        match self {
            ValueKind::UInt8(_) => "u8",
            ValueKind::UInt16(_) => "u16",
            ValueKind::UInt32(_) => "u32",
            ValueKind::UInt64(_) => "u64",
            ValueKind::Int8(_) => "i8",
            ValueKind::Int16(_) => "i16",
            ValueKind::Int32(_) => "i32",
            ValueKind::Int64(_) => "i64",
            ValueKind::Float32(_) => "f32",
            ValueKind::Float64(_) => "f64",
            ValueKind::Bool(_) => "bool",
            ValueKind::Nil => "nil",
            ValueKind::Blob(blob) => match blob.kind() {
                BlobKind::Str => "str",
                BlobKind::Bin => "bin",
                BlobKind::Ext(_) => "ext",
            },
            ValueKind::Collection(col) => match col.kind() {
                CollectionKind::Array => "array",
                CollectionKind::Map => "map",
            },
        }
    }
}

/// One decoded element and the offset of its header.
///
/// The header offset doubles as the traversal cursor for skipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value<'a> {
    header: usize,
    kind: ValueKind<'a>,
}

impl<'a> Value<'a> {
    pub(crate) fn new(header: usize, kind: ValueKind<'a>) -> Self {
        Self { header, kind }
    }

    /// A lookup key that does not live in any message.
    ///
    /// # Examples
    /// ```
    /// use mpkscan_core::{Message, Value, ValueKind};
    ///
    /// let message = Message::new(&[0x81, 0x07, 0xa1, b'z']);
    /// let map = message.element_at(0)?.as_collection().unwrap();
    /// let hit = map.find(&Value::detached(ValueKind::UInt8(7)))?;
    /// assert_eq!(hit.as_str(), Some("z"));
    /// # Ok::<(), mpkscan_core::DecodeError>(())
    /// ```
    pub fn detached(kind: ValueKind<'a>) -> Self {
        Self { header: 0, kind }
    }

    /// A `str` lookup key over caller-owned text.
    pub fn str_key(key: &'a str) -> Self {
        Self::detached(ValueKind::Blob(Blob::new(0, key.as_bytes(), BlobKind::Str)))
    }

    pub fn header_offset(&self) -> usize {
        self.header
    }

    pub fn kind(&self) -> &ValueKind<'a> {
        &self.kind
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn as_blob(&self) -> Option<Blob<'a>> {
        match self.kind {
            ValueKind::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<Collection<'a>> {
        match self.kind {
            ValueKind::Collection(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_blob().and_then(|blob| blob.as_str())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.kind, ValueKind::Nil)
    }

    /// Unsigned integer payload widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self.kind {
            ValueKind::UInt8(v) => Some(u64::from(v)),
            ValueKind::UInt16(v) => Some(u64::from(v)),
            ValueKind::UInt32(v) => Some(u64::from(v)),
            ValueKind::UInt64(v) => Some(v),
            _ => None,
        }
    }

    /// Signed integer payload widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Int8(v) => Some(i64::from(v)),
            ValueKind::Int16(v) => Some(i64::from(v)),
            ValueKind::Int32(v) => Some(i64::from(v)),
            ValueKind::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Float32(v) => Some(f64::from(v)),
            ValueKind::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Header-inclusive encoded length of a collection.
    pub fn collection_size(&self) -> Result<usize, DecodeError> {
        crate::navigate::collection_size(self)
    }

    /// The encoded bytes of a collection, header through last child.
    pub fn raw_bytes(&self) -> Result<&'a [u8], DecodeError> {
        crate::navigate::collection_bytes(self)
    }

    /// Key equality for map lookup: same tag, same payload.
    ///
    /// Numeric keys never match across widths or signedness, and floats
    /// compare with IEEE semantics (NaN matches nothing).
    pub fn key_eq(&self, other: &Value<'_>) -> bool {
        match (&self.kind, &other.kind) {
            (ValueKind::UInt8(a), ValueKind::UInt8(b)) => a == b,
            (ValueKind::UInt16(a), ValueKind::UInt16(b)) => a == b,
            (ValueKind::UInt32(a), ValueKind::UInt32(b)) => a == b,
            (ValueKind::UInt64(a), ValueKind::UInt64(b)) => a == b,
            (ValueKind::Int8(a), ValueKind::Int8(b)) => a == b,
            (ValueKind::Int16(a), ValueKind::Int16(b)) => a == b,
            (ValueKind::Int32(a), ValueKind::Int32(b)) => a == b,
            (ValueKind::Int64(a), ValueKind::Int64(b)) => a == b,
            (ValueKind::Float32(a), ValueKind::Float32(b)) => a == b,
            (ValueKind::Float64(a), ValueKind::Float64(b)) => a == b,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Nil, ValueKind::Nil) => true,
            (ValueKind::Blob(a), ValueKind::Blob(b)) => {
                a.kind() == b.kind() && a.data() == b.data()
            }
            _ => false,
        }
    }
}
