use crate::error::DecodeError;
use crate::message::Message;
use crate::value::{BlobKind, Collection, CollectionKind, Value, ValueKind};
use crate::wire::layout;
use crate::{ElementSummary, PairSummary};

/// Longest `str` payload copied into a summary.
const MAX_TEXT_PREVIEW: usize = 64;

/// A collection whose children are being summarized.
///
/// Children are located from the previous sibling's end, so each byte of an
/// expanded collection is visited once.
struct Frame<'a> {
    summary: ElementSummary,
    message: Message<'a>,
    kind: CollectionKind,
    child_depth: usize,
    next_offset: usize,
    remaining: u64,
    items: Vec<ElementSummary>,
    pairs: Vec<PairSummary>,
    key: Option<ElementSummary>,
}

impl<'a> Frame<'a> {
    fn new(summary: ElementSummary, col: &Collection<'a>, child_depth: usize) -> Self {
        // Declared counts are untrusted; grow as children arrive.
        Self {
            summary,
            message: col.message(),
            kind: col.kind(),
            child_depth,
            next_offset: col.first_child(),
            remaining: col.raw_len(),
            items: Vec::new(),
            pairs: Vec::new(),
            key: None,
        }
    }

    fn next_child(&mut self) -> Result<Option<Value<'a>>, DecodeError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.message.element_at(self.next_offset).map(Some)
    }

    fn accept(&mut self, child: ElementSummary) {
        self.next_offset = (child.offset + child.encoded_len) as usize;
        match self.kind {
            CollectionKind::Array => self.items.push(child),
            CollectionKind::Map => match self.key.take() {
                Some(key) => self.pairs.push(PairSummary { key, value: child }),
                None => self.key = Some(child),
            },
        }
    }

    fn finish(self) -> ElementSummary {
        let mut summary = self.summary;
        summary.encoded_len = self.next_offset as u64 - summary.offset;
        match self.kind {
            CollectionKind::Array => summary.items = Some(self.items),
            CollectionKind::Map => summary.pairs = Some(self.pairs),
        }
        summary
    }
}

enum Opened<'a> {
    Done(ElementSummary),
    Expand(Frame<'a>),
}

/// Summarize `value`, expanding at most `depth` collection levels below it.
///
/// Descent uses an explicit frame stack; nesting costs heap, not call stack.
pub(super) fn summarize<'a>(
    message: Message<'a>,
    value: &Value<'a>,
    depth: usize,
) -> Result<ElementSummary, DecodeError> {
    let mut root = match open(message, value, depth)? {
        Opened::Done(summary) => return Ok(summary),
        Opened::Expand(frame) => frame,
    };
    let mut stack: Vec<Frame<'a>> = Vec::new();

    loop {
        let frame = stack.last_mut().unwrap_or(&mut root);
        match frame.next_child()? {
            Some(child) => match open(message, &child, frame.child_depth)? {
                Opened::Done(summary) => frame.accept(summary),
                Opened::Expand(nested) => stack.push(nested),
            },
            None => match stack.pop() {
                Some(done) => {
                    let summary = done.finish();
                    stack.last_mut().unwrap_or(&mut root).accept(summary);
                }
                None => return Ok(root.finish()),
            },
        }
    }
}

/// Summarize a leaf or a collection that will not be expanded; otherwise
/// return a frame for its children.
fn open<'a>(
    message: Message<'a>,
    value: &Value<'a>,
    depth: usize,
) -> Result<Opened<'a>, DecodeError> {
    let offset = value.header_offset();
    let mut summary = ElementSummary::new(offset as u64, value.tag(), 0);

    match value.kind() {
        ValueKind::UInt8(v) => summary.value = Some(v.to_string()),
        ValueKind::UInt16(v) => summary.value = Some(v.to_string()),
        ValueKind::UInt32(v) => summary.value = Some(v.to_string()),
        ValueKind::UInt64(v) => summary.value = Some(v.to_string()),
        ValueKind::Int8(v) => summary.value = Some(v.to_string()),
        ValueKind::Int16(v) => summary.value = Some(v.to_string()),
        ValueKind::Int32(v) => summary.value = Some(v.to_string()),
        ValueKind::Int64(v) => summary.value = Some(v.to_string()),
        ValueKind::Float32(v) => summary.value = Some(v.to_string()),
        ValueKind::Float64(v) => summary.value = Some(v.to_string()),
        ValueKind::Bool(v) => summary.value = Some(v.to_string()),
        ValueKind::Nil => {}
        ValueKind::Blob(blob) => {
            summary.encoded_len = (blob.end_offset() - offset) as u64;
            summary.length = Some(blob.len());
            if let BlobKind::Ext(subtype) = blob.kind() {
                summary.ext_type = Some(subtype);
            }
            summary.value = blob
                .as_str()
                .filter(|text| text.len() <= MAX_TEXT_PREVIEW)
                .map(str::to_string);
            return Ok(Opened::Done(summary));
        }
        ValueKind::Collection(col) => {
            summary.length = Some(col.len());
            if col.is_empty() {
                summary.encoded_len = (col.first_child() - offset) as u64;
                match col.kind() {
                    CollectionKind::Array => summary.items = Some(Vec::new()),
                    CollectionKind::Map => summary.pairs = Some(Vec::new()),
                }
                return Ok(Opened::Done(summary));
            }
            if depth == 0 {
                summary.encoded_len = value.collection_size()? as u64;
                summary.truncated = Some(true);
                return Ok(Opened::Done(summary));
            }
            return Ok(Opened::Expand(Frame::new(summary, col, depth - 1)));
        }
    }

    let byte = message.byte_at(offset)?;
    let len = layout::static_size(byte).ok_or(DecodeError::ReservedHeader { offset, byte })?;
    summary.encoded_len = len as u64;
    Ok(Opened::Done(summary))
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::error::DecodeError;
    use crate::message::Message;

    fn summary_of(bytes: &[u8], depth: usize) -> crate::ElementSummary {
        let message = Message::new(bytes);
        let root = message.element_at(0).unwrap();
        summarize(message, &root, depth).unwrap()
    }

    #[test]
    fn summarize_map_pairs() {
        // {"k": -1, 2: "v"}
        let bytes = [0x82, 0xa1, b'k', 0xff, 0x02, 0xa1, b'v'];
        let summary = summary_of(&bytes, 4);
        assert_eq!(summary.kind, "map");
        assert_eq!(summary.length, Some(2));
        assert_eq!(summary.encoded_len, 7);
        let pairs = summary.pairs.unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].key.value.as_deref(), Some("k"));
        assert_eq!(pairs[0].value.kind, "i8");
        assert_eq!(pairs[0].value.value.as_deref(), Some("-1"));
        assert_eq!(pairs[1].key.kind, "u8");
        assert_eq!(pairs[1].value.offset, 5);
    }

    #[test]
    fn summarize_depth_limit_truncates() {
        // [[1]]
        let bytes = [0x91, 0x91, 0x01];
        let summary = summary_of(&bytes, 1);
        let items = summary.items.unwrap();
        assert_eq!(items[0].truncated, Some(true));
        assert!(items[0].items.is_none());
        assert_eq!(items[0].encoded_len, 2);
        assert_eq!(summary.encoded_len, 3);
    }

    #[test]
    fn summarize_ext_and_bin() {
        // [fixext1(type 3, 0xaa), bin8 [1, 2]]
        let bytes = [0x92, 0xd4, 0x03, 0xaa, 0xc4, 0x02, 0x01, 0x02];
        let items = summary_of(&bytes, 2).items.unwrap();
        assert_eq!(items[0].kind, "ext");
        assert_eq!(items[0].ext_type, Some(3));
        assert_eq!(items[0].length, Some(1));
        assert_eq!(items[0].encoded_len, 3);
        assert_eq!(items[1].kind, "bin");
        assert!(items[1].value.is_none());
        assert_eq!(items[1].encoded_len, 4);
    }

    #[test]
    fn summarize_long_string_has_no_preview() {
        let mut bytes = vec![0xd9, 70];
        bytes.extend(std::iter::repeat_n(b'a', 70));
        let summary = summary_of(&bytes, 0);
        assert_eq!(summary.length, Some(70));
        assert!(summary.value.is_none());
        assert_eq!(summary.encoded_len, 72);
    }

    #[test]
    fn summarize_sizes_come_from_children() {
        // [[1, [2, 3]], {"a": []}, 4]
        let bytes = [
            0x93, 0x92, 0x01, 0x92, 0x02, 0x03, 0x81, 0xa1, b'a', 0x90, 0x04,
        ];
        let summary = summary_of(&bytes, 8);
        assert_eq!(summary.encoded_len, 11);
        let items = summary.items.unwrap();
        assert_eq!(items[0].encoded_len, 5);
        assert_eq!(items[0].items.as_ref().unwrap()[1].encoded_len, 3);
        assert_eq!(items[1].offset, 6);
        assert_eq!(items[1].encoded_len, 4);
        let pairs = items[1].pairs.as_ref().unwrap();
        assert_eq!(pairs[0].value.items, Some(Vec::new()));
        assert_eq!(items[2].offset, 10);
        assert_eq!(items[2].value.as_deref(), Some("4"));
    }

    #[test]
    fn summarize_truncated_collection_fails() {
        let bytes = [0x93, 0x01, 0x02];
        let message = Message::new(&bytes);
        let root = message.element_at(0).unwrap();
        assert!(matches!(
            summarize(message, &root, 4),
            Err(DecodeError::OutOfBounds { offset: 3, .. })
        ));
    }

    #[test]
    fn summarize_deep_nesting_without_recursion() {
        const LEVELS: usize = 200_000;
        let mut bytes = vec![0x91; LEVELS];
        bytes.push(0x01);
        let message = Message::new(&bytes);
        let root = message.element_at(0).unwrap();

        let summary = summarize(message, &root, 64).unwrap();
        assert_eq!(summary.encoded_len, LEVELS as u64 + 1);

        let mut node = &summary;
        let mut levels = 0;
        while let Some(items) = node.items.as_ref() {
            node = &items[0];
            levels += 1;
        }
        assert_eq!(levels, 64);
        assert_eq!(node.truncated, Some(true));
        assert_eq!(node.encoded_len, (LEVELS - 64) as u64 + 1);
    }
}
