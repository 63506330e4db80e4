use super::skip::skip;
use crate::decode::element_at;
use crate::error::DecodeError;
use crate::value::{Collection, Value};

/// Iterator over the raw children of a collection, in wire order.
///
/// Map children alternate key, value. Each step is one sibling skip, so nested
/// collections are passed over without recursion. Iteration stops after the
/// first error.
pub struct Elements<'a> {
    collection: Collection<'a>,
    cursor: Option<Value<'a>>,
    remaining: u64,
}

impl<'a> Elements<'a> {
    pub fn new(collection: Collection<'a>) -> Self {
        Self {
            collection,
            cursor: None,
            remaining: collection.raw_len(),
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Result<Value<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let message = self.collection.message();
        let result = match self.cursor {
            None => element_at(message, self.collection.first_child()),
            Some(prev) => skip(message, prev, 1),
        };
        match result {
            Ok(value) => {
                self.cursor = Some(value);
                Some(Ok(value))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = usize::try_from(self.remaining).ok();
        (0, upper)
    }
}
