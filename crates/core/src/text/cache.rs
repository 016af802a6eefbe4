use super::clean_text;
use crate::dom::{is_skipped_tag, Document, NodeId, NodeKind};
use std::collections::HashMap;
use std::rc::Rc;

/// Flatten the text of a subtree: every descendant text node, normalized,
/// in document order, joined by single spaces.
///
/// Descendants under skipped elements (`script`, `style`, ...) contribute
/// nothing.
pub fn extract_text(doc: &Document, id: NodeId) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect_text(doc, id, &mut parts);

    match parts.len() {
        0 => String::new(),
        1 => parts.pop().unwrap_or_default(),
        _ => parts.join(" "),
    }
}

fn collect_text(doc: &Document, id: NodeId, out: &mut Vec<String>) {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let node = doc.node(current);
        if let NodeKind::Text { text } = &node.kind {
            let cleaned = clean_text(text);
            if !cleaned.is_empty() {
                out.push(cleaned.into_owned());
            }
        }
        for &child in node.children.iter().rev() {
            if doc.node(child).tag().is_some_and(is_skipped_tag) {
                continue;
            }
            stack.push(child);
        }
    }
}

/// Memoized [`extract_text`] keyed by node id.
///
/// Nodes are immutable once parsed, so entries never go stale. When the
/// cache is full it is cleared wholesale before the next insertion.
#[derive(Debug)]
pub struct TextCache {
    entries: HashMap<NodeId, Rc<str>>,
    capacity: usize,
}

impl TextCache {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_extract(&mut self, doc: &Document, id: NodeId) -> Rc<str> {
        if let Some(cached) = self.entries.get(&id) {
            return Rc::clone(cached);
        }

        let text: Rc<str> = Rc::from(extract_text(doc, id));
        if self.entries.len() >= self.capacity {
            log::trace!("text cache full at {} entries, clearing", self.entries.len());
            self.entries.clear();
        }
        self.entries.insert(id, Rc::clone(&text));
        text
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TextCache {
    fn default() -> Self {
        Self::new()
    }
}
