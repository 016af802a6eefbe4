use crate::error::ParseError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::cell::RefCell;
use std::collections::HashMap;

/// Dense index of a node inside its [`Document`], assigned in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Element { tag: String },
    Text { text: String },
    Comment,
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub attributes: HashMap<String, String>,
    pub children: Vec<NodeId>,
    /// Non-owning back-reference, `None` for the document root.
    pub parent: Option<NodeId>,
}

impl Node {
    /// Lower-case tag name, or `None` for non-element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

/// Elements that never produce layout: neither they nor their text are visited.
pub const SKIPPED_TAGS: &[&str] = &[
    "head", "title", "meta", "link", "script", "style", "noscript", "comment",
];

pub fn is_skipped_tag(tag: &str) -> bool {
    SKIPPED_TAGS.contains(&tag)
}

/// Deepest level at which elements keep their own children. Anything nested
/// further is flattened onto the ancestor at this depth, which bounds the
/// recursion of every later tree walk.
pub const MAX_DEPTH: usize = 256;

/// How strictly tree-construction errors are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Recover from malformed markup the way browsers do.
    #[default]
    Lenient,
    /// Fail on the first error the tree builder reports.
    Strict,
}

/// An immutable parsed document. Node 0 is always the document root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.nodes[id.0].parent.map(|p| &self.nodes[p.0])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// First element with the given tag in pre-order depth-first order.
    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        // Ids are assigned in pre-order, so a linear scan is a DFS.
        self.nodes
            .iter()
            .find(|n| n.tag() == Some(tag))
            .map(|n| n.id)
    }
}

/// Parse an HTML string into an arena [`Document`].
pub fn parse_html(html: &str, mode: ParseMode) -> Result<Document, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            // A missing doctype is not a markup error here.
            iframe_srcdoc: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| ParseError::Io(e.to_string()))?;

    let errors = dom.errors.borrow();
    if !errors.is_empty() {
        match mode {
            ParseMode::Strict => {
                return Err(ParseError::Malformed {
                    count: errors.len(),
                    first: errors[0].to_string(),
                });
            }
            ParseMode::Lenient => {
                for err in errors.iter() {
                    log::debug!("recovered from markup error: {}", err);
                }
            }
        }
    }

    let nodes = build_arena(&dom.document);
    log::debug!("parsed document into {} nodes", nodes.len());

    Ok(Document { nodes })
}

/// Convert the parsed tree into arena nodes, numbering them in pre-order.
///
/// Iterative, so nesting depth costs heap rather than stack. Nodes that would
/// sit deeper than [`MAX_DEPTH`] + 1 are attached to their ancestor at
/// `MAX_DEPTH` instead, in document order; the contents of skipped elements
/// down there are dropped.
fn build_arena(document: &Handle) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut depths: Vec<usize> = Vec::new();
    let mut stack: Vec<(Handle, Option<NodeId>)> = vec![(document.clone(), None)];

    while let Some((handle, parent)) = stack.pop() {
        let Some((kind, attributes)) = node_payload(&handle) else {
            continue;
        };

        let id = NodeId(nodes.len());
        let depth = parent.map_or(0, |p| depths[p.0] + 1);
        let skipped = matches!(&kind, NodeKind::Element { tag } if is_skipped_tag(tag));

        nodes.push(Node {
            id,
            kind,
            attributes,
            children: Vec::new(),
            parent,
        });
        depths.push(depth);
        if let Some(p) = parent {
            nodes[p.0].children.push(id);
        }

        let child_parent = if depth <= MAX_DEPTH {
            Some(id)
        } else if skipped {
            continue;
        } else {
            parent
        };

        // Reversed so the first child is popped, and numbered, first.
        for child in handle.children.borrow().iter().rev() {
            stack.push((child.clone(), child_parent));
        }
    }

    nodes
}

fn node_payload(handle: &Handle) -> Option<(NodeKind, HashMap<String, String>)> {
    match &handle.data {
        NodeData::Document => Some((NodeKind::Document, HashMap::new())),
        NodeData::Element { name, attrs, .. } => Some((
            NodeKind::Element {
                tag: name.local.to_string(),
            },
            collect_attributes(attrs),
        )),
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            // Skip whitespace-only text nodes
            if text.trim().is_empty() {
                return None;
            }
            Some((NodeKind::Text { text }, HashMap::new()))
        }
        NodeData::Comment { .. } => Some((NodeKind::Comment, HashMap::new())),
        // Doctypes and processing instructions carry nothing to lay out
        _ => None,
    }
}

fn collect_attributes(attrs: &RefCell<Vec<Attribute>>) -> HashMap<String, String> {
    attrs
        .borrow()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}
