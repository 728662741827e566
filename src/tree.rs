//! Constituency tree structures for bracketed fragments
//!
//! Nodes are stored in the order their opening tags appear in the text, so a
//! node id doubles as a document position: `a < b` means `a` was opened first.
//! Fragments cut out of a sentence are rarely balanced, which is why a tree may
//! have several roots and records how many brackets it had to repair.

/// Unique identifier for a node (its position in document order)
pub type NodeId = usize;

/// Prefix of the leaf that marks a wh-trace
pub const TRACE_LEAF: &str = "*T*";

/// Label of the empty-category node wrapping a trace leaf
pub const EMPTY_CATEGORY: &str = "-NONE-";

/// A node label such as `NP-SBJ-3`, split into base and coreference index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    raw: String,
    base_len: usize,
    index: Option<u32>,
}

impl Label {
    /// Parse a raw label. A trailing `-<digits>` is the coreference index.
    pub fn parse(raw: &str) -> Self {
        let (base_len, index) = match raw.rsplit_once('-') {
            Some((base, suffix))
                if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
            {
                match atoi::atoi::<u32>(suffix.as_bytes()) {
                    Some(index) => (base.len(), Some(index)),
                    None => (raw.len(), None),
                }
            }
            _ => (raw.len(), None),
        };

        Self {
            raw: raw.to_string(),
            base_len,
            index,
        }
    }

    /// The label exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The label without its coreference index
    pub fn base(&self) -> &str {
        &self.raw[..self.base_len]
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// True if this is `base` carrying exactly the given index
    pub fn is_indexed(&self, base: &str, index: u32) -> bool {
        self.index == Some(index) && self.base() == base
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Content of a node, in textual order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Node(NodeId),
    Word(String),
}

/// A labeled bracket
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    pub parent: Option<NodeId>,
    pub items: Vec<Item>,
}

impl Node {
    pub fn new(id: NodeId, label: &str, parent: Option<NodeId>) -> Self {
        Self {
            id,
            label: Label::parse(label),
            parent,
            items: Vec::new(),
        }
    }

    /// Ids of child nodes, skipping words
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Node(id) => Some(*id),
            Item::Word(_) => None,
        })
    }

    /// Leaf words directly under this node
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Word(word) => Some(word.as_str()),
            Item::Node(_) => None,
        })
    }
}

/// A (possibly repaired) bracket tree
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub nodes: Vec<Node>,
    /// Items outside any bracket: top-level nodes and stray words
    pub roots: Vec<Item>,
    /// Closing brackets with nothing left to close
    pub unmatched_closes: usize,
    /// Brackets still open at the end of the text
    pub unclosed: usize,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node under `parent` (or at top level) and return its id
    pub fn add_node(&mut self, label: &str, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, label, parent));
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent) => parent.items.push(Item::Node(id)),
            None => self.roots.push(Item::Node(id)),
        }
        id
    }

    /// Attach a leaf word under `parent` (or at top level)
    pub fn add_word(&mut self, word: &str, parent: Option<NodeId>) {
        let item = Item::Word(word.to_string());
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent) => parent.items.push(item),
            None => self.roots.push(item),
        }
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get the parent of a node
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.get_node(id)
            .and_then(|node| node.parent)
            .and_then(|parent_id| self.get_node(parent_id))
    }

    /// Get the children of a node
    pub fn children(&self, id: NodeId) -> Vec<&Node> {
        match self.get_node(id) {
            Some(node) => node.children().filter_map(|c| self.get_node(c)).collect(),
            None => Vec::new(),
        }
    }

    /// The node opened immediately inside `id`, if nothing precedes it
    pub fn first_child(&self, id: NodeId) -> Option<&Node> {
        match self.get_node(id)?.items.first()? {
            Item::Node(child) => self.get_node(*child),
            Item::Word(_) => None,
        }
    }

    /// The leaf immediately inside `id`, if nothing precedes it
    pub fn first_word(&self, id: NodeId) -> Option<&str> {
        match self.get_node(id)?.items.first()? {
            Item::Word(word) => Some(word.as_str()),
            Item::Node(_) => None,
        }
    }

    /// True if `id` immediately wraps `(-NONE- *T*...)`
    pub fn is_trace(&self, id: NodeId) -> bool {
        self.first_child(id).is_some_and(|none| {
            none.label.as_str() == EMPTY_CATEGORY
                && self
                    .first_word(none.id)
                    .is_some_and(|leaf| leaf.starts_with(TRACE_LEAF))
        })
    }

    /// Nodes opened after `id`, in document order
    pub fn nodes_after(&self, id: NodeId) -> &[Node] {
        self.nodes.get(id + 1..).unwrap_or(&[])
    }

    /// True if no brackets had to be repaired
    pub fn is_balanced(&self) -> bool {
        self.unmatched_closes == 0 && self.unclosed == 0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
