use smol_str::SmolStr;

/// Handle to a node owned by an [`Arena`]. Handles are only minted by the
/// arena they index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    List,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: SmolStr,
    pub value: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Mapping(Vec<Entry>),
    List(Vec<NodeId>),
    Text(String),
}

impl Node {
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Mapping => Node::Mapping(Vec::new()),
            NodeKind::List => Node::List(Vec::new()),
            NodeKind::Text => Node::Text(String::new()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::List(_) => NodeKind::List,
            Node::Text(_) => NodeKind::Text,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Flat storage for one document. Slot 0 is always the root mapping.
///
/// Nodes are never freed: replacing a binding allocates a fresh node and
/// leaves the previous one unreachable, so handles held by open scopes stay
/// valid (they just stop contributing to the output).
#[derive(Debug, Clone)]
pub struct Arena {
    nodes: Vec<Node>,
    /// Distance from the root, per slot.
    depths: Vec<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Mapping(Vec::new())],
            depths: vec![0],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of containers between the root and `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.depths[id.0]
    }

    fn alloc(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.depths.push(self.depths[parent.0] + 1);
        id
    }

    pub fn lookup(&self, mapping: NodeId, key: &str) -> Option<NodeId> {
        match self.get(mapping) {
            Node::Mapping(entries) => entries
                .iter()
                .find(|entry| entry.key == key)
                .map(|entry| entry.value),
            _ => None,
        }
    }

    fn bind(&mut self, mapping: NodeId, key: &str, value: NodeId) {
        let Node::Mapping(entries) = &mut self.nodes[mapping.0] else {
            debug_assert!(false, "bind target is not a mapping");
            return;
        };
        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => entries.push(Entry {
                key: SmolStr::new(key),
                value,
            }),
        }
    }

    /// Binds `node` at `key`, discarding whatever was there.
    pub fn replace(&mut self, mapping: NodeId, key: &str, node: Node) -> NodeId {
        let id = self.alloc(mapping, node);
        self.bind(mapping, key, id);
        id
    }

    /// The single overwrite policy of the document: returns the node at
    /// `key` if it already has `kind`, otherwise binds a fresh empty node of
    /// that kind in its place.
    pub fn coerce(&mut self, mapping: NodeId, key: &str, kind: NodeKind) -> NodeId {
        match self.lookup(mapping, key) {
            Some(id) if self.get(id).kind() == kind => id,
            _ => self.replace(mapping, key, Node::empty(kind)),
        }
    }

    /// Walks every segment of a dotted path but the last, coercing each to a
    /// mapping. Returns the innermost mapping and the final segment.
    pub fn resolve_parent<'p>(&mut self, mut mapping: NodeId, path: &'p str) -> (NodeId, &'p str) {
        let mut segments = path.split(crate::constants::PATH_SEPARATOR);
        let mut leaf = segments.next().unwrap_or_default();
        for segment in segments {
            mapping = self.coerce(mapping, leaf, NodeKind::Mapping);
            leaf = segment;
        }
        (mapping, leaf)
    }

    pub fn push(&mut self, list: NodeId, node: Node) -> NodeId {
        let id = self.alloc(list, node);
        match &mut self.nodes[list.0] {
            Node::List(items) => items.push(id),
            _ => debug_assert!(false, "push target is not a list"),
        }
        id
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0] = Node::Text(text.to_string());
    }

    pub fn append_text(&mut self, id: NodeId, text: &str) {
        match &mut self.nodes[id.0] {
            Node::Text(existing) => existing.push_str(text),
            other => *other = Node::Text(text.to_string()),
        }
    }
}
