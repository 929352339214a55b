use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::arena::{Arena, Node, NodeId};
use crate::constants::PATH_SEPARATOR;

/// A parsed document: a root mapping of mappings, lists and text.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena,
}

impl Document {
    pub(crate) fn from_arena(arena: Arena) -> Self {
        Self { arena }
    }

    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// True when the root mapping has no keys.
    pub fn is_empty(&self) -> bool {
        matches!(self.node(self.root()), Node::Mapping(entries) if entries.is_empty())
    }

    /// Looks up a dotted path. Segments index mappings by key and lists by
    /// position.
    pub fn get(&self, path: &str) -> Option<NodeId> {
        path.split(PATH_SEPARATOR)
            .try_fold(self.root(), |id, segment| match self.node(id) {
                Node::Mapping(_) => self.arena.lookup(id, segment),
                Node::List(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| items.get(idx).copied()),
                Node::Text(_) => None,
            })
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|id| self.node(id).as_text())
    }

    pub fn to_value(&self) -> Value {
        self.value_at(self.root())
    }

    pub fn into_value(self) -> Value {
        self.to_value()
    }

    fn value_at(&self, id: NodeId) -> Value {
        match self.node(id) {
            Node::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|entry| (entry.key.to_string(), self.value_at(entry.value)))
                    .collect::<Map<String, Value>>(),
            ),
            Node::List(items) => {
                Value::Array(items.iter().map(|&item| self.value_at(item)).collect())
            }
            Node::Text(text) => Value::String(text.clone()),
        }
    }
}

struct NodeSer<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl Serialize for NodeSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let child = |id| NodeSer {
            arena: self.arena,
            id,
        };
        match self.arena.get(self.id) {
            Node::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for entry in entries {
                    map.serialize_entry(entry.key.as_str(), &child(entry.value))?;
                }
                map.end()
            }
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for &item in items {
                    seq.serialize_element(&child(item))?;
                }
                seq.end()
            }
            Node::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeSer {
            arena: &self.arena,
            id: self.root(),
        }
        .serialize(serializer)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        document.into_value()
    }
}
