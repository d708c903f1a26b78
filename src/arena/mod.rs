use indexmap::IndexMap;
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::constants::MAX_DEPTH;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    String,
    Array,
    Object,
}

#[derive(Debug)]
pub(crate) enum Node {
    String(String),
    Array(Vec<NodeId>),
    Object(IndexMap<SmolStr, NodeId>),
}

impl Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }
}

/// Owns every mapping, sequence and string of one document. Scope frames
/// and the value buffer refer into it by `NodeId`, never by reference.
/// Attaching a node records its distance from the root; nothing may sit
/// deeper than `MAX_DEPTH`.
#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Node>,
    depths: Vec<usize>,
    root: NodeId,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Object(IndexMap::new())],
            depths: vec![0],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.depths.push(0);
        id
    }

    /// Places the detached node `child` one level below `parent`.
    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let depth = self.depths[parent.0] + 1;
        if depth > MAX_DEPTH {
            return Err(Error::depth_limit(MAX_DEPTH));
        }
        self.depths[child.0] = depth;
        Ok(())
    }

    pub fn new_object(&mut self) -> NodeId {
        self.push(Node::Object(IndexMap::new()))
    }

    pub fn new_array(&mut self) -> NodeId {
        self.push(Node::Array(Vec::new()))
    }

    pub fn new_string(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::String(value.into()))
    }

    /// Looks up `key` in the mapping `object`. Non-mappings have no fields.
    pub fn field(&self, object: NodeId, key: &str) -> Option<NodeId> {
        match &self.nodes[object.0] {
            Node::Object(fields) => fields.get(key).copied(),
            _ => None,
        }
    }

    /// Binds `key` in the mapping `object`, replacing any previous value
    /// while keeping the key's original position.
    pub fn set_field(&mut self, object: NodeId, key: &str, value: NodeId) -> Result<()> {
        self.attach(object, value)?;
        if let Node::Object(fields) = &mut self.nodes[object.0] {
            fields.insert(SmolStr::new(key), value);
        }
        Ok(())
    }

    /// Returns the mapping bound at `key`, binding a fresh one when the
    /// key is missing or holds a non-mapping.
    pub fn ensure_object(&mut self, object: NodeId, key: &str) -> Result<NodeId> {
        match self.field(object, key) {
            Some(existing) if self.kind(existing) == NodeKind::Object => Ok(existing),
            _ => {
                let child = self.new_object();
                self.set_field(object, key, child)?;
                Ok(child)
            }
        }
    }

    pub fn push_element(&mut self, array: NodeId, value: NodeId) -> Result<()> {
        self.attach(array, value)?;
        if let Node::Array(items) = &mut self.nodes[array.0] {
            items.push(value);
        }
        Ok(())
    }

    pub fn append_str(&mut self, string: NodeId, value: &str) {
        if let Node::String(text) = &mut self.nodes[string.0] {
            text.push_str(value);
        }
    }

    pub fn into_value(self) -> Value {
        let root = self.root;
        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        take_value(&mut slots, root)
    }
}

fn take_value(slots: &mut [Option<Node>], id: NodeId) -> Value {
    match slots[id.0].take() {
        Some(Node::String(text)) => Value::String(text),
        Some(Node::Array(items)) => Value::Array(
            items
                .into_iter()
                .map(|item| take_value(slots, item))
                .collect(),
        ),
        Some(Node::Object(fields)) => {
            let mut map = Map::with_capacity(fields.len());
            for (key, value) in fields {
                map.insert(key.to_string(), take_value(slots, value));
            }
            Value::Object(map)
        }
        // Each node is reachable from exactly one parent.
        None => Value::Null,
    }
}
