//! Core type definitions for the arena DOM
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. First-child / next-sibling links, nothing else is needed to walk
//! 3. Use SmallVec for small arrays (avoid heap allocation)
//! 4. Hand out `NodeRef` (arena + index) instead of references into the Vec

use crate::arena::DomArena;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Node type matching DOM specification numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    CdataSection = 4,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            _ => None,
        }
    }
}

/// Attribute name carrying a doctype's public identifier
pub const DOCTYPE_PUBLIC_ID: &str = "public";

/// Attribute name carrying a doctype's system identifier
pub const DOCTYPE_SYSTEM_ID: &str = "system";

/// One `name="value"` pair. Order of pairs on a node is source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The stored DOM tree node
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
/// - `last_child` / `parent_id` exist for the builder only; walking the tree
///   needs `first_child` and `next_sibling`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    pub node_type: NodeType,

    // Navigation indices
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) parent_id: Option<NodeId>,

    pub node_name: String,
    pub node_value: String,
    pub attributes: SmallVec<[Attribute; 4]>, // Most elements have <4 attributes
}

impl DomNode {
    /// Create a detached node with no children and no attributes
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_type,
            first_child: None,
            next_sibling: None,
            last_child: None,
            parent_id: None,
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeType::Element, tag)
    }

    pub fn text(data: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Text, "#text");
        node.node_value = data.into();
        node
    }

    pub fn comment(data: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Comment, "#comment");
        node.node_value = data.into();
        node
    }

    pub fn document() -> Self {
        Self::new(NodeType::Document, "#document")
    }

    pub fn doctype(name: impl Into<String>) -> Self {
        Self::new(NodeType::DocumentType, name)
    }

    /// Legacy doctype; empty identifiers are left out
    pub fn doctype_with_ids(
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        let mut node = Self::doctype(name);
        let (public_id, system_id) = (public_id.into(), system_id.into());
        if !public_id.is_empty() {
            node.attributes.push(Attribute::new(DOCTYPE_PUBLIC_ID, public_id));
        }
        if !system_id.is_empty() {
            node.attributes.push(Attribute::new(DOCTYPE_SYSTEM_ID, system_id));
        }
        node
    }

    /// Builder-style attribute push; duplicates are kept in order
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn first_child_id(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling_id(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Parent as recorded by the arena builder
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }
}

/// Borrowed, copyable handle to one node of a `DomArena`
///
/// Every query takes and returns these. Two handles are equal when they
/// point at the same slot of the same arena.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a DomArena,
    id: NodeId,
    node: &'a DomNode,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(arena: &'a DomArena, id: NodeId, node: &'a DomNode) -> Self {
        Self { arena, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The stored node data
    pub fn data(&self) -> &'a DomNode {
        self.node
    }

    pub fn node_type(&self) -> NodeType {
        self.node.node_type
    }

    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    /// Tag name for element nodes
    pub fn tag_name(&self) -> Option<&'a str> {
        if self.node.is_element() {
            Some(&self.node.node_name)
        } else {
            None
        }
    }

    /// Character data for text nodes
    pub fn text(&self) -> Option<&'a str> {
        if self.node.is_text() {
            Some(&self.node.node_value)
        } else {
            None
        }
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        &self.node.attributes
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.node.first_child.and_then(|id| self.arena.node(id).ok())
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        self.node.next_sibling.and_then(|id| self.arena.node(id).ok())
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("type", &self.node.node_type)
            .field("name", &self.node.node_name)
            .finish()
    }
}
