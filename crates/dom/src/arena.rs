//! Arena-based DOM tree storage
//!
//! The arena owns every node; the query layer only ever sees `NodeRef`
//! handles borrowed from it.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//!
//! Node0 ──first_child──▶ Node1 ──next_sibling──▶ Node2
//! ```
//!
//! Links are only created through `append_child`, which refuses to attach a
//! node twice or below its own descendant. Every arena is therefore a finite
//! forest and traversal always terminates.

use crate::error::{DomError, Result};
use crate::types::{Attribute, DomNode, NodeId, NodeRef};

/// Arena allocator for DOM nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(1024) // Pre-allocate for typical page
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a detached node to the arena, returns its ID
    ///
    /// Any structural links on the incoming node are discarded.
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        node.first_child = None;
        node.next_sibling = None;
        node.last_child = None;
        node.parent_id = None;

        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        node_id
    }

    /// Add `node` and attach it as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, node: DomNode) -> Result<NodeId> {
        self.get(parent)?;
        let child = self.add_node(node);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Convenience: append an element with the given attributes
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId> {
        let mut node = DomNode::element(tag);
        node.attributes
            .extend(attrs.iter().map(|(k, v)| Attribute::new(*k, *v)));
        self.append(parent, node)
    }

    /// Convenience: append a text node
    pub fn append_text(&mut self, parent: NodeId, data: &str) -> Result<NodeId> {
        self.append(parent, DomNode::text(data))
    }

    /// Link a detached `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        if self.get(child)?.parent_id.is_some() {
            tracing::trace!(parent, child, "rejected append: child already attached");
            return Err(DomError::InvalidHierarchy(format!(
                "node {} already has a parent",
                child
            )));
        }

        // Walk up from the parent; meeting the child means a cycle
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                tracing::trace!(parent, child, "rejected append: would create a cycle");
                return Err(DomError::InvalidHierarchy(format!(
                    "node {} cannot be appended to itself or its descendant {}",
                    child, parent
                )));
            }
            cursor = self.get(id)?.parent_id;
        }

        let last_child = self.get(parent)?.last_child;
        match last_child {
            Some(last) => self.get_mut(last)?.next_sibling = Some(child),
            None => self.get_mut(parent)?.first_child = Some(child),
        }
        self.get_mut(parent)?.last_child = Some(child);
        self.get_mut(child)?.parent_id = Some(parent);

        Ok(())
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable). Structural links are not reachable from here.
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Borrowed handle for queries
    pub fn node(&self, node_id: NodeId) -> Result<NodeRef<'_>> {
        let node = self.get(node_id)?;
        Ok(NodeRef::new(self, node_id, node))
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Get root node
    pub fn root(&self) -> Result<NodeRef<'_>> {
        let root_id = self
            .root_id
            .ok_or_else(|| DomError::CdpError("No root node set".to_string()))?;
        self.node(root_id)
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_id = None;
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
