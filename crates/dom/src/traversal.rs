//! Tree enumeration over first-child / next-sibling links
//!
//! Everything here is lazy and restartable: iterators borrow the arena and
//! can be recreated at will. Depth-first walks keep an explicit stack of
//! "resume here" cursors instead of recursing, so a degenerate, very deep
//! tree costs heap, not call stack.

use crate::types::NodeRef;

/// Direct children of a node, in document order
#[derive(Debug, Clone)]
pub struct Children<'a> {
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Pre-order depth-first walk
///
/// Built either over the descendants of a node (the node itself excluded)
/// or rooted at the node (the node is yielded first).
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    /// Pending start node for rooted walks. Its siblings are never followed.
    root: Option<NodeRef<'a>>,
    /// Next node to visit on top; one entry per open level, so O(depth)
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Descendants<'a> {
    fn of(node: NodeRef<'a>) -> Self {
        Self {
            root: None,
            stack: node.first_child().into_iter().collect(),
        }
    }

    fn rooted(node: NodeRef<'a>) -> Self {
        Self {
            root: Some(node),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.stack.extend(root.first_child());
            return Some(root);
        }

        let node = self.stack.pop()?;
        // Sibling goes under the child: the whole child subtree comes first
        self.stack.extend(node.next_sibling());
        self.stack.extend(node.first_child());
        Some(node)
    }
}

impl<'a> NodeRef<'a> {
    /// Lazy iterator over direct children
    pub fn children(&self) -> Children<'a> {
        Children {
            next: self.first_child(),
        }
    }

    /// Lazy pre-order iterator over all descendants, excluding `self`
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::of(*self)
    }

    /// Lazy pre-order iterator over `self` followed by all its descendants
    pub fn traverse(&self) -> Descendants<'a> {
        Descendants::rooted(*self)
    }

    pub fn has_children(&self) -> bool {
        self.data().first_child_id().is_some()
    }
}

/// Direct children of `node` in document order; empty for leaves
pub fn children(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    node.children().collect()
}

/// Call `visit` on each direct child in order
pub fn for_each_child<'a, F>(node: NodeRef<'a>, visit: F)
where
    F: FnMut(NodeRef<'a>),
{
    node.children().for_each(visit);
}

/// Call `visit` on every descendant of `node` (not `node` itself), pre-order
pub fn for_each_descendant<'a, F>(node: NodeRef<'a>, visit: F)
where
    F: FnMut(NodeRef<'a>),
{
    node.descendants().for_each(visit);
}
