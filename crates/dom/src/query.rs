//! Predicate search over a subtree
//!
//! All searches are rooted: the entry node is the first candidate, then its
//! descendants follow in pre-order. "Nothing matched" is `None` or an empty
//! `Vec`, never an error.

use crate::extract;
use crate::types::NodeRef;

/// First node in pre-order (entry node included) satisfying `cond`
///
/// Stops at the match: `cond` is never evaluated on any later node.
pub fn find_first<'a, F>(node: NodeRef<'a>, mut cond: F) -> Option<NodeRef<'a>>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    node.traverse().find(|candidate| cond(*candidate))
}

/// Every node in pre-order (entry node included) satisfying `cond`
///
/// A match does not hide its own subtree; nested matches are reported too.
pub fn find_all<'a, F>(node: NodeRef<'a>, mut cond: F) -> Vec<NodeRef<'a>>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    node.traverse().filter(|candidate| cond(*candidate)).collect()
}

/// `visit` each result of [`find_all`], in order
pub fn for_each_match<'a, C, F>(node: NodeRef<'a>, cond: C, visit: F)
where
    C: FnMut(NodeRef<'a>) -> bool,
    F: FnMut(NodeRef<'a>),
{
    find_all(node, cond).into_iter().for_each(visit);
}

/// `visit` the result of [`find_first`], if there is one
///
/// Returns whether `visit` ran. With no match nothing is called.
pub fn with_first_match<'a, C, F>(node: NodeRef<'a>, cond: C, visit: F) -> bool
where
    C: FnMut(NodeRef<'a>) -> bool,
    F: FnOnce(NodeRef<'a>),
{
    match find_first(node, cond) {
        Some(found) => {
            visit(found);
            true
        }
        None => false,
    }
}

/// Element whose tag name equals `tag` exactly (case-sensitive)
pub fn by_tag(tag: &str) -> impl Fn(NodeRef<'_>) -> bool + '_ {
    move |node: NodeRef<'_>| node.tag_name() == Some(tag)
}

/// Element carrying `class_name` as one token of its `class` attribute
pub fn by_class(class_name: &str) -> impl Fn(NodeRef<'_>) -> bool + '_ {
    move |node: NodeRef<'_>| {
        node.is_element()
            && extract::class_list(node)
                .is_some_and(|classes| classes.iter().any(|c| *c == class_name))
    }
}

pub fn find_by_tag<'a>(node: NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    find_first(node, by_tag(tag))
}

pub fn find_all_by_tag<'a>(node: NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    find_all(node, by_tag(tag))
}

pub fn for_each_by_tag<'a, F>(node: NodeRef<'a>, tag: &str, visit: F)
where
    F: FnMut(NodeRef<'a>),
{
    for_each_match(node, by_tag(tag), visit);
}

pub fn find_by_class<'a>(node: NodeRef<'a>, class_name: &str) -> Option<NodeRef<'a>> {
    find_first(node, by_class(class_name))
}

pub fn find_all_by_class<'a>(node: NodeRef<'a>, class_name: &str) -> Vec<NodeRef<'a>> {
    find_all(node, by_class(class_name))
}

pub fn for_each_by_class<'a, F>(node: NodeRef<'a>, class_name: &str, visit: F)
where
    F: FnMut(NodeRef<'a>),
{
    for_each_match(node, by_class(class_name), visit);
}

/// Method-call sugar over the free functions above
impl<'a> NodeRef<'a> {
    pub fn find_first<F>(&self, cond: F) -> Option<NodeRef<'a>>
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        find_first(*self, cond)
    }

    pub fn find_all<F>(&self, cond: F) -> Vec<NodeRef<'a>>
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        find_all(*self, cond)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<NodeRef<'a>> {
        find_by_tag(*self, tag)
    }

    pub fn find_all_by_tag(&self, tag: &str) -> Vec<NodeRef<'a>> {
        find_all_by_tag(*self, tag)
    }

    pub fn find_by_class(&self, class_name: &str) -> Option<NodeRef<'a>> {
        find_by_class(*self, class_name)
    }

    pub fn find_all_by_class(&self, class_name: &str) -> Vec<NodeRef<'a>> {
        find_all_by_class(*self, class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DomArena;
    use crate::types::{DomNode, NodeId};
    use std::cell::Cell;

    /// section.card
    /// ├── div.card.wide
    /// │   └── span.card
    /// ├── "text"
    /// └── DIV
    fn sample() -> (DomArena, NodeId) {
        let mut arena = DomArena::new();
        let root = arena.add_node(DomNode::element("section").with_attr("class", "card"));
        let div = arena
            .append_element(root, "div", &[("class", " card  wide ")])
            .unwrap();
        arena
            .append_element(div, "span", &[("class", "card")])
            .unwrap();
        arena.append_text(root, "text").unwrap();
        arena.append_element(root, "DIV", &[]).unwrap();
        (arena, root)
    }

    fn tags<'a>(nodes: &[NodeRef<'a>]) -> Vec<&'a str> {
        nodes.iter().filter_map(|n| n.tag_name()).collect()
    }

    #[test]
    fn test_root_is_a_candidate() {
        let mut arena = DomArena::new();
        let div = arena.add_node(DomNode::element("div"));
        let node = arena.node(div).unwrap();

        assert_eq!(find_first(node, by_tag("div")), Some(node));
        assert_eq!(find_all(node, by_tag("div")), vec![node]);
    }

    #[test]
    fn test_find_all_keeps_nested_matches_in_pre_order() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        let found = find_all_by_class(node, "card");
        assert_eq!(tags(&found), vec!["section", "div", "span"]);
    }

    #[test]
    fn test_find_first_matches_head_of_find_all() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        for cond in ["section", "div", "span", "DIV", "p"] {
            let first = find_by_tag(node, cond);
            let all = find_all_by_tag(node, cond);
            assert_eq!(first, all.first().copied(), "tag {}", cond);
        }
    }

    #[test]
    fn test_tag_match_is_case_sensitive() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        assert_eq!(find_all_by_tag(node, "div").len(), 1);
        assert_eq!(find_all_by_tag(node, "DIV").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        assert!(find_by_tag(node, "table").is_none());
        assert!(find_all_by_tag(node, "table").is_empty());
        assert!(find_by_class(node, "missing").is_none());
    }

    #[test]
    fn test_class_predicate_ignores_non_elements_and_substrings() {
        let mut arena = DomArena::new();
        let root = arena.add_node(DomNode::element("div").with_attr("class", "cardboard"));
        arena.append_text(root, "card").unwrap();
        arena.append_element(root, "p", &[]).unwrap();
        let node = arena.node(root).unwrap();

        assert!(find_all_by_class(node, "card").is_empty());
    }

    #[test]
    fn test_find_first_short_circuits() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();
        let evaluated = Cell::new(0);

        let found = find_first(node, |n| {
            evaluated.set(evaluated.get() + 1);
            n.tag_name() == Some("div")
        });

        assert_eq!(found.and_then(|n| n.tag_name()), Some("div"));
        // section, then div; nothing after
        assert_eq!(evaluated.get(), 2);
    }

    #[test]
    fn test_for_each_match_visits_in_order() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        let mut seen = Vec::new();
        for_each_by_class(node, "card", |n| seen.push(n.id()));
        let expected: Vec<_> = find_all_by_class(node, "card")
            .iter()
            .map(|n| n.id())
            .collect();
        assert_eq!(seen, expected);

        let mut tags_seen = Vec::new();
        for_each_by_tag(node, "span", |n| tags_seen.push(n.tag_name()));
        assert_eq!(tags_seen, vec![Some("span")]);
    }

    #[test]
    fn test_with_first_match_skips_visit_when_absent() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        let mut visited = None;
        assert!(with_first_match(node, by_tag("span"), |n| visited = Some(n)));
        assert_eq!(visited.and_then(|n| n.tag_name()), Some("span"));

        let mut called = false;
        assert!(!with_first_match(node, by_tag("table"), |_| called = true));
        assert!(!called);
    }

    #[test]
    fn test_method_sugar() {
        let (arena, root) = sample();
        let node = arena.node(root).unwrap();

        assert_eq!(node.find_by_tag("span"), find_by_tag(node, "span"));
        assert_eq!(node.find_all_by_class("wide").len(), 1);
        assert_eq!(
            node.find_first(|n| n.is_text()).and_then(|n| n.text()),
            Some("text")
        );
        assert_eq!(node.find_all(|n| n.is_element()).len(), 4);
        assert!(node.find_by_class("wide").is_some());
        assert_eq!(node.find_all_by_tag("span").len(), 1);
    }
}
