//! Attribute, class and text extraction
//!
//! Stateless accessors over `NodeRef`. Nothing is cached on the node; the
//! class list in particular is re-split on every call.

use crate::types::NodeRef;

/// Value reported for attributes present with an empty value (`disabled`)
pub const BOOLEAN_ATTRIBUTE_VALUE: &str = "true";

/// Value of the first attribute named `key`
///
/// Present-but-empty attributes come back as `"true"`; tell "absent" from
/// "present" by the `Option`, not by the string.
pub fn attribute<'a>(node: NodeRef<'a>, key: &str) -> Option<&'a str> {
    node.attributes()
        .iter()
        .find(|attr| attr.name == key)
        .map(|attr| {
            if attr.value.is_empty() {
                BOOLEAN_ATTRIBUTE_VALUE
            } else {
                attr.value.as_str()
            }
        })
}

/// Whitespace-separated tokens of the `class` attribute, order and
/// duplicates preserved. `None` when there is no `class` attribute.
pub fn class_list<'a>(node: NodeRef<'a>) -> Option<Vec<&'a str>> {
    attribute(node, "class").map(|value| value.split_whitespace().collect())
}

/// Concatenated data of every text node in the subtree, pre-order
///
/// No separators are inserted and nothing is trimmed.
pub fn text_content(node: NodeRef<'_>) -> String {
    node.traverse().filter_map(|n| n.text()).collect()
}

/// Hand the text content of `node` to `visit`
pub fn with_text_content<F>(node: NodeRef<'_>, visit: F)
where
    F: FnOnce(&str),
{
    visit(&text_content(node));
}

impl<'a> NodeRef<'a> {
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        attribute(*self, key)
    }

    pub fn class_list(&self) -> Option<Vec<&'a str>> {
        class_list(*self)
    }

    pub fn text_content(&self) -> String {
        text_content(*self)
    }
}
