//! Markup serializer - render a subtree back to HTML text
//!
//! The query layer only needs "node in, markup out"; that contract is the
//! [`Render`] trait. [`HtmlRenderer`] is the stock implementation and follows
//! the usual HTML fragment serialization rules:
//! - attribute values are double-quoted and escaped
//! - void elements never have children or an end tag
//! - raw text elements (`script`, `style`, ...) write their text verbatim
//!
//! Output covers exactly the given node and its descendants; siblings and
//! ancestors are never touched.

use crate::error::{DomError, Result};
use crate::types::{NodeRef, NodeType, DOCTYPE_PUBLIC_ID, DOCTYPE_SYSTEM_ID};
use std::io::Write;

/// Elements that cannot have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
    "script",
    "style",
    "xmp",
];

/// Elements where a leading newline in the first text child is eaten by
/// parsers, so one extra newline is emitted to keep it
const NEWLINE_SENSITIVE_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

/// Render contract: write `node` and its subtree to `out`
pub trait Render {
    fn render<W: Write>(&self, node: NodeRef<'_>, out: &mut W) -> Result<()>;
}

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// `<br/>` when true, `<br>` when false
    pub self_close_void: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            self_close_void: true,
        }
    }
}

/// HTML serializer
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    config: SerializerConfig,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    fn render_node<W: Write>(&self, node: NodeRef<'_>, out: &mut W) -> Result<()> {
        let data = node.data();

        match data.node_type {
            NodeType::Document | NodeType::DocumentFragment => {
                for child in node.children() {
                    self.render_node(child, out)?;
                }
            }
            NodeType::Element => self.render_element(node, out)?,
            NodeType::Text => escape(out, &data.node_value)?,
            NodeType::Comment => {
                out.write_all(b"<!--")?;
                out.write_all(data.node_value.as_bytes())?;
                out.write_all(b"-->")?;
            }
            NodeType::DocumentType => self.render_doctype(node, out)?,
            NodeType::CdataSection => {
                out.write_all(b"<![CDATA[")?;
                out.write_all(data.node_value.as_bytes())?;
                out.write_all(b"]]>")?;
            }
            NodeType::ProcessingInstruction => {
                write!(out, "<?{} {}>", data.node_name, data.node_value)?;
            }
        }

        Ok(())
    }

    fn render_doctype<W: Write>(&self, node: NodeRef<'_>, out: &mut W) -> Result<()> {
        out.write_all(b"<!DOCTYPE ")?;
        out.write_all(node.data().node_name.as_bytes())?;

        let (mut public_id, mut system_id) = ("", "");
        for attr in node.attributes() {
            match attr.name.as_str() {
                DOCTYPE_PUBLIC_ID => public_id = &attr.value,
                DOCTYPE_SYSTEM_ID => system_id = &attr.value,
                _ => {}
            }
        }

        if !public_id.is_empty() {
            out.write_all(b" PUBLIC ")?;
            write_quoted(out, public_id)?;
            if !system_id.is_empty() {
                out.write_all(b" ")?;
                write_quoted(out, system_id)?;
            }
        } else if !system_id.is_empty() {
            out.write_all(b" SYSTEM ")?;
            write_quoted(out, system_id)?;
        }

        out.write_all(b">")?;
        Ok(())
    }

    fn render_element<W: Write>(&self, node: NodeRef<'_>, out: &mut W) -> Result<()> {
        let tag = node.data().node_name.as_str();

        out.write_all(b"<")?;
        out.write_all(tag.as_bytes())?;
        for attr in node.attributes() {
            out.write_all(b" ")?;
            out.write_all(attr.name.as_bytes())?;
            out.write_all(b"=\"")?;
            escape(out, &attr.value)?;
            out.write_all(b"\"")?;
        }

        if VOID_ELEMENTS.contains(&tag) {
            if node.has_children() {
                tracing::warn!(tag, node_id = node.id(), "void element has child nodes");
                return Err(DomError::Render(format!(
                    "void element <{}> has child nodes",
                    tag
                )));
            }
            let close: &[u8] = if self.config.self_close_void { b"/>" } else { b">" };
            out.write_all(close)?;
            return Ok(());
        }
        out.write_all(b">")?;

        if NEWLINE_SENSITIVE_ELEMENTS.contains(&tag) {
            let leading_newline = node
                .first_child()
                .and_then(|child| child.text())
                .is_some_and(|text| text.starts_with('\n'));
            if leading_newline {
                out.write_all(b"\n")?;
            }
        }

        if RAW_TEXT_ELEMENTS.contains(&tag) {
            for child in node.children() {
                match child.text() {
                    Some(text) => out.write_all(text.as_bytes())?,
                    None => self.render_node(child, out)?,
                }
            }
        } else {
            for child in node.children() {
                self.render_node(child, out)?;
            }
        }

        out.write_all(b"</")?;
        out.write_all(tag.as_bytes())?;
        out.write_all(b">")?;
        Ok(())
    }
}

impl Render for HtmlRenderer {
    fn render<W: Write>(&self, node: NodeRef<'_>, out: &mut W) -> Result<()> {
        tracing::trace!(node_id = node.id(), "rendering subtree");
        self.render_node(node, out)
    }
}

/// Escape `& ' < > " \r` for text and attribute values
fn escape<W: Write>(out: &mut W, s: &str) -> std::io::Result<()> {
    let mut last = 0;
    for (i, c) in s.char_indices() {
        let replacement = match c {
            '&' => "&amp;",
            '\'' => "&#39;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&#34;",
            '\r' => "&#13;",
            _ => continue,
        };
        out.write_all(s[last..i].as_bytes())?;
        out.write_all(replacement.as_bytes())?;
        last = i + c.len_utf8();
    }
    out.write_all(s[last..].as_bytes())
}

/// Doctype identifiers are not escaped; pick the quote they don't contain
fn write_quoted<W: Write>(out: &mut W, s: &str) -> std::io::Result<()> {
    let quote: &[u8] = if s.contains('"') { b"'" } else { b"\"" };
    out.write_all(quote)?;
    out.write_all(s.as_bytes())?;
    out.write_all(quote)
}

/// Render `node` and its subtree with the default [`HtmlRenderer`]
pub fn to_markup(node: NodeRef<'_>) -> Result<String> {
    to_markup_with(&HtmlRenderer::default(), node)
}

/// Render `node` and its subtree with any [`Render`] implementation
pub fn to_markup_with<R: Render>(renderer: &R, node: NodeRef<'_>) -> Result<String> {
    let mut buf = Vec::with_capacity(256);
    renderer.render(node, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DomError::SerializationError(e.to_string()))
}

impl NodeRef<'_> {
    pub fn to_markup(&self) -> Result<String> {
        to_markup(*self)
    }
}
