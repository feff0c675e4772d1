//! DOM query library
//!
//! Read-only search and extraction over an already-built markup tree.
//!
//! ## Core Design
//!
//! ```text
//! CDP JSON / builder → DomArena (owned) → NodeRef (borrowed, Copy)
//!                                            ↓
//!                     traversal → query → extract / serializer
//! ```
//!
//! - Searches are rooted and pre-order: the entry node is a candidate too.
//! - "Not found" is `None` or an empty `Vec`, never an error.
//! - Nothing here mutates the tree or keeps state between calls.
//!
//! ```rust
//! use dom_query::{query, DomArena, DomNode};
//!
//! let mut arena = DomArena::new();
//! let p = arena.add_node(DomNode::element("p"));
//! arena.append_text(p, "Hello ").unwrap();
//! let b = arena.append_element(p, "b", &[("class", "em loud")]).unwrap();
//! arena.append_text(b, "World").unwrap();
//! arena.append_text(p, "!").unwrap();
//!
//! let root = arena.node(p).unwrap();
//! assert_eq!(root.text_content(), "Hello World!");
//!
//! let loud = query::find_by_class(root, "loud").unwrap();
//! assert_eq!(loud.to_markup().unwrap(), "<b class=\"em loud\">World</b>");
//! ```

pub mod arena;
pub mod error;
pub mod extract;
pub mod query;
pub mod serializer;
pub mod service;
pub mod traversal;
pub mod types;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use serializer::{to_markup, HtmlRenderer, Render, SerializerConfig};
pub use service::{DomService, DomServiceConfig};
pub use traversal::{Children, Descendants};
pub use types::*;
