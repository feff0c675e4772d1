//! DOM Service - builds an arena from a CDP document snapshot
//!
//! This is the tree provider: it takes the JSON returned by CDP's
//! `DOM.getDocument` (with `depth: -1`) and links it into a [`DomArena`].
//! Queries then run on `NodeRef`s borrowed from that arena.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use ahash::AHashMap;
use serde::Deserialize;
use serde_json::Value;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
    /// CDP reports HTML element names in upper case; tag predicates are
    /// case-sensitive, so fold them by default
    pub lowercase_tag_names: bool,
    /// Attach iframe `contentDocument`s as the frame element's last child
    pub include_content_documents: bool,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            lowercase_tag_names: true,
            include_content_documents: false,
        }
    }
}

/// One node as CDP serializes it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdpNode {
    #[serde(default)]
    backend_node_id: Option<u32>,
    node_type: u8,
    #[serde(default)]
    node_name: String,
    #[serde(default)]
    node_value: String,
    /// Flat `[name, value, name, value, ...]`
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    children: Vec<CdpNode>,
    #[serde(default)]
    content_document: Option<Box<CdpNode>>,
    #[serde(default)]
    public_id: String,
    #[serde(default)]
    system_id: String,
}

/// Scratch state for one load; only swapped into the service on success
struct TreeLoader<'c> {
    config: &'c DomServiceConfig,
    arena: DomArena,
    backend_id_map: AHashMap<u32, NodeId>,
}

impl TreeLoader<'_> {
    /// Add one CDP node and, recursively, its subtree
    fn parse_node(&mut self, cdp_node: &CdpNode, depth: usize) -> Result<NodeId> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let node_type =
            NodeType::from_u8(cdp_node.node_type).ok_or_else(|| DomError::InvalidNodeType {
                expected: "valid NodeType".to_string(),
                actual: format!("{}", cdp_node.node_type),
            })?;

        let node_name = if node_type == NodeType::Element && self.config.lowercase_tag_names {
            cdp_node.node_name.to_ascii_lowercase()
        } else {
            cdp_node.node_name.clone()
        };

        let mut node = DomNode::new(node_type, node_name);
        node.node_value = cdp_node.node_value.clone();
        node.attributes = cdp_node
            .attributes
            .chunks_exact(2)
            .map(|pair| Attribute::new(pair[0].as_str(), pair[1].as_str()))
            .collect();

        // Doctype identifiers ride along as `public` / `system` attributes
        if node_type == NodeType::DocumentType {
            if !cdp_node.public_id.is_empty() {
                node.attributes
                    .push(Attribute::new(DOCTYPE_PUBLIC_ID, cdp_node.public_id.as_str()));
            }
            if !cdp_node.system_id.is_empty() {
                node.attributes
                    .push(Attribute::new(DOCTYPE_SYSTEM_ID, cdp_node.system_id.as_str()));
            }
        }

        let node_id = self.arena.add_node(node);
        if let Some(backend_id) = cdp_node.backend_node_id {
            self.backend_id_map.insert(backend_id, node_id);
        }

        for child in &cdp_node.children {
            let child_id = self.parse_node(child, depth + 1)?;
            self.arena.append_child(node_id, child_id)?;
        }

        if self.config.include_content_documents {
            if let Some(content_doc) = &cdp_node.content_document {
                let doc_id = self.parse_node(content_doc, depth + 1)?;
                self.arena.append_child(node_id, doc_id)?;
            }
        }

        Ok(node_id)
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,

    /// Backend node ID → NodeId lookup (CDP uses backend IDs)
    backend_id_map: AHashMap<u32, NodeId>,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        Self {
            config,
            arena: DomArena::new(),
            backend_id_map: AHashMap::with_capacity(1024),
        }
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Consume the service, keeping the loaded arena
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse CDP DOM tree response and build arena
    ///
    /// Input format matches CDP's DOM.getDocument response:
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeId": 1,
    ///     "backendNodeId": 1,
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [...]
    ///   }
    /// }
    /// ```
    ///
    /// On success the previously loaded tree is replaced. On error the
    /// service is left exactly as it was.
    pub fn parse_cdp_dom_tree(&mut self, cdp_response: &Value) -> Result<NodeRef<'_>> {
        let root = cdp_response
            .get("root")
            .ok_or_else(|| DomError::CdpError("Missing 'root' in CDP response".to_string()))?;
        let root = CdpNode::deserialize(root)?;

        let mut loader = TreeLoader {
            config: &self.config,
            arena: DomArena::new(),
            backend_id_map: AHashMap::with_capacity(1024),
        };
        let root_id = loader.parse_node(&root, 0)?;
        loader.arena.set_root(root_id)?;

        self.arena = loader.arena;
        self.backend_id_map = loader.backend_id_map;

        tracing::debug!(
            nodes = self.arena.len(),
            root = root_id,
            "loaded CDP DOM tree"
        );

        self.arena.node(root_id)
    }

    /// Root of the loaded tree
    pub fn root(&self) -> Result<NodeRef<'_>> {
        self.arena.root()
    }

    /// Look a node up by its CDP backend node ID
    pub fn node_by_backend_id(&self, backend_id: u32) -> Option<NodeRef<'_>> {
        let node_id = self.backend_id_map.get(&backend_id)?;
        self.arena.node(*node_id).ok()
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}
