// SPDX-License-Identifier: MIT OR Apache-2.0
//! Template descriptors for palette-driven node creation.
//!
//! A template is a node without identity: no node id and no port ids.
//! Materializing a template clones it, stamps the minted node id, and
//! assigns sequential port ids — outputs first, then inputs — starting at
//! the sequence number the caller computed from the current diagram.

use crate::node::{Node, NodeId};
use crate::port::{Alignment, Port, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An id-less port descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortTemplate {
    /// Side of the node the port is rendered on
    pub alignment: Alignment,
}

/// An id-less node descriptor, as provided by the palette catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Node type id
    #[serde(rename = "type")]
    pub node_type: String,
    /// Optional type refinement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Opaque label/payload cloned into spawned nodes
    #[serde(default)]
    pub content: Value,
    /// Default coordinates (the palette slot position)
    pub coordinates: [f32; 2],
    /// Input port descriptors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<PortTemplate>,
    /// Output port descriptors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<PortTemplate>,
}

impl NodeTemplate {
    /// Catalog key for this template: the type id, refined by the subtype
    /// when one is present (so `function:and` and `function:or` coexist).
    pub fn key(&self) -> String {
        match &self.subtype {
            Some(subtype) => format!("{}:{}", self.node_type, subtype),
            None => self.node_type.clone(),
        }
    }

    /// Clone the template into a live node.
    ///
    /// Port ids are assigned from `sequence_start`, outputs first then
    /// inputs, guaranteeing no collision when the caller derives the start
    /// from [`crate::store::next_port_sequence`].
    pub fn materialize(&self, id: NodeId, sequence_start: u32, coordinates: [f32; 2]) -> Node {
        let mut sequence = sequence_start;
        let mut assign = |template: &PortTemplate| {
            let port = Port::new(PortId::sequenced(sequence), template.alignment);
            sequence += 1;
            port
        };
        let outputs: Vec<Port> = self.outputs.iter().map(&mut assign).collect();
        let inputs: Vec<Port> = self.inputs.iter().map(&mut assign).collect();
        Node {
            id,
            node_type: self.node_type.clone(),
            subtype: self.subtype.clone(),
            content: self.content.clone(),
            coordinates,
            inputs,
            outputs,
        }
    }
}

/// Ordered catalog of templates available in the palette
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: IndexMap<String, NodeTemplate>,
}

impl TemplateCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its [`NodeTemplate::key`]
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates.insert(template.key(), template);
    }

    /// Get a template by key
    pub fn get(&self, key: &str) -> Option<&NodeTemplate> {
        self.templates.get(key)
    }

    /// Iterate over all templates, in registration order
    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The built-in logic palette: inject, debug, and, or
    pub fn logic() -> Self {
        let mut catalog = Self::new();

        catalog.register(NodeTemplate {
            node_type: "inject".to_string(),
            subtype: None,
            content: Value::String("Inject node".to_string()),
            coordinates: [0.0, 0.0],
            inputs: vec![],
            outputs: vec![PortTemplate { alignment: Alignment::Right }],
        });

        catalog.register(NodeTemplate {
            node_type: "debug".to_string(),
            subtype: None,
            content: Value::String("Debug node".to_string()),
            coordinates: [0.0, 40.0],
            inputs: vec![PortTemplate { alignment: Alignment::Left }],
            outputs: vec![],
        });

        catalog.register(NodeTemplate {
            node_type: "function".to_string(),
            subtype: Some("and".to_string()),
            content: Value::String("AND node".to_string()),
            coordinates: [0.0, 80.0],
            inputs: vec![PortTemplate { alignment: Alignment::Left }],
            outputs: vec![PortTemplate { alignment: Alignment::Right }],
        });

        catalog.register(NodeTemplate {
            node_type: "function".to_string(),
            subtype: Some("or".to_string()),
            content: Value::String("OR node".to_string()),
            coordinates: [0.0, 120.0],
            inputs: vec![PortTemplate { alignment: Alignment::Left }],
            outputs: vec![PortTemplate { alignment: Alignment::Right }],
        });

        catalog
    }
}
