// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the diagram schema.

use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Mint a fresh node id guaranteed not to collide with existing ones
    pub fn generate() -> Self {
        Self(format!("node-{}", Uuid::new_v4()))
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed diagram element with position, type, and typed ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance id
    pub id: NodeId,
    /// Node type id (resolved against the template catalog)
    #[serde(rename = "type")]
    pub node_type: String,
    /// Optional type refinement (e.g. `and`/`or` for function nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Opaque label/payload, owned by the embedding application
    #[serde(default)]
    pub content: Value,
    /// Anchor position in canvas space
    pub coordinates: [f32; 2],
    /// Input ports, in render order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Port>,
    /// Output ports, in render order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Port>,
}

impl Node {
    /// Set the coordinates
    pub fn with_coordinates(mut self, x: f32, y: f32) -> Self {
        self.coordinates = [x, y];
        self
    }

    /// Iterate over all ports, inputs first
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Collect the ids of every port belonging to this node
    pub fn port_ids(&self) -> Vec<PortId> {
        self.ports().map(|p| p.id.clone()).collect()
    }

    /// Get a port by id
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.ports().find(|p| p.id == *port_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Alignment;

    fn sample_node() -> Node {
        Node {
            id: NodeId::from("n1"),
            node_type: "function".to_string(),
            subtype: Some("and".to_string()),
            content: Value::String("AND node".to_string()),
            coordinates: [10.0, 20.0],
            inputs: vec![Port::new(PortId::from("port-0"), Alignment::Left)],
            outputs: vec![Port::new(PortId::from("port-1"), Alignment::Right)],
        }
    }

    #[test]
    fn test_generate_produces_distinct_ids() {
        assert_ne!(NodeId::generate(), NodeId::generate());
    }

    #[test]
    fn test_ports_iterates_inputs_then_outputs() {
        let node = sample_node();
        let ids: Vec<_> = node.ports().map(|p| p.id.0.clone()).collect();
        assert_eq!(ids, vec!["port-0", "port-1"]);
    }

    #[test]
    fn test_port_ids_collects_all() {
        let node = sample_node();
        assert_eq!(node.port_ids().len(), 2);
    }

    #[test]
    fn test_port_lookup() {
        let node = sample_node();
        assert!(node.port(&PortId::from("port-1")).is_some());
        assert!(node.port(&PortId::from("port-9")).is_none());
    }

    #[test]
    fn test_wire_format_omits_empty_collections() {
        let node = Node {
            id: NodeId::from("n2"),
            node_type: "inject".to_string(),
            subtype: None,
            content: Value::Null,
            coordinates: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("subtype").is_none());
        assert!(json.get("inputs").is_none());
        assert!(json.get("outputs").is_none());
        assert_eq!(json["type"], "inject");
    }

    #[test]
    fn test_wire_format_accepts_missing_optionals() {
        let node: Node = serde_json::from_str(
            r#"{"id":"n3","type":"debug","coordinates":[5.0,6.0]}"#,
        )
        .unwrap();
        assert!(node.inputs.is_empty());
        assert!(node.outputs.is_empty());
        assert_eq!(node.content, Value::Null);
    }
}
