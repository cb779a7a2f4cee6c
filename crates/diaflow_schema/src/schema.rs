// SPDX-License-Identifier: MIT OR Apache-2.0
//! The externally-visible diagram state.

use crate::link::Link;
use crate::node::{Node, NodeId};
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The full serializable state of a diagram: nodes plus links.
///
/// This is the wire format exchanged with the engine's owner. The engine
/// never retains a `Schema` between calls; every operation takes the
/// current one and returns the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Placed nodes, in insertion order
    pub nodes: Vec<Node>,
    /// Committed links between ports
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Schema {
    /// Get a node by id
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *node_id)
    }

    /// Check whether a node with the given id exists
    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    /// Find the node owning the given port
    pub fn node_of_port(&self, port_id: &PortId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.port(port_id).is_some())
    }

    /// Iterate over every port id in the schema
    pub fn port_ids(&self) -> impl Iterator<Item = &PortId> {
        self.nodes.iter().flat_map(|n| n.ports()).map(|p| &p.id)
    }

    /// Check the structural invariants of the schema.
    ///
    /// Intended for sanity-checking an injected schema at load time; the
    /// engine's own transforms preserve these invariants by construction.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(&node.id) {
                return Err(SchemaError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut port_ids = HashSet::new();
        for port_id in self.port_ids() {
            if !port_ids.insert(port_id) {
                return Err(SchemaError::DuplicatePortId(port_id.clone()));
            }
        }

        for link in &self.links {
            for end in [&link.input, &link.output] {
                if !port_ids.contains(end) {
                    return Err(SchemaError::DanglingLink(end.clone()));
                }
            }
        }

        for (i, link) in self.links.iter().enumerate() {
            if self.links[i + 1..].iter().any(|other| link.same_pair(other)) {
                return Err(SchemaError::DuplicateLink(
                    link.input.clone(),
                    link.output.clone(),
                ));
            }
        }

        Ok(())
    }
}

/// Structural invariant violation in a schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two nodes share an id
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// Two ports share an id (port ids are global)
    #[error("duplicate port id: {0}")]
    DuplicatePortId(PortId),

    /// A link references a port that no node owns
    #[error("link references missing port: {0}")]
    DanglingLink(PortId),

    /// Two links connect the same unordered pair of ports
    #[error("duplicate link between {0} and {1}")]
    DuplicateLink(PortId, PortId),
}
