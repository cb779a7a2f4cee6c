// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cascading node removal.
//!
//! Removing a node must take its links with it in the same step: the
//! externally-observed schema never contains a link whose port no longer
//! exists, not even transiently. The link set is therefore computed (and
//! published) before the node list.

use diaflow_schema::{store, Link, Node, NodeId, PortId, Schema};
use tracing::debug;

/// Result of cascading a node removal
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// Ports that belonged to the removed node, for geometry unregistration
    pub removed_ports: Vec<PortId>,
    /// Link set with every link incident to the node removed
    pub links: Vec<Link>,
    /// Node list with the node removed
    pub nodes: Vec<Node>,
}

/// Compute the removal of a node, its incident links, and the set of port
/// ids whose geometry registrations must be dropped.
///
/// Returns `None` when the node does not exist (a no-op, not an error).
pub fn cascade_removal(node_id: &NodeId, schema: &Schema) -> Option<CascadeOutcome> {
    let node = schema.node(node_id)?;
    let removed_ports = node.port_ids();
    debug!(node = %node_id, ports = removed_ports.len(), "cascading node removal");

    let links = store::remove_links_incident_to_ports(&removed_ports, &schema.links);
    let nodes = store::remove_node(node_id, &schema.nodes);
    Some(CascadeOutcome {
        removed_ports,
        links,
        nodes,
    })
}
