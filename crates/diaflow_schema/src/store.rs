// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure transforms over the diagram schema.
//!
//! Every function here copies: it takes the current collection and returns
//! a fresh one, leaving the caller's data untouched. Requests that cannot
//! apply (missing ids, duplicate links) are silent no-ops by policy, so
//! callers can feed user gestures straight through without pre-checking.

use crate::link::Link;
use crate::node::{Node, NodeId};
use crate::port::PortId;

/// Replace the coordinates of the node with the given id.
///
/// Returns the nodes unchanged (modulo cloning) when the id is absent.
pub fn update_node_coordinates(
    node_id: &NodeId,
    coordinates: [f32; 2],
    nodes: &[Node],
) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| {
            if node.id == *node_id {
                let mut moved = node.clone();
                moved.coordinates = coordinates;
                moved
            } else {
                node.clone()
            }
        })
        .collect()
}

/// Append a link between two ports unless the pair is already connected.
///
/// The duplicate check is symmetric: an existing link in either
/// orientation suppresses the append, and the input is returned unchanged.
pub fn add_link(input: &PortId, output: &PortId, links: &[Link]) -> Vec<Link> {
    let mut next: Vec<Link> = links.to_vec();
    if !links.iter().any(|link| link.connects(input, output)) {
        next.push(Link::new(input.clone(), output.clone()));
    }
    next
}

/// Remove the link connecting the given pair of ports, in either
/// orientation. No-op when no such link exists.
pub fn remove_link(link: &Link, links: &[Link]) -> Vec<Link> {
    links
        .iter()
        .filter(|existing| !existing.same_pair(link))
        .cloned()
        .collect()
}

/// Remove every link touching any of the given ports
pub fn remove_links_incident_to_ports(port_ids: &[PortId], links: &[Link]) -> Vec<Link> {
    links
        .iter()
        .filter(|link| !port_ids.iter().any(|p| link.is_incident_to(p)))
        .cloned()
        .collect()
}

/// Remove the node with the given id. No-op when the id is absent.
pub fn remove_node(node_id: &NodeId, nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .filter(|node| node.id != *node_id)
        .cloned()
        .collect()
}

/// Next free port sequence number: one past the highest numeric suffix
/// among all port ids in the diagram, or 0 when no port carries one.
pub fn next_port_sequence(nodes: &[Node]) -> u32 {
    nodes
        .iter()
        .flat_map(|node| node.ports())
        .filter_map(|port| port.id.sequence())
        .max()
        .map_or(0, |max| max + 1)
}
