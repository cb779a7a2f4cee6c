// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the diagram schema.

use crate::port::PortId;
use serde::{Deserialize, Serialize};

/// An undirected connection between two ports.
///
/// The `input`/`output` labels record which end the connect gesture
/// started from, but link identity is the unordered pair: a link between
/// ports A and B is the same link regardless of orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Port id at the gesture origin
    pub input: PortId,
    /// Port id at the gesture target
    pub output: PortId,
}

impl Link {
    /// Create a new link
    pub fn new(input: PortId, output: PortId) -> Self {
        Self { input, output }
    }

    /// Check if this link connects the given pair of ports, in either order
    pub fn connects(&self, a: &PortId, b: &PortId) -> bool {
        (self.input == *a && self.output == *b) || (self.input == *b && self.output == *a)
    }

    /// Check if this link touches the given port
    pub fn is_incident_to(&self, port_id: &PortId) -> bool {
        self.input == *port_id || self.output == *port_id
    }

    /// Check if two links connect the same unordered pair of ports
    pub fn same_pair(&self, other: &Link) -> bool {
        self.connects(&other.input, &other.output)
    }
}
