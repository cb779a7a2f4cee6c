// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a port.
///
/// Port ids are unique across the entire diagram, not just within a node.
/// Ids minted by the palette follow the `port-<n>` convention, where `<n>`
/// is a monotonically growing sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    /// Create a port id from the numbered sequence (`port-<n>`)
    pub fn sequenced(sequence: u32) -> Self {
        Self(format!("port-{sequence}"))
    }

    /// Parse the numeric suffix of a sequenced port id.
    ///
    /// Returns `None` for ids that do not end in `-<digits>`. Injected
    /// schemas may carry such ids; they simply do not participate in the
    /// max+1 sequence scan.
    pub fn sequence(&self) -> Option<u32> {
        let (_, suffix) = self.0.rsplit_once('-')?;
        suffix.parse().ok()
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side of the node a port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left edge
    Left,
    /// Right edge
    Right,
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
}

/// A connection point on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Unique port id
    pub id: PortId,
    /// Side of the node the port is rendered on
    pub alignment: Alignment,
}

impl Port {
    /// Create a new port
    pub fn new(id: PortId, alignment: Alignment) -> Self {
        Self { id, alignment }
    }
}
