// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identity-to-geometry side tables.
//!
//! The rendering collaborator registers a handle when a node or port
//! element mounts and unregisters it on unmount. Handles are opaque to the
//! registry; the engine only reads them through [`HandleAnchor`] when it
//! needs screen coordinates for a drag gesture.

use diaflow_schema::{NodeId, PortId};
use std::collections::HashMap;

/// Access to the screen-space anchor of a registered element.
///
/// Implemented by the rendering collaborator's handle type. The registry
/// itself never requires this; only coordinate resolution does, so a
/// handle without geometry (e.g. in headless tests) can still be stored.
pub trait HandleAnchor {
    /// Screen-space position of the element's anchor point
    fn anchor(&self) -> [f32; 2];
}

/// Minimal handle carrying just an anchor point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleHandle {
    /// Screen-space x
    pub x: f32,
    /// Screen-space y
    pub y: f32,
}

impl HandleAnchor for SimpleHandle {
    fn anchor(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// The canvas bounding box in screen space.
///
/// `width`/`height` double as the container extent used for coordinate
/// clamping: node coordinates always land in `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// Screen-space x of the canvas origin
    pub x: f32,
    /// Screen-space y of the canvas origin
    pub y: f32,
    /// Rendered width of the canvas container
    pub width: f32,
    /// Rendered height of the canvas container
    pub height: f32,
}

impl CanvasRect {
    /// Create a new canvas rect
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Convert a screen-space point to canvas-relative coordinates
    pub fn to_canvas(&self, screen: [f32; 2]) -> [f32; 2] {
        [screen[0] - self.x, screen[1] - self.y]
    }

    /// Clamp canvas coordinates to the container extent
    pub fn clamp(&self, coordinates: [f32; 2]) -> [f32; 2] {
        [
            coordinates[0].clamp(0.0, self.width),
            coordinates[1].clamp(0.0, self.height),
        ]
    }
}

/// Two independent id-to-handle mappings, one for nodes and one for ports.
///
/// Generic over the handle type `H` supplied by the rendering
/// collaborator. Registration overwrites; lookups on unregistered ids
/// return `None`, which callers treat as "skip this frame".
pub struct GeometryRegistry<H> {
    nodes: HashMap<NodeId, H>,
    ports: HashMap<PortId, H>,
}

impl<H> Default for GeometryRegistry<H> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            ports: HashMap::new(),
        }
    }
}

impl<H> GeometryRegistry<H> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the handle for a node
    pub fn register_node(&mut self, id: NodeId, handle: H) {
        self.nodes.insert(id, handle);
    }

    /// Remove a node's handle. No-op when the id is absent.
    pub fn unregister_node(&mut self, id: &NodeId) {
        self.nodes.remove(id);
    }

    /// Look up a node's handle
    pub fn node_handle(&self, id: &NodeId) -> Option<&H> {
        self.nodes.get(id)
    }

    /// Store or overwrite the handle for a port
    pub fn register_port(&mut self, id: PortId, handle: H) {
        self.ports.insert(id, handle);
    }

    /// Remove a port's handle. No-op when the id is absent.
    pub fn unregister_port(&mut self, id: &PortId) {
        self.ports.remove(id);
    }

    /// Look up a port's handle
    pub fn port_handle(&self, id: &PortId) -> Option<&H> {
        self.ports.get(id)
    }

    /// Number of registered nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered ports
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}

impl<H> GeometryRegistry<H>
where
    H: HandleAnchor,
{
    /// Resolve a port's canvas-relative coordinates.
    ///
    /// Returns `None` when the port is not mounted yet; the caller skips
    /// the operation for that frame.
    pub fn port_origin(&self, id: &PortId, canvas: &CanvasRect) -> Option<[f32; 2]> {
        self.ports
            .get(id)
            .map(|handle| canvas.to_canvas(handle.anchor()))
    }
}
