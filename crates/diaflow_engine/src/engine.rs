// SPDX-License-Identifier: MIT OR Apache-2.0
//! The engine facade.
//!
//! [`DiagramEngine`] owns the mutable interaction state (geometry
//! registry, the single connection session, an optional spawn session)
//! and exposes one entry point per user gesture. The diagram itself is
//! owned by the caller: every operation takes the current [`Schema`] and
//! returns the next one, and any operation that changes nodes or links
//! also reports the new schema through the change listener.

use crate::cascade::cascade_removal;
use crate::geometry::{CanvasRect, GeometryRegistry, HandleAnchor};
use crate::session::{ConnectionSession, Segment};
use crate::spawn::{PaletteSpawner, SpawnError, SpawnSession};
use diaflow_schema::{store, Link, NodeId, Port, PortId, Schema, TemplateCatalog};
use tracing::debug;

/// Callback receiving the complete new schema after every change
pub type ChangeListener = Box<dyn Fn(&Schema)>;

/// Facade over the graph interaction engine
pub struct DiagramEngine<H> {
    registry: GeometryRegistry<H>,
    session: ConnectionSession,
    spawner: PaletteSpawner,
    spawn: Option<SpawnSession>,
    on_change: Option<ChangeListener>,
}

impl<H> DiagramEngine<H> {
    /// Create an engine over a template catalog
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self {
            registry: GeometryRegistry::new(),
            session: ConnectionSession::new(),
            spawner: PaletteSpawner::new(catalog),
            spawn: None,
            on_change: None,
        }
    }

    /// Install the change listener
    pub fn set_change_listener(&mut self, listener: impl Fn(&Schema) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    fn notify(&self, schema: &Schema) {
        if let Some(listener) = &self.on_change {
            listener(schema);
        }
    }

    // ------------------------------------------------------------------
    // Registration boundary (driven by the rendering collaborator)
    // ------------------------------------------------------------------

    /// Register a node's geometry handle on mount
    pub fn register_node(&mut self, id: NodeId, handle: H) {
        self.registry.register_node(id, handle);
    }

    /// Unregister a node's geometry handle on unmount
    pub fn unregister_node(&mut self, id: &NodeId) {
        self.registry.unregister_node(id);
    }

    /// Register a port's geometry handle on mount
    pub fn register_port(&mut self, id: PortId, handle: H) {
        self.registry.register_port(id, handle);
    }

    /// Unregister a port's geometry handle on unmount
    pub fn unregister_port(&mut self, id: &PortId) {
        self.registry.unregister_port(id);
    }

    /// Read access to the geometry registry
    pub fn registry(&self) -> &GeometryRegistry<H> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Node movement
    // ------------------------------------------------------------------

    /// Move a placed node, clamping to the container extent.
    ///
    /// No-op (no notification) when the node id is absent.
    pub fn move_node(
        &self,
        node_id: &NodeId,
        coordinates: [f32; 2],
        canvas: &CanvasRect,
        schema: &Schema,
    ) -> Schema {
        if !schema.contains_node(node_id) {
            return schema.clone();
        }
        let next = Schema {
            nodes: store::update_node_coordinates(node_id, canvas.clamp(coordinates), &schema.nodes),
            links: schema.links.clone(),
        };
        self.notify(&next);
        next
    }

    // ------------------------------------------------------------------
    // Drag-to-connect
    // ------------------------------------------------------------------

    /// Start a connection drag from a port.
    ///
    /// Returns `false` when the port's geometry is not registered yet;
    /// the gesture is skipped for that frame.
    pub fn begin_connection(&mut self, port: &Port, canvas: &CanvasRect) -> bool
    where
        H: HandleAnchor,
    {
        self.session.begin(port, &self.registry, canvas)
    }

    /// Update the floating segment for a pointer offset.
    ///
    /// The segment is transient: it is handed to the owner for rendering
    /// and never stored in the schema.
    pub fn drag_connection(&self, offset: [f32; 2]) -> Option<Segment> {
        self.session.drag(offset)
    }

    /// End the connection drag.
    ///
    /// `target` is the port under the pointer, if any. On commit the new
    /// schema is returned and reported; on failure (empty space, origin
    /// port, duplicate pair) the schema is returned unchanged and no
    /// notification fires.
    pub fn end_connection(&mut self, target: Option<&PortId>, schema: &Schema) -> Schema {
        let Some(links) = self.session.finish(target, &schema.links) else {
            return schema.clone();
        };
        if links.len() == schema.links.len() {
            // duplicate pair: silently discarded by policy
            return schema.clone();
        }
        let next = Schema {
            nodes: schema.nodes.clone(),
            links,
        };
        self.notify(&next);
        next
    }

    // ------------------------------------------------------------------
    // Palette spawning
    // ------------------------------------------------------------------

    /// Start a palette drag for the given template key.
    ///
    /// Mints and returns the new node id; the schema is untouched until
    /// the first drag-move. A catalog miss is a configuration error.
    pub fn begin_spawn(&mut self, template_key: &str) -> Result<NodeId, SpawnError> {
        let session = self.spawner.begin(template_key)?;
        let node_id = session.node_id().clone();
        self.spawn = Some(session);
        Ok(node_id)
    }

    /// Apply a palette drag-move: materialize on the first move, then
    /// reposition, always clamped to the container extent.
    pub fn drag_spawn(&self, offset: [f32; 2], canvas: &CanvasRect, schema: &Schema) -> Schema {
        let Some(spawn) = &self.spawn else {
            return schema.clone();
        };
        let next = Schema {
            nodes: spawn.drag(offset, canvas, &schema.nodes),
            links: schema.links.clone(),
        };
        self.notify(&next);
        next
    }

    /// End the palette drag. The node already exists in the schema from
    /// the first move; this only closes the session.
    pub fn end_spawn(&mut self) -> Option<NodeId> {
        self.spawn.take().map(|s| s.node_id().clone())
    }

    /// Drop a spawned node the owner judged invalid (e.g. released over
    /// an invalid zone), through the same path as node deletion.
    pub fn abort_spawn(&mut self, schema: &Schema) -> Schema {
        let Some(session) = self.spawn.take() else {
            return schema.clone();
        };
        debug!(node = %session.node_id(), "spawn aborted");
        self.delete_node(session.node_id().clone(), schema)
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Delete a node, cascading over its links and geometry registrations.
    ///
    /// Publishes the pruned link set before the pruned node list so no
    /// observer ever sees a link whose port is gone. No-op for an unknown
    /// id.
    pub fn delete_node(&mut self, node_id: NodeId, schema: &Schema) -> Schema {
        let Some(outcome) = cascade_removal(&node_id, schema) else {
            return schema.clone();
        };

        self.notify(&Schema {
            nodes: schema.nodes.clone(),
            links: outcome.links.clone(),
        });

        let next = Schema {
            nodes: outcome.nodes,
            links: outcome.links,
        };
        self.notify(&next);

        self.registry.unregister_node(&node_id);
        for port_id in &outcome.removed_ports {
            self.registry.unregister_port(port_id);
        }
        next
    }

    /// Delete a single link (matched in either orientation). No-op for a
    /// link that is not present.
    pub fn delete_link(&self, link: &Link, schema: &Schema) -> Schema {
        let links = store::remove_link(link, &schema.links);
        if links.len() == schema.links.len() {
            return schema.clone();
        }
        let next = Schema {
            nodes: schema.nodes.clone(),
            links,
        };
        self.notify(&next);
        next
    }
}
