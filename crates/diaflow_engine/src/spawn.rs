// SPDX-License-Identifier: MIT OR Apache-2.0
//! Palette-driven node spawning.
//!
//! Spawning is a two-phase protocol. Drag-start mints the node id but
//! touches nothing; the first drag-move materializes the template into the
//! node list with freshly-sequenced port ids; every later move just
//! repositions it. Drag-end finalizes nothing — the node already exists.

use crate::geometry::CanvasRect;
use diaflow_schema::{store, Node, NodeId, NodeTemplate, TemplateCatalog};
use tracing::{debug, trace};

/// Error while spawning from the palette
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// The requested template key is not in the catalog. The catalog is
    /// static caller-provided configuration, so this is a setup bug, not
    /// a runtime condition to recover from.
    #[error("unknown template type: {0}")]
    UnknownTemplate(String),
}

/// One in-progress palette drag
#[derive(Debug, Clone)]
pub struct SpawnSession {
    template: NodeTemplate,
    node_id: NodeId,
}

impl SpawnSession {
    /// Id minted for the node being spawned
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Apply a drag-move.
    ///
    /// Coordinates are the template's palette position minus the pointer
    /// offset, clamped to the container extent. On the first move the
    /// template is materialized and appended; afterwards the node is
    /// repositioned through the store.
    pub fn drag(&self, offset: [f32; 2], canvas: &CanvasRect, nodes: &[Node]) -> Vec<Node> {
        let coordinates = canvas.clamp([
            self.template.coordinates[0] - offset[0],
            self.template.coordinates[1] - offset[1],
        ]);

        if nodes.iter().any(|node| node.id == self.node_id) {
            trace!(node = %self.node_id, x = coordinates[0], y = coordinates[1], "spawned node moved");
            return store::update_node_coordinates(&self.node_id, coordinates, nodes);
        }

        let sequence_start = store::next_port_sequence(nodes);
        debug!(
            node = %self.node_id,
            template = %self.template.key(),
            sequence_start,
            "node materialized from palette"
        );
        let mut next = nodes.to_vec();
        next.push(
            self.template
                .materialize(self.node_id.clone(), sequence_start, coordinates),
        );
        next
    }
}

/// Converts palette drags into new graph nodes
#[derive(Debug, Clone, Default)]
pub struct PaletteSpawner {
    catalog: TemplateCatalog,
}

impl PaletteSpawner {
    /// Create a spawner over a template catalog
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// The template catalog backing this spawner
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Phase one: start a palette drag.
    ///
    /// Mints the node id without adding anything to the schema. Fails only
    /// on a catalog miss, which is a configuration error.
    pub fn begin(&self, template_key: &str) -> Result<SpawnSession, SpawnError> {
        let template = self
            .catalog
            .get(template_key)
            .ok_or_else(|| SpawnError::UnknownTemplate(template_key.to_owned()))?;
        let node_id = NodeId::generate();
        debug!(node = %node_id, template = template_key, "palette drag started");
        Ok(SpawnSession {
            template: template.clone(),
            node_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diaflow_schema::{PortId, Schema};

    fn canvas() -> CanvasRect {
        CanvasRect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn spawner() -> PaletteSpawner {
        PaletteSpawner::new(TemplateCatalog::logic())
    }

    fn schema_with_ports(max_sequence: u32) -> Schema {
        let spawn = spawner().begin("function:and").unwrap();
        // Seed a node whose highest port suffix is `max_sequence`
        let nodes = spawn.drag([0.0, 0.0], &canvas(), &[]);
        let mut schema = Schema { nodes, links: Vec::new() };
        schema.nodes[0].outputs[0].id = PortId::sequenced(max_sequence);
        schema.nodes[0].inputs[0].id = PortId::sequenced(1);
        schema
    }

    #[test]
    fn test_begin_unknown_template_is_fatal() {
        let err = spawner().begin("teleport").unwrap_err();
        assert!(matches!(err, SpawnError::UnknownTemplate(key) if key == "teleport"));
    }

    #[test]
    fn test_begin_adds_nothing() {
        let spawn = spawner().begin("inject").unwrap();
        // the session holds only the minted id; the caller's nodes are
        // untouched until the first move
        assert!(spawn.node_id().0.starts_with("node-"));
    }

    #[test]
    fn test_first_drag_materializes_node() {
        let spawn = spawner().begin("inject").unwrap();
        let nodes = spawn.drag([-100.0, -50.0], &canvas(), &[]);

        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!(node.id, *spawn.node_id());
        assert_eq!(node.node_type, "inject");
        // inject's palette slot is (0, 0); offset of (-100, -50) lands at (100, 50)
        assert_eq!(node.coordinates, [100.0, 50.0]);
        assert_eq!(node.outputs[0].id, PortId::sequenced(0));
    }

    #[test]
    fn test_later_drags_reposition_only() {
        let spawn = spawner().begin("inject").unwrap();
        let nodes = spawn.drag([-100.0, -50.0], &canvas(), &[]);
        let moved = spawn.drag([-200.0, -80.0], &canvas(), &nodes);

        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].coordinates, [200.0, 80.0]);
        assert_eq!(moved[0].outputs[0].id, nodes[0].outputs[0].id);
    }

    #[test]
    fn test_drag_clamps_to_container() {
        let spawn = spawner().begin("inject").unwrap();
        let nodes = spawn.drag([50.0, -700.0], &canvas(), &[]);
        assert_eq!(nodes[0].coordinates, [0.0, 600.0]);
    }

    #[test]
    fn test_port_sequence_continues_past_existing_max() {
        let schema = schema_with_ports(5);
        let spawn = spawner().begin("inject").unwrap();
        let nodes = spawn.drag([0.0, 0.0], &canvas(), &schema.nodes);

        assert_eq!(nodes[1].outputs[0].id, PortId::sequenced(6));
    }

    #[test]
    fn test_spawned_port_ids_stay_pairwise_distinct() {
        let mut schema = Schema::default();
        for key in ["inject", "debug", "function:and", "function:or"] {
            let spawn = spawner().begin(key).unwrap();
            schema.nodes = spawn.drag([0.0, 0.0], &canvas(), &schema.nodes);
        }
        assert!(schema.validate().is_ok());
        assert_eq!(schema.port_ids().count(), 6);
    }
}
