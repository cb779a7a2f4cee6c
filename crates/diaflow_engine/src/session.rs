// SPDX-License-Identifier: MIT OR Apache-2.0
//! The drag-to-connect state machine.
//!
//! One session exists system-wide. It captures the origin port at
//! drag-start, emits transient [`Segment`]s while the pointer moves, and
//! on release either commits a link through the store or discards the
//! gesture with no schema mutation.

use crate::geometry::{CanvasRect, GeometryRegistry, HandleAnchor};
use diaflow_schema::{store, Alignment, Link, Port, PortId};
use tracing::{debug, trace};

/// A transient, uncommitted connection being dragged.
///
/// Never part of the schema; reported to the owner on every drag-move so
/// the floating curve can be rendered, and dropped on commit or failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Segment id, derived from the origin port (`segment-<portId>`)
    pub id: String,
    /// Origin port
    pub from: PortId,
    /// Floating endpoint, in canvas coordinates
    pub to: [f32; 2],
    /// Alignment of the origin port (drives curve direction)
    pub alignment: Alignment,
}

/// State machine for a single drag-to-connect gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionSession {
    /// No gesture in progress
    #[default]
    Idle,
    /// A segment is being dragged from a port
    Dragging {
        /// Origin port id
        origin: PortId,
        /// Origin port position, canvas-relative
        origin_coordinates: [f32; 2],
        /// Origin port alignment
        alignment: Alignment,
    },
}

impl ConnectionSession {
    /// Create a new idle session
    pub fn new() -> Self {
        Self::Idle
    }

    /// Whether a gesture is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Start a gesture from a port.
    ///
    /// Resolves the port's canvas-relative origin through the registry;
    /// when the port is not mounted yet the start is skipped and the
    /// session stays idle (`false`). Starting while already dragging
    /// implicitly fails the previous gesture.
    pub fn begin<H: HandleAnchor>(
        &mut self,
        port: &Port,
        registry: &GeometryRegistry<H>,
        canvas: &CanvasRect,
    ) -> bool {
        if self.is_dragging() {
            debug!(port = %port.id, "drag started while dragging, discarding previous session");
        }
        let Some(origin_coordinates) = registry.port_origin(&port.id, canvas) else {
            trace!(port = %port.id, "port not mounted, skipping drag start");
            *self = Self::Idle;
            return false;
        };
        debug!(port = %port.id, "connection drag started");
        *self = Self::Dragging {
            origin: port.id.clone(),
            origin_coordinates,
            alignment: port.alignment,
        };
        true
    }

    /// Recompute the floating segment for a pointer offset.
    ///
    /// The gesture primitive reports `offset = start - current`, so the
    /// endpoint is the origin minus the offset. Returns `None` when idle.
    pub fn drag(&self, offset: [f32; 2]) -> Option<Segment> {
        let Self::Dragging {
            origin,
            origin_coordinates,
            alignment,
        } = self
        else {
            return None;
        };
        let to = [
            origin_coordinates[0] - offset[0],
            origin_coordinates[1] - offset[1],
        ];
        trace!(port = %origin, x = to[0], y = to[1], "segment moved");
        Some(Segment {
            id: format!("segment-{origin}"),
            from: origin.clone(),
            to,
            alignment: *alignment,
        })
    }

    /// End the gesture.
    ///
    /// Over a valid target port this commits the link (subject to the
    /// store's symmetric dedup) and returns the new link set; over empty
    /// space, the origin port itself, or before any drag started, it
    /// returns `None` and nothing is mutated. The session is idle
    /// afterwards either way.
    pub fn finish(&mut self, target: Option<&PortId>, links: &[Link]) -> Option<Vec<Link>> {
        let session = std::mem::take(self);
        let Self::Dragging { origin, .. } = session else {
            return None;
        };
        match target {
            Some(target) if *target != origin => {
                debug!(input = %origin, output = %target, "connection committed");
                Some(store::add_link(&origin, target, links))
            }
            _ => {
                debug!(port = %origin, "connection discarded");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SimpleHandle;

    fn mounted_registry() -> GeometryRegistry<SimpleHandle> {
        let mut registry = GeometryRegistry::new();
        registry.register_port(PortId::from("port-0"), SimpleHandle { x: 150.0, y: 60.0 });
        registry.register_port(PortId::from("port-1"), SimpleHandle { x: 400.0, y: 90.0 });
        registry
    }

    fn canvas() -> CanvasRect {
        CanvasRect::new(50.0, 10.0, 800.0, 600.0)
    }

    fn origin_port() -> Port {
        Port::new(PortId::from("port-0"), Alignment::Right)
    }

    #[test]
    fn test_begin_captures_canvas_relative_origin() {
        let mut session = ConnectionSession::new();
        assert!(session.begin(&origin_port(), &mounted_registry(), &canvas()));

        match &session {
            ConnectionSession::Dragging {
                origin,
                origin_coordinates,
                alignment,
            } => {
                assert_eq!(*origin, PortId::from("port-0"));
                assert_eq!(*origin_coordinates, [100.0, 50.0]);
                assert_eq!(*alignment, Alignment::Right);
            }
            ConnectionSession::Idle => panic!("session should be dragging"),
        }
    }

    #[test]
    fn test_begin_skips_unmounted_port() {
        let mut session = ConnectionSession::new();
        let registry: GeometryRegistry<SimpleHandle> = GeometryRegistry::new();
        assert!(!session.begin(&origin_port(), &registry, &canvas()));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_begin_while_dragging_replaces_session() {
        let registry = mounted_registry();
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &registry, &canvas());
        session.begin(
            &Port::new(PortId::from("port-1"), Alignment::Left),
            &registry,
            &canvas(),
        );

        let segment = session.drag([0.0, 0.0]).unwrap();
        assert_eq!(segment.from, PortId::from("port-1"));
    }

    #[test]
    fn test_drag_moves_endpoint_against_offset() {
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &mounted_registry(), &canvas());

        // offset = start - current, so a pointer moving right/down yields
        // a negative offset and the endpoint moves right/down
        let segment = session.drag([-30.0, -20.0]).unwrap();
        assert_eq!(segment.to, [130.0, 70.0]);
        assert_eq!(segment.id, "segment-port-0");
        assert_eq!(segment.alignment, Alignment::Right);
    }

    #[test]
    fn test_drag_while_idle_yields_nothing() {
        let session = ConnectionSession::new();
        assert!(session.drag([1.0, 1.0]).is_none());
    }

    #[test]
    fn test_finish_over_target_commits_link() {
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &mounted_registry(), &canvas());

        let links = session.finish(Some(&PortId::from("port-1")), &[]).unwrap();
        assert_eq!(
            links,
            vec![Link::new(PortId::from("port-0"), PortId::from("port-1"))]
        );
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_finish_over_empty_space_discards() {
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &mounted_registry(), &canvas());

        assert!(session.finish(None, &[]).is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_finish_on_origin_port_discards() {
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &mounted_registry(), &canvas());

        assert!(session.finish(Some(&PortId::from("port-0")), &[]).is_none());
    }

    #[test]
    fn test_finish_while_idle_is_noop() {
        let mut session = ConnectionSession::new();
        assert!(session.finish(Some(&PortId::from("port-1")), &[]).is_none());
    }

    #[test]
    fn test_commit_respects_symmetric_dedup() {
        let existing = vec![Link::new(PortId::from("port-1"), PortId::from("port-0"))];
        let mut session = ConnectionSession::new();
        session.begin(&origin_port(), &mounted_registry(), &canvas());

        let links = session.finish(Some(&PortId::from("port-1")), &existing).unwrap();
        assert_eq!(links, existing);
    }
}
