// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph interaction engine for diaflow.
//!
//! This crate turns user gestures into schema transitions:
//! - [`GeometryRegistry`] maps node/port ids to the opaque geometry
//!   handles the rendering collaborator registers on mount
//! - [`ConnectionSession`] runs a single drag-to-connect gesture
//! - [`PaletteSpawner`] materializes nodes dragged off the template palette
//! - [`cascade`] removes a node together with its links and registrations
//! - [`DiagramEngine`] ties the pieces together behind one facade and a
//!   change-notification callback
//!
//! The engine never owns the diagram: every operation takes the current
//! [`diaflow_schema::Schema`] and returns the next one. All work happens
//! synchronously inside the caller's event handler.

pub mod cascade;
pub mod engine;
pub mod geometry;
pub mod session;
pub mod spawn;

pub use engine::DiagramEngine;
pub use geometry::{CanvasRect, GeometryRegistry, HandleAnchor, SimpleHandle};
pub use session::{ConnectionSession, Segment};
pub use spawn::{PaletteSpawner, SpawnError, SpawnSession};
