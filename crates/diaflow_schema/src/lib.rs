// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diagram schema for diaflow.
//!
//! This crate defines the serializable state of a node-link diagram:
//! - Typed nodes with ordered input/output ports
//! - Undirected links between globally-unique port ids
//! - The [`Schema`] container exchanged with the engine's owner
//!
//! All state transitions are expressed as pure transforms in [`store`]:
//! every operation takes the current collections and returns fresh ones,
//! never mutating its input. Template descriptors for palette-driven node
//! creation live in [`template`].

pub mod link;
pub mod node;
pub mod port;
pub mod schema;
pub mod store;
pub mod template;

pub use link::Link;
pub use node::{Node, NodeId};
pub use port::{Alignment, Port, PortId};
pub use schema::{Schema, SchemaError};
pub use template::{NodeTemplate, PortTemplate, TemplateCatalog};
