//! Schema Resolver subsystem
//!
//! Discovers the mappable fields of a type: name, declared value kind, and
//! external key. Shapes are built once per type through the [`crate::Mapped`]
//! field table, cached process-wide, and shared behind `Arc`.
//!
//! # Design Principles
//!
//! - Resolution never fails for a well-formed type; a type with zero fields
//!   yields an empty Shape
//! - Field order is declaration order, so repeated resolutions are
//!   reproducible
//! - Concurrent first resolutions converge on a single Shape
//!   (first-committed-wins)
//! - Nested shape references resolve lazily, bounding self-referential types

mod errors;
mod registry;
mod types;

pub use errors::{ShapeError, ShapeResult};
pub use registry::{external_key, shape_of, try_shape_of};
pub use types::{ElementKind, Field, FieldKind, ScalarKind, Shape, ShapeRef};
