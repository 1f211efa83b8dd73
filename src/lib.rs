//! objmap - schema-free mapping between untyped JSON mappings and typed values
//!
//! Types opt in by implementing [`Mapped`]: a declarative field table plus
//! one-line-per-field assignment and readback. The engine handles the rest —
//! external key resolution, permissive coercion, recursion into nested
//! shapes and sequences, and the reverse serialization path. Mapping is
//! best-effort and never fails; Shapes are resolved once per type and cached
//! for the process lifetime.

pub mod mapped;
pub mod mapper;
pub mod shape;

pub use mapped::{Mapped, Scalar};
pub use mapper::{
    apply_from, construct, construct_all, construct_from, field_view, populate, to_mapping,
    ConstructedSeq, Mapping,
};
pub use shape::{
    external_key, shape_of, try_shape_of, Field, FieldKind, ScalarKind, Shape, ShapeError,
};
