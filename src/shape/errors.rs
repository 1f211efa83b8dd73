//! Shape construction errors
//!
//! The mapping path itself never fails; these surface programmer errors in a
//! type's field table.

use thiserror::Error;

/// Errors raised while building a Shape descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Two fields of one type share a name. Field names must be unique
    /// within a Shape.
    #[error("duplicate field '{field}' in shape for {type_name}")]
    DuplicateField {
        /// The type whose field table is malformed
        type_name: &'static str,
        /// The repeated field name
        field: &'static str,
    },
}

/// Result type for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
