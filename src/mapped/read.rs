//! Field read helpers for `Mapped::read` implementations
//!
//! Values come back name-keyed; the serializer rewrites them to external
//! keys against each level's Shape. Empty optional fields read as explicit
//! null so serialization round-trips the null policy.

use serde_json::Value;

use super::{Mapped, Scalar};
use crate::mapper;

/// Reads a scalar field.
pub fn scalar<T: Scalar>(slot: &T) -> Value {
    slot.to_value()
}

/// Reads an optional scalar field; `None` reads as null.
pub fn opt_scalar<T: Scalar>(slot: &Option<T>) -> Value {
    match slot {
        Some(v) => v.to_value(),
        None => Value::Null,
    }
}

/// Reads a nested field as its name-keyed view.
pub fn nested<T: Mapped>(slot: &T) -> Value {
    Value::Object(mapper::field_view(slot))
}

/// Reads an optional nested field; `None` reads as null.
pub fn opt_nested<T: Mapped>(slot: &Option<T>) -> Value {
    match slot {
        Some(v) => Value::Object(mapper::field_view(v)),
        None => Value::Null,
    }
}

/// Reads a scalar sequence field, preserving order.
pub fn scalar_seq<T: Scalar>(slot: &[T]) -> Value {
    Value::Array(slot.iter().map(Scalar::to_value).collect())
}

/// Reads a nested sequence field, preserving order.
pub fn nested_seq<T: Mapped>(slot: &[T]) -> Value {
    Value::Array(
        slot.iter()
            .map(|item| Value::Object(mapper::field_view(item)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opt_scalar_none_reads_null() {
        let nickname: Option<String> = None;
        assert_eq!(opt_scalar(&nickname), Value::Null);
        assert_eq!(opt_scalar(&Some(7i64)), json!(7));
    }

    #[test]
    fn test_scalar_seq_preserves_order() {
        let tags = vec!["x".to_string(), "y".to_string()];
        assert_eq!(scalar_seq(&tags), json!(["x", "y"]));
    }
}
