//! Field assignment helpers for `Mapped::assign` implementations
//!
//! Every helper follows the best-effort contract: `Value::Null` resets the
//! field to its empty representation, a value of the wrong shape leaves the
//! field untouched, and nothing here can fail.

use serde_json::Value;

use super::{Mapped, Scalar};
use crate::mapper;

/// Assigns a scalar field. Null resets to the type's default.
pub fn scalar<T: Scalar>(slot: &mut T, value: Value) {
    if value.is_null() {
        *slot = T::default();
    } else if let Some(v) = T::from_value(&value) {
        *slot = v;
    }
}

/// Assigns an optional scalar field. Null clears it.
pub fn opt_scalar<T: Scalar>(slot: &mut Option<T>, value: Value) {
    if value.is_null() {
        *slot = None;
    } else if let Some(v) = T::from_value(&value) {
        *slot = Some(v);
    }
}

/// Assigns a nested field, populating the existing value in place.
///
/// In-place population preserves the nested value's identity across repeated
/// applications and keeps partial-update semantics for its fields.
pub fn nested<T: Mapped>(slot: &mut T, value: Value) {
    match value {
        Value::Null => *slot = T::default(),
        Value::Object(map) => mapper::populate(slot, &map),
        _ => {}
    }
}

/// Assigns an optional nested field.
///
/// An already-present nested value is populated in place; `None` constructs
/// a fresh one. Null clears the field.
pub fn opt_nested<T: Mapped>(slot: &mut Option<T>, value: Value) {
    match value {
        Value::Null => *slot = None,
        Value::Object(map) => match slot {
            Some(existing) => mapper::populate(existing, &map),
            None => *slot = Some(mapper::construct(&map)),
        },
        _ => {}
    }
}

/// Replaces a scalar sequence field. Null resets to an empty sequence.
pub fn scalar_seq<T: Scalar>(slot: &mut Vec<T>, value: Value) {
    match value {
        Value::Null => slot.clear(),
        Value::Array(items) => {
            *slot = items.iter().filter_map(T::from_value).collect();
        }
        _ => {}
    }
}

/// Replaces a nested sequence field. Null resets to an empty sequence.
pub fn nested_seq<T: Mapped>(slot: &mut Vec<T>, value: Value) {
    match value {
        Value::Null => slot.clear(),
        Value::Array(items) => {
            *slot = items
                .iter()
                .filter_map(|item| item.as_object().map(mapper::construct::<T>))
                .collect();
        }
        _ => {}
    }
}
