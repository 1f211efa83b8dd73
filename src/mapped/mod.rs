//! The opt-in trait mappable types implement
//!
//! `Mapped` replaces runtime property introspection with a declarative field
//! table: the type lists its fields once, and routes per-field assignment
//! and readback through the one-line helpers in [`assign`] and [`read`].
//! The mapping engine drives everything else: key resolution, the
//! absent/null policy, coercion, and recursion into nested shapes.

pub mod assign;
pub mod read;

use serde_json::Value;

use crate::shape::Field;

/// A type the value mapper can populate and serialize.
///
/// Implementations are declarative. `fields` returns the field table in
/// declaration order; `assign` and `read` dispatch on the field name.
/// `external_key` optionally renames fields for the mapping side.
pub trait Mapped: Default + 'static {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<Field>;

    /// Per-type external key override; `None` keeps the field name.
    fn external_key(field: &str) -> Option<String> {
        let _ = field;
        None
    }

    /// Assigns one field from an engine-coerced value.
    ///
    /// `Value::Null` resets the field to its empty representation. Unknown
    /// field names are ignored.
    fn assign(&mut self, field: &str, value: Value);

    /// Reads one field back as a name-keyed mapping value.
    ///
    /// Empty optional fields read as `Value::Null`; unknown field names read
    /// as `Value::Null`.
    fn read(&self, field: &str) -> Value;
}

/// Bridge between native scalar types and mapping values.
///
/// The engine hands `assign` values already coerced to the declared
/// [`crate::shape::ScalarKind`], so `from_value` only extracts; a residual
/// mismatch reads as `None` and leaves the field untouched.
pub trait Scalar: Default {
    /// Extracts the native value, if the mapping value holds one.
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;

    /// Renders the native value as a mapping value.
    fn to_value(&self) -> Value;
}

impl Scalar for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Scalar for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for u64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_u64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

// The Raw kind: any mapping value carried through as-is.
impl Scalar for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}
