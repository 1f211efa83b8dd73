//! Permissive scalar coercion
//!
//! Normalizes a raw mapping value to its declared scalar kind. `None` means
//! the value cannot unambiguously represent the kind; the caller skips the
//! field. Coercion favors compatibility over strictness: numeric strings
//! become numbers, numbers become strings, `"true"`/`"false"` and 0/1
//! become booleans, integral floats become integers.

use serde_json::Value;

use crate::shape::ScalarKind;

/// Coerces `raw` to `kind`, returning the normalized value.
pub(crate) fn scalar(kind: ScalarKind, raw: &Value) -> Option<Value> {
    match kind {
        ScalarKind::String => match raw {
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Number(n) => Some(Value::String(n.to_string())),
            _ => None,
        },
        ScalarKind::Int => match raw {
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Some(raw.clone())
                } else {
                    n.as_f64()
                        .filter(|f| {
                            f.fract() == 0.0
                                && *f >= i64::MIN as f64
                                && *f <= i64::MAX as f64
                        })
                        .map(|f| Value::from(f as i64))
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        ScalarKind::Float => match raw {
            Value::Number(n) => n.as_f64().map(Value::from),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::from),
            _ => None,
        },
        ScalarKind::Bool => match raw {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            _ => None,
        },
        ScalarKind::Raw => Some(raw.clone()),
    }
}

/// Returns the JSON type name for debug logs.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
