//! Forward mapping: untyped mappings into typed values
//!
//! The engine walks the target's Shape and applies the best-effort policy
//! per field: absent keys leave the field untouched, null resets it to its
//! empty representation, uncoercible values are skipped with a debug log.
//! No input, however malformed, makes this path fail.

use log::debug;
use serde_json::Value;

use super::coerce;
use super::serialize::{externalize, field_view};
use super::Mapping;
use crate::mapped::Mapped;
use crate::shape::{self, ElementKind, FieldKind};

/// Populates `target`'s fields from `source`.
///
/// Partial-update semantics: keys absent from `source` never clear existing
/// field values, so applying `{}` is a no-op and applying the same mapping
/// twice equals applying it once.
pub fn populate<T: Mapped>(target: &mut T, source: &Mapping) {
    let shape = shape::shape_of::<T>();
    for field in shape.fields() {
        let Some(raw) = source.get(field.external_key()) else {
            continue;
        };
        if raw.is_null() {
            target.assign(field.name(), Value::Null);
            continue;
        }
        match field.kind() {
            FieldKind::Scalar(kind) => match coerce::scalar(*kind, raw) {
                Some(value) => target.assign(field.name(), value),
                None => debug!(
                    "skipping field '{}' on {}: cannot coerce {} to {}",
                    field.name(),
                    shape.type_name(),
                    coerce::json_type_name(raw),
                    kind.type_name()
                ),
            },
            FieldKind::Nested(_) => {
                if raw.is_object() {
                    target.assign(field.name(), raw.clone());
                } else {
                    debug!(
                        "skipping field '{}' on {}: expected object, got {}",
                        field.name(),
                        shape.type_name(),
                        coerce::json_type_name(raw)
                    );
                }
            }
            FieldKind::Sequence(element) => match raw.as_array() {
                Some(items) => {
                    let coerced = coerce_elements(*element, items, field.name(), shape.type_name());
                    target.assign(field.name(), Value::Array(coerced));
                }
                None => debug!(
                    "skipping field '{}' on {}: expected array, got {}",
                    field.name(),
                    shape.type_name(),
                    coerce::json_type_name(raw)
                ),
            },
        }
    }
}

/// Coerces sequence elements to the declared element kind, preserving source
/// order and dropping non-conforming elements.
fn coerce_elements(
    element: ElementKind,
    items: &[Value],
    field: &str,
    type_name: &str,
) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let coerced = match element {
            ElementKind::Scalar(kind) => coerce::scalar(kind, item),
            ElementKind::Nested(_) => item.is_object().then(|| item.clone()),
        };
        match coerced {
            Some(value) => out.push(value),
            None => debug!(
                "dropping element {} of '{}' on {}: got {}",
                index,
                field,
                type_name,
                coerce::json_type_name(item)
            ),
        }
    }
    out
}

/// Constructs a new default-initialized `T` and populates it from `source`.
pub fn construct<T: Mapped>(source: &Mapping) -> T {
    let mut target = T::default();
    populate(&mut target, source);
    target
}

/// Result of [`construct_all`]: the constructed items plus the indices of
/// source elements that were not object-shaped.
///
/// The skip report makes a partial result explicit instead of silently
/// shortening the output sequence.
#[derive(Debug)]
pub struct ConstructedSeq<T> {
    /// Constructed items, in source order
    pub items: Vec<T>,
    /// Indices of skipped source elements, ascending
    pub skipped: Vec<usize>,
}

impl<T> ConstructedSeq<T> {
    /// True when every source element produced an item.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of constructed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items were constructed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Discards the skip report and keeps the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Element-wise [`construct`] over `sources`, preserving order.
pub fn construct_all<T: Mapped>(sources: &[Value]) -> ConstructedSeq<T> {
    let mut items = Vec::with_capacity(sources.len());
    let mut skipped = Vec::new();
    for (index, value) in sources.iter().enumerate() {
        match value.as_object() {
            Some(map) => items.push(construct(map)),
            None => {
                debug!(
                    "skipping element {}: expected object, got {}",
                    index,
                    coerce::json_type_name(value)
                );
                skipped.push(index);
            }
        }
    }
    ConstructedSeq { items, skipped }
}

/// Populates `target` from another mapped value.
///
/// Fields are matched by name at every nesting level: the source's
/// name-keyed field view is rewritten to the target type's external keys and
/// fed through [`populate`]. Copied nested values never alias the source's.
pub fn apply_from<T: Mapped, S: Mapped>(target: &mut T, source: &S) {
    let view = field_view(source);
    let mapping = externalize(&shape::shape_of::<T>(), &view);
    populate(target, &mapping);
}

/// Constructs a new `T` from another mapped value.
pub fn construct_from<T: Mapped, S: Mapped>(source: &S) -> T {
    let mut target = T::default();
    apply_from(&mut target, source);
    target
}
