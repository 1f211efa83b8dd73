//! Shape type definitions
//!
//! A Shape is the static descriptor the value mapper walks: an ordered list
//! of fields, each with a declared value kind and an external key. Shapes are
//! immutable after construction and identity-keyed by `TypeId` in the
//! registry.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::registry;
use crate::mapped::Mapped;

/// Scalar value kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Opaque value carried through without coercion
    Raw,
}

impl ScalarKind {
    /// Returns the kind name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::Raw => "raw",
        }
    }
}

/// Reference to a nested mappable type.
///
/// Resolution is lazy: building a Shape only records the thunk, so
/// self-referential types never recurse while their own Shape is being
/// built. The thunk goes through the registry, which makes repeated
/// resolution a cache hit.
#[derive(Clone, Copy)]
pub struct ShapeRef {
    type_id: TypeId,
    type_name: &'static str,
    resolve: fn() -> Arc<Shape>,
}

impl ShapeRef {
    /// Creates a reference to `T`'s Shape.
    pub fn of<T: Mapped>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            resolve: registry::shape_of::<T>,
        }
    }

    /// Returns the nested type's identity.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the nested type's name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Resolves the nested Shape through the registry.
    pub fn resolve(&self) -> Arc<Shape> {
        (self.resolve)()
    }
}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeRef({})", self.type_name)
    }
}

/// Declared kind of a field's value.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A primitive value
    Scalar(ScalarKind),
    /// A value that is itself mappable
    Nested(ShapeRef),
    /// A homogeneous sequence
    Sequence(ElementKind),
}

/// Element kind of a sequence field.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    /// Sequence of primitives
    Scalar(ScalarKind),
    /// Sequence of mappable values
    Nested(ShapeRef),
}

/// One mappable field: name, declared kind, external key.
///
/// The external key defaults to the field name; the registry rewrites it
/// through the type's `external_key` hook when the Shape is built.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    external_key: String,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            external_key: name.to_string(),
        }
    }

    /// Creates a scalar field of the given kind.
    pub fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self::new(name, FieldKind::Scalar(kind))
    }

    /// Creates a string field.
    pub fn string(name: &'static str) -> Self {
        Self::scalar(name, ScalarKind::String)
    }

    /// Creates an integer field.
    pub fn int(name: &'static str) -> Self {
        Self::scalar(name, ScalarKind::Int)
    }

    /// Creates a float field.
    pub fn float(name: &'static str) -> Self {
        Self::scalar(name, ScalarKind::Float)
    }

    /// Creates a boolean field.
    pub fn bool(name: &'static str) -> Self {
        Self::scalar(name, ScalarKind::Bool)
    }

    /// Creates a raw field whose value is carried through uncoerced.
    pub fn raw(name: &'static str) -> Self {
        Self::scalar(name, ScalarKind::Raw)
    }

    /// Creates a field holding a nested mappable value.
    pub fn nested<T: Mapped>(name: &'static str) -> Self {
        Self::new(name, FieldKind::Nested(ShapeRef::of::<T>()))
    }

    /// Creates a field holding a sequence of scalars.
    pub fn scalar_seq(name: &'static str, element: ScalarKind) -> Self {
        Self::new(name, FieldKind::Sequence(ElementKind::Scalar(element)))
    }

    /// Creates a field holding a sequence of nested mappable values.
    pub fn nested_seq<T: Mapped>(name: &'static str) -> Self {
        Self::new(name, FieldKind::Sequence(ElementKind::Nested(ShapeRef::of::<T>())))
    }

    /// Returns the field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns the key this field is read from and written to in a mapping.
    pub fn external_key(&self) -> &str {
        &self.external_key
    }

    pub(crate) fn set_external_key(&mut self, key: String) {
        self.external_key = key;
    }
}

/// Static descriptor of a mappable type.
///
/// Field order is the declaration order reported by the type, so two
/// resolutions of the same type are reproducible.
#[derive(Debug, Clone)]
pub struct Shape {
    type_name: &'static str,
    fields: Vec<Field>,
}

impl Shape {
    pub(crate) fn new(type_name: &'static str, fields: Vec<Field>) -> Self {
        Self { type_name, fields }
    }

    /// Returns the described type's name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the type has no mappable fields. Not an error.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the descriptor as JSON for diagnostics.
    pub fn describe(&self) -> Value {
        let fields: Vec<Value> = self
            .fields
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "key": f.external_key,
                    "kind": kind_label(&f.kind),
                })
            })
            .collect();
        json!({ "type": self.type_name, "fields": fields })
    }
}

fn kind_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Scalar(k) => k.type_name().to_string(),
        FieldKind::Nested(r) => format!("nested({})", r.type_name()),
        FieldKind::Sequence(ElementKind::Scalar(k)) => format!("[{}]", k.type_name()),
        FieldKind::Sequence(ElementKind::Nested(r)) => format!("[nested({})]", r.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as Json;

    #[derive(Default)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Mapped for Point {
        fn fields() -> Vec<Field> {
            vec![Field::int("x"), Field::int("y")]
        }

        fn assign(&mut self, field: &str, value: Json) {
            match field {
                "x" => crate::mapped::assign::scalar(&mut self.x, value),
                "y" => crate::mapped::assign::scalar(&mut self.y, value),
                _ => {}
            }
        }

        fn read(&self, field: &str) -> Json {
            match field {
                "x" => crate::mapped::read::scalar(&self.x),
                "y" => crate::mapped::read::scalar(&self.y),
                _ => Json::Null,
            }
        }
    }

    #[test]
    fn test_external_key_defaults_to_name() {
        let field = Field::string("name");
        assert_eq!(field.name(), "name");
        assert_eq!(field.external_key(), "name");
    }

    #[test]
    fn test_field_constructors_declare_kinds() {
        assert!(matches!(
            Field::string("s").kind(),
            FieldKind::Scalar(ScalarKind::String)
        ));
        assert!(matches!(
            Field::int("i").kind(),
            FieldKind::Scalar(ScalarKind::Int)
        ));
        assert!(matches!(
            Field::nested::<Point>("p").kind(),
            FieldKind::Nested(_)
        ));
        assert!(matches!(
            Field::scalar_seq("tags", ScalarKind::String).kind(),
            FieldKind::Sequence(ElementKind::Scalar(ScalarKind::String))
        ));
        assert!(matches!(
            Field::nested_seq::<Point>("points").kind(),
            FieldKind::Sequence(ElementKind::Nested(_))
        ));
    }

    #[test]
    fn test_shape_lookup_and_order() {
        let shape = Shape::new("Point", Point::fields());
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.fields()[0].name(), "x");
        assert_eq!(shape.fields()[1].name(), "y");
        assert!(shape.field("x").is_some());
        assert!(shape.field("z").is_none());
    }

    #[test]
    fn test_empty_shape_is_not_an_error() {
        let shape = Shape::new("Unit", Vec::new());
        assert!(shape.is_empty());
        assert_eq!(shape.len(), 0);
    }

    #[test]
    fn test_describe_lists_fields() {
        let shape = Shape::new("Point", Point::fields());
        let doc = shape.describe();
        assert_eq!(doc["type"], "Point");
        assert_eq!(doc["fields"][0]["name"], "x");
        assert_eq!(doc["fields"][0]["kind"], "int");
    }

    #[test]
    fn test_shape_ref_is_lazy() {
        // Constructing the reference must not resolve the Shape.
        let r = ShapeRef::of::<Point>();
        assert_eq!(r.type_id(), std::any::TypeId::of::<Point>());
        assert!(r.type_name().contains("Point"));
    }
}
