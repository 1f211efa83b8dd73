//! Reverse mapping: typed values back into untyped mappings
//!
//! Serialization runs in two mechanical steps: the type reports a name-keyed
//! view of every field, and the engine rewrites that view to external keys
//! against each level's Shape. The same two primitives power object-to-object
//! copying in the forward direction.

use serde_json::Value;

use super::Mapping;
use crate::mapped::Mapped;
use crate::shape::{self, ElementKind, FieldKind, Shape};

/// Returns the name-keyed view of every field of `instance`.
///
/// Every declared field appears in the view; empty optional fields appear as
/// explicit null. Nested values are viewed recursively, also name-keyed.
pub fn field_view<T: Mapped>(instance: &T) -> Mapping {
    let shape = shape::shape_of::<T>();
    let mut view = Mapping::new();
    for field in shape.fields() {
        view.insert(field.name().to_string(), instance.read(field.name()));
    }
    view
}

/// Serializes `instance` to a mapping under its external keys.
///
/// For a canonically-typed mapping `m` containing only keys present in
/// `T`'s Shape, `to_mapping(&construct::<T>(&m)) == m`.
pub fn to_mapping<T: Mapped>(instance: &T) -> Mapping {
    externalize(&shape::shape_of::<T>(), &field_view(instance))
}

/// Rewrites a name-keyed view to `shape`'s external keys, recursively.
pub(crate) fn externalize(shape: &Shape, view: &Mapping) -> Mapping {
    let mut out = Mapping::new();
    for field in shape.fields() {
        let Some(value) = view.get(field.name()) else {
            continue;
        };
        out.insert(
            field.external_key().to_string(),
            externalize_value(field.kind(), value),
        );
    }
    out
}

fn externalize_value(kind: &FieldKind, value: &Value) -> Value {
    match (kind, value) {
        (FieldKind::Nested(shape_ref), Value::Object(map)) => {
            Value::Object(externalize(&shape_ref.resolve(), map))
        }
        (FieldKind::Sequence(ElementKind::Nested(shape_ref)), Value::Array(items)) => {
            let nested = shape_ref.resolve();
            Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(map) => Value::Object(externalize(&nested, map)),
                        other => other.clone(),
                    })
                    .collect(),
            )
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapped::{assign, read};
    use crate::mapper::construct;
    use crate::shape::Field;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Tag {
        label: String,
    }

    impl Mapped for Tag {
        fn fields() -> Vec<Field> {
            vec![Field::string("label")]
        }

        fn external_key(field: &str) -> Option<String> {
            match field {
                "label" => Some("tag_label".to_string()),
                _ => None,
            }
        }

        fn assign(&mut self, field: &str, value: Value) {
            if field == "label" {
                assign::scalar(&mut self.label, value);
            }
        }

        fn read(&self, field: &str) -> Value {
            match field {
                "label" => read::scalar(&self.label),
                _ => Value::Null,
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Post {
        title: Option<String>,
        primary: Tag,
        tags: Vec<Tag>,
    }

    impl Mapped for Post {
        fn fields() -> Vec<Field> {
            vec![
                Field::string("title"),
                Field::nested::<Tag>("primary"),
                Field::nested_seq::<Tag>("tags"),
            ]
        }

        fn assign(&mut self, field: &str, value: Value) {
            match field {
                "title" => assign::opt_scalar(&mut self.title, value),
                "primary" => assign::nested(&mut self.primary, value),
                "tags" => assign::nested_seq(&mut self.tags, value),
                _ => {}
            }
        }

        fn read(&self, field: &str) -> Value {
            match field {
                "title" => read::opt_scalar(&self.title),
                "primary" => read::nested(&self.primary),
                "tags" => read::nested_seq(&self.tags),
                _ => Value::Null,
            }
        }
    }

    #[test]
    fn test_field_view_is_name_keyed() {
        let post = Post {
            title: Some("hello".to_string()),
            primary: Tag {
                label: "rust".to_string(),
            },
            tags: Vec::new(),
        };
        let view = field_view(&post);
        assert_eq!(view["title"], json!("hello"));
        // The view keeps field names even where the external key differs.
        assert_eq!(view["primary"]["label"], json!("rust"));
    }

    #[test]
    fn test_to_mapping_uses_external_keys_at_every_level() {
        let post = Post {
            title: Some("hello".to_string()),
            primary: Tag {
                label: "rust".to_string(),
            },
            tags: vec![Tag {
                label: "mapping".to_string(),
            }],
        };
        let out = to_mapping(&post);
        assert_eq!(out["primary"]["tag_label"], json!("rust"));
        assert_eq!(out["tags"][0]["tag_label"], json!("mapping"));
    }

    #[test]
    fn test_empty_option_serializes_as_explicit_null() {
        let out = to_mapping(&Post::default());
        assert!(out.contains_key("title"));
        assert_eq!(out["title"], Value::Null);
    }

    #[test]
    fn test_empty_sequence_serializes_as_empty_array() {
        let out = to_mapping(&Post::default());
        assert_eq!(out["tags"], json!([]));
    }

    #[test]
    fn test_round_trip_through_renamed_keys() {
        let source = json!({
            "title": "hello",
            "primary": {"tag_label": "rust"},
            "tags": [{"tag_label": "a"}, {"tag_label": "b"}]
        });
        let post: Post = construct(source.as_object().unwrap());
        assert_eq!(Value::Object(to_mapping(&post)), source);
    }
}
