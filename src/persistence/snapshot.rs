//! Snapshot merge and projection over JSON values
//!
//! Both operations work on the serialized form of the state, so picking
//! fields by name needs no reflection on the state type.

use serde_json::{Map, Value};

/// Overlay a restored snapshot onto the default state.
///
/// Snapshot fields win; fields only present in `defaults` are kept. When
/// either side is not a JSON object the snapshot replaces the defaults
/// wholesale.
pub fn merge(snapshot: Value, defaults: Value) -> Value {
    match (snapshot, defaults) {
        (Value::Object(saved), Value::Object(mut merged)) => {
            for (field, value) in saved {
                merged.insert(field, value);
            }
            Value::Object(merged)
        }
        (snapshot, _) => snapshot,
    }
}

/// Build a fresh object holding only the named fields of `state`.
///
/// Names the state does not have are skipped. A non-object state has no
/// fields, so the projection is empty.
pub fn project(state: &Value, fields: &[String]) -> Value {
    let mut picked = Map::new();
    if let Value::Object(source) = state {
        for field in fields {
            if let Some(value) = source.get(field) {
                picked.insert(field.clone(), value.clone());
            }
        }
    }
    Value::Object(picked)
}

/// True for a plain JSON object with zero entries
pub fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_merge_snapshot_wins() {
        let merged = merge(json!({ "a": 1 }), json!({ "a": 0, "b": 2 }));
        assert_eq!(merged, json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_merge_keeps_snapshot_only_fields() {
        let merged = merge(json!({ "stale": true }), json!({ "a": 0 }));
        assert_eq!(merged, json!({ "a": 0, "stale": true }));
    }

    #[test]
    fn test_merge_is_shallow() {
        let merged = merge(
            json!({ "nested": { "x": 1 } }),
            json!({ "nested": { "x": 0, "y": 0 } }),
        );
        assert_eq!(merged, json!({ "nested": { "x": 1 } }));
    }

    #[test]
    fn test_merge_non_object_replaces() {
        assert_eq!(merge(json!([1, 2]), json!({ "a": 0 })), json!([1, 2]));
        assert_eq!(merge(json!({ "a": 1 }), json!(7)), json!({ "a": 1 }));
    }

    #[test]
    fn test_project_allow_list() {
        let state = json!({ "a": 5, "b": 9 });
        let fields = vec!["a".to_string()];
        assert_eq!(project(&state, &fields), json!({ "a": 5 }));
    }

    #[test]
    fn test_project_skips_unknown_fields() {
        let state = json!({ "a": 5 });
        let fields = vec!["missing".to_string(), "a".to_string()];
        assert_eq!(project(&state, &fields), json!({ "a": 5 }));
        assert!(is_empty_object(&project(&json!(3), &fields)));
    }

    #[test]
    fn test_is_empty_object() {
        assert!(is_empty_object(&json!({})));
        assert!(!is_empty_object(&json!({ "a": 1 })));
        assert!(!is_empty_object(&json!([])));
        assert!(!is_empty_object(&json!(null)));
    }

    fn flat_object() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-e]", any::<i64>(), 0..6).prop_map(|fields| {
            fields
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_field_precedence(saved in flat_object(), defaults in flat_object()) {
            let merged = merge(Value::Object(saved.clone()), Value::Object(defaults.clone()));
            let merged = merged.as_object().unwrap();
            for (k, v) in &saved {
                prop_assert_eq!(merged.get(k), Some(v));
            }
            for (k, v) in &defaults {
                if !saved.contains_key(k) {
                    prop_assert_eq!(merged.get(k), Some(v));
                }
            }
            prop_assert!(merged.keys().all(|k| saved.contains_key(k) || defaults.contains_key(k)));
        }

        #[test]
        fn prop_merge_over_self_is_identity(state in flat_object()) {
            let value = Value::Object(state);
            prop_assert_eq!(merge(value.clone(), value.clone()), value);
        }

        #[test]
        fn prop_project_only_named_fields(state in flat_object(), fields in prop::collection::vec("[a-g]", 0..5)) {
            let picked = project(&Value::Object(state.clone()), &fields);
            let picked = picked.as_object().unwrap();
            for (k, v) in picked {
                prop_assert!(fields.contains(k));
                prop_assert_eq!(state.get(k), Some(v));
            }
            for field in &fields {
                prop_assert_eq!(picked.contains_key(field), state.contains_key(field));
            }
        }
    }
}
