use serde_json::{Map, Value};

use crate::path::{Path, Seg};
use crate::update::{Outcome, update_with_outcome};

/// Value currently at `path`, or `None` when any hop misses.
///
/// Uses the same addressing as the updater but never creates anything.
pub fn get<'v>(root: &'v Value, path: &Path) -> Option<&'v Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, seg| child(node, seg))
}

fn child<'v>(node: &'v Value, seg: &Seg) -> Option<&'v Value> {
    match node {
        Value::Object(map) => map.get(&seg.object_key()),
        Value::Array(items) => items.get(seg.array_index()?),
        _ => None,
    }
}

/// The part of a node a user can edit as plain fields.
///
/// Scalars (including null) are returned as themselves. Objects are reduced to
/// their scalar members in their original order. Arrays have nothing directly
/// editable and yield `None`.
pub fn editable_fields(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .filter(|(_, v)| !is_container(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Some(Value::Object(fields))
        }
        Value::Array(_) => None,
        scalar => Some(scalar.clone()),
    }
}

/// Overlay `edited` onto `current`: edited keys win, untouched keys survive.
/// Anything other than object-onto-object is a plain replacement.
pub fn shallow_merge(current: &Value, edited: &Value) -> Value {
    match (current, edited) {
        (Value::Object(base), Value::Object(changes)) => {
            let mut merged = base.clone();
            for (k, v) in changes {
                merged.insert(k.clone(), v.clone());
            }
            Value::Object(merged)
        }
        _ => edited.clone(),
    }
}

/// Merge `edited` into whatever sits at `path`, then write it back.
///
/// This is the safe way to save a partial view produced by [`editable_fields`]:
/// siblings the user never saw are kept.
pub fn merge_at(root: &Value, path: &Path, edited: &Value) -> Value {
    merge_with_outcome(root, path, edited).0
}

/// [`merge_at`] that also reports whether the merged value landed.
///
/// An empty path merges into the root itself and always applies, unlike
/// [`update`](crate::update::update) where the root path is a no-op.
pub fn merge_with_outcome(root: &Value, path: &Path, edited: &Value) -> (Value, Outcome) {
    if path.is_empty() {
        return (shallow_merge(root, edited), Outcome::Applied);
    }
    let merged = match get(root, path) {
        Some(current) => shallow_merge(current, edited),
        None => edited.clone(),
    };
    update_with_outcome(root, path, merged)
}

/// Turn the text a user typed for one field back into a value.
///
/// The trimmed text is tried as a JSON literal (`42`, `true`, `null`, `"q"`,
/// `[1]`); blank text becomes the empty string; anything else is kept as the
/// raw, untrimmed string.
pub fn parse_field_text(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Build an edited object from `(key, text)` pairs, ready for [`merge_at`].
/// Later pairs win when a key repeats.
pub fn fields_from_text<K, T>(pairs: impl IntoIterator<Item = (K, T)>) -> Value
where
    K: Into<String>,
    T: AsRef<str>,
{
    let fields: Map<String, Value> = pairs
        .into_iter()
        .map(|(k, t)| (k.into(), parse_field_text(t.as_ref())))
        .collect();
    Value::Object(fields)
}

fn is_container(v: &Value) -> bool {
    matches!(v, Value::Object(_) | Value::Array(_))
}
