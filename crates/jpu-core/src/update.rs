// Copy-on-write "set at address" over serde_json::Value.
// The input root is only ever borrowed; every call returns a fresh tree.
// Resolution is best-effort: missing branches are created, writes that would
// have to pass through a scalar are dropped and reported via `Outcome`.
use serde_json::{Map, Value};
use tracing::debug;

use crate::path::{Path, Seg, parse};

/// Largest number of `null` fillers an out-of-range index may append to an array.
/// Indices further past the end are treated as unaddressable.
pub const MAX_INDEX_GAP: usize = 1 << 16;

/// What an update actually did. `update` hides this; `update_with_outcome` exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target slot now holds the new value.
    Applied,
    /// Zero segments: nothing addressed, root returned as is.
    EmptyPath,
    /// The spine hit a non-container at segment `depth`; the copy is returned unchanged from there.
    TraversalBlocked { depth: usize },
    /// The parent of the target is not a container that accepts the last segment.
    TerminalWriteBlocked,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Return a copy of `root` with the slot at `path` set to `new_value`.
pub fn update(root: &Value, path: &Path, new_value: Value) -> Value {
    update_with_outcome(root, path, new_value).0
}

/// Parse `expression` and update in one step.
pub fn update_at(root: &Value, expression: &str, new_value: Value) -> Value {
    update(root, &parse(expression), new_value)
}

pub fn update_with_outcome(root: &Value, path: &Path, new_value: Value) -> (Value, Outcome) {
    if path.is_empty() {
        return (root.clone(), Outcome::EmptyPath);
    }
    let mut out = root.clone();
    let outcome = set_in_place(&mut out, path.segments(), new_value);
    match outcome {
        Outcome::TraversalBlocked { depth } => {
            debug!(%path, depth, "update blocked: segment steps into a non-container");
        }
        Outcome::TerminalWriteBlocked => {
            debug!(%path, "update dropped: target parent does not accept the last segment");
        }
        Outcome::Applied | Outcome::EmptyPath => {}
    }
    (out, outcome)
}

fn set_in_place(root: &mut Value, segs: &[Seg], new_value: Value) -> Outcome {
    let Some((last, spine)) = segs.split_last() else {
        return Outcome::EmptyPath;
    };
    let mut current = root;
    for (depth, seg) in spine.iter().enumerate() {
        let following = &segs[depth + 1];
        match descend(current, seg, following) {
            Some(child) => current = child,
            None => return Outcome::TraversalBlocked { depth },
        }
    }
    if write_slot(current, last, new_value) {
        Outcome::Applied
    } else {
        Outcome::TerminalWriteBlocked
    }
}

// Step into the child at `seg`, creating it when absent. The shape of a created
// child is chosen by the segment that will address into it.
fn descend<'v>(node: &'v mut Value, seg: &Seg, following: &Seg) -> Option<&'v mut Value> {
    match node {
        Value::Object(map) => Some(
            map.entry(seg.object_key())
                .or_insert_with(|| empty_container_for(following)),
        ),
        Value::Array(items) => {
            let index = seg.array_index()?;
            if index >= items.len() {
                place(items, index, empty_container_for(following))?;
            }
            items.get_mut(index)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

fn write_slot(node: &mut Value, seg: &Seg, new_value: Value) -> bool {
    match node {
        Value::Object(map) => {
            map.insert(seg.object_key(), new_value);
            true
        }
        Value::Array(items) => match seg.array_index() {
            Some(index) if index < items.len() => {
                items[index] = new_value;
                true
            }
            Some(index) => place(items, index, new_value).is_some(),
            None => false,
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

// Append `value` at `index >= len`, padding the gap with nulls.
fn place(items: &mut Vec<Value>, index: usize, value: Value) -> Option<()> {
    if index - items.len() > MAX_INDEX_GAP {
        return None;
    }
    items.resize(index, Value::Null);
    items.push(value);
    Some(())
}

fn empty_container_for(seg: &Seg) -> Value {
    if seg.is_index() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}
