//! Depth-bounded deep clone of configuration trees

use serde_json::{Map, Value};

use crate::error::CloneError;

/// Default nesting limit for [`deep_clone`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Copy a configuration tree
///
/// The copy is structurally equal to `value` and owns all of its nodes, so
/// mutating it never affects the source. Mapping key order and sequence
/// order are preserved; `null` stays `null`.
///
/// `max_depth` is the number of nested containers (mappings or sequences)
/// permitted. A container found at depth `max_depth` or deeper aborts the
/// copy.
///
/// # Errors
/// Returns [`CloneError::DepthExceeded`] when the tree nests deeper than
/// `max_depth`.
pub fn deep_clone(value: &Value, max_depth: usize) -> Result<Value, CloneError> {
    clone_at(value, 0, max_depth)
}

fn clone_at(value: &Value, depth: usize, limit: usize) -> Result<Value, CloneError> {
    match value {
        Value::Array(items) => {
            if depth >= limit {
                return Err(CloneError::DepthExceeded { limit });
            }
            items
                .iter()
                .map(|item| clone_at(item, depth + 1, limit))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        Value::Object(map) => {
            if depth >= limit {
                return Err(CloneError::DepthExceeded { limit });
            }
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), clone_at(item, depth + 1, limit)?);
            }
            Ok(Value::Object(out))
        }
        scalar => Ok(scalar.clone()),
    }
}
