//! Path discovery and liveness checks
//!
//! Tooling support for authoring matrices: list what can be addressed in a
//! configuration, and check that a matrix only names paths that exist.

use std::iter::FusedIterator;

use serde_json::Value;

use crate::access::get_at;
use crate::matrix::MatrixParameter;
use crate::path::ParamPath;

/// `true` iff `path` parses and currently resolves on `obj`
///
/// A present `null` counts as resolving. This checks one object instance,
/// not a schema.
#[must_use]
pub fn is_valid_path(obj: &Value, path: &str) -> bool {
    path.parse::<ParamPath>()
        .is_ok_and(|path| get_at(obj, &path).is_some())
}

/// Parameters of `matrix` that do not resolve on `obj`, in matrix order
#[must_use]
pub fn unresolved_parameters<'m>(obj: &Value, matrix: &'m [MatrixParameter]) -> Vec<&'m str> {
    matrix
        .iter()
        .map(|param| param.parameter.as_str())
        .filter(|path| !is_valid_path(obj, path))
        .collect()
}

/// Every path reachable from `obj`, each under `prefix`
///
/// Mapping entries yield `prefix.key` (just `key` when `prefix` is empty),
/// sequence slots yield `prefix[index]`. A node's own path comes before the
/// paths inside it; keys keep insertion order and indices ascend. Scalars
/// end the descent. Calling again starts a fresh traversal.
///
/// Keys containing `.` or `[` produce paths that will not parse back to the
/// same location. Neither do paths under a sequence root: parameter paths
/// always start with a field, so `[0]` is listed but cannot be addressed.
///
/// ```
/// use pmx_core::{discover_paths, is_valid_path};
/// use serde_json::json;
///
/// let root = json!([{"a": 1}]);
/// let paths: Vec<_> = discover_paths(&root, "").collect();
/// assert_eq!(paths, ["[0]", "[0].a"]);
/// assert!(!is_valid_path(&root, "[0]"));
/// ```
#[must_use]
pub fn discover_paths<'a>(obj: &'a Value, prefix: &str) -> DiscoveredPaths<'a> {
    let mut paths = DiscoveredPaths { stack: Vec::new() };
    paths.push_children(prefix, obj);
    paths
}

/// Lazy pre-order walk returned by [`discover_paths`]
#[derive(Debug, Clone)]
pub struct DiscoveredPaths<'a> {
    stack: Vec<(String, &'a Value)>,
}

impl<'a> DiscoveredPaths<'a> {
    // Children are pushed last-first so they pop in document order.
    fn push_children(&mut self, prefix: &str, value: &'a Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    self.stack.push((path, child));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    self.stack.push((format!("{prefix}[{index}]"), child));
                }
            }
            _ => {}
        }
    }
}

impl Iterator for DiscoveredPaths<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, value) = self.stack.pop()?;
        self.push_children(&path, value);
        Some(path)
    }
}

impl FusedIterator for DiscoveredPaths<'_> {}
