//! Reading and writing configuration trees by [`ParamPath`]
//!
//! Reads are lenient: anything that does not resolve is `None`. Writes are
//! authoritative: missing or mistyped intermediates are replaced with the
//! container the path needs.

use serde_json::{Map, Value};

use crate::config::{DEFAULT_MAX_INDEX, MAX_INDEX_CEILING};
use crate::error::{AccessError, WriteError};
use crate::path::{ParamPath, Segment};

/// Get the value at `path`, if present
///
/// Returns `None` as soon as a segment does not resolve: a missing key, an
/// index past the end of a sequence, or a segment applied to the wrong kind
/// of node. A present `null` is `Some(&Value::Null)`.
#[must_use]
pub fn get_at<'a>(obj: &'a Value, path: &ParamPath) -> Option<&'a Value> {
    path.iter().try_fold(obj, step)
}

/// Get the value at `path`, reporting where navigation stopped
///
/// # Errors
/// Returns [`AccessError::Missing`] naming the shortest prefix of `path`
/// that does not resolve.
pub fn require_at<'a>(obj: &'a Value, path: &ParamPath) -> Result<&'a Value, AccessError> {
    let mut current = obj;
    for (depth, segment) in path.iter().enumerate() {
        current = step(current, segment).ok_or_else(|| AccessError::Missing {
            path: path.to_string(),
            at: ParamPath::new(path.segments()[..=depth].to_vec()).to_string(),
        })?;
    }
    Ok(current)
}

/// Set the value at `path`, creating whatever the path needs
///
/// Mutates `obj` in place; callers clone first. Missing intermediates become
/// empty mappings, or sequences when the segment carries an index. Writing
/// past the end of a sequence pads the gap with `null`. A scalar found where
/// a container is needed is overwritten. An empty path replaces `obj`.
///
/// # Errors
/// Returns [`WriteError::IndexTooLarge`] if any index in `path` exceeds
/// [`DEFAULT_MAX_INDEX`]. `obj` is left untouched.
pub fn set_at(obj: &mut Value, path: &ParamPath, value: Value) -> Result<(), WriteError> {
    set_within(obj, path, value, DEFAULT_MAX_INDEX)
}

/// [`set_at`] with a caller-chosen index ceiling, clamped to
/// [`MAX_INDEX_CEILING`]
pub(crate) fn set_within(
    obj: &mut Value,
    path: &ParamPath,
    value: Value,
    max_index: usize,
) -> Result<(), WriteError> {
    let limit = max_index.min(MAX_INDEX_CEILING);
    if let Some(index) = path.iter().filter_map(Segment::index).find(|&i| i > limit) {
        return Err(WriteError::IndexTooLarge {
            path: path.to_string(),
            index,
            limit,
        });
    }

    let Some((last, parents)) = path.segments().split_last() else {
        *obj = value;
        return Ok(());
    };

    let mut current = obj;
    for segment in parents {
        current = slot_mut(current, segment);
    }
    *slot_mut(current, last) = value;
    Ok(())
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    let field = current.as_object()?.get(segment.name())?;
    match segment.index() {
        Some(index) => field.as_array()?.get(index),
        None => Some(field),
    }
}

fn slot_mut<'a>(current: &'a mut Value, segment: &Segment) -> &'a mut Value {
    let field = ensure_object(current)
        .entry(segment.name())
        .or_insert(Value::Null);

    match segment.index() {
        None => field,
        Some(index) => {
            let items = ensure_array(field);
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("non-object replaced above"),
    }
}

fn ensure_array(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_array() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => items,
        _ => unreachable!("non-array replaced above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn p(raw: &str) -> ParamPath {
        parse(raw).unwrap()
    }

    #[test]
    fn get_nested_field_and_slot() {
        let obj = json!({"character": {"style": {"chat": ["calm", "terse"]}}});
        assert_eq!(get_at(&obj, &p("character.style.chat[1]")), Some(&json!("terse")));
        assert_eq!(
            get_at(&obj, &p("character.style")),
            Some(&json!({"chat": ["calm", "terse"]}))
        );
    }

    #[test]
    fn get_missing_intermediate_is_none() {
        let obj = json!({"x": 1});
        assert_eq!(get_at(&obj, &p("a.b.c")), None);
    }

    #[test]
    fn get_through_wrong_kind_is_none() {
        let obj = json!({"a": "scalar", "list": {"not": "array"}});
        assert_eq!(get_at(&obj, &p("a.b")), None);
        assert_eq!(get_at(&obj, &p("list[0]")), None);
    }

    #[test]
    fn get_index_out_of_range_is_none() {
        let obj = json!({"a": [1]});
        assert_eq!(get_at(&obj, &p("a[1]")), None);
    }

    #[test]
    fn get_present_null_is_some() {
        let obj = json!({"a": null});
        assert_eq!(get_at(&obj, &p("a")), Some(&Value::Null));
    }

    #[test]
    fn get_empty_path_is_root() {
        let obj = json!({"a": 1});
        assert_eq!(get_at(&obj, &ParamPath::default()), Some(&obj));
    }

    #[test]
    fn require_reports_failing_prefix() {
        let obj = json!({"a": {"b": [0]}});
        let err = require_at(&obj, &p("a.b[3].c")).unwrap_err();
        assert_eq!(
            err,
            AccessError::Missing {
                path: "a.b[3].c".to_string(),
                at: "a.b[3]".to_string(),
            }
        );
        assert_eq!(require_at(&obj, &p("a.b[0]")), Ok(&json!(0)));
    }

    #[test]
    fn set_existing_leaf() {
        let mut obj = json!({"character": {"name": "Ava", "style": {"chat": ["calm"]}}});
        set_at(&mut obj, &p("character.style.chat[0]"), json!("energetic")).unwrap();
        assert_eq!(
            obj,
            json!({"character": {"name": "Ava", "style": {"chat": ["energetic"]}}})
        );
    }

    #[test]
    fn set_creates_missing_mappings() {
        let mut obj = json!({});
        set_at(&mut obj, &p("a.b.c"), json!(1)).unwrap();
        assert_eq!(obj, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn set_creates_padded_sequence() {
        let mut obj = json!({});
        set_at(&mut obj, &p("a.items[2].name"), json!("x")).unwrap();
        assert_eq!(obj, json!({"a": {"items": [null, null, {"name": "x"}]}}));
    }

    #[test]
    fn set_past_end_extends_with_null() {
        let mut obj = json!({"list": [1]});
        set_at(&mut obj, &p("list[3]"), json!(4)).unwrap();
        assert_eq!(obj, json!({"list": [1, null, null, 4]}));
    }

    #[test]
    fn set_overwrites_scalar_intermediate() {
        let mut obj = json!({"a": 5, "list": "nope"});
        set_at(&mut obj, &p("a.b"), json!(true)).unwrap();
        set_at(&mut obj, &p("list[0]"), json!("first")).unwrap();
        assert_eq!(obj, json!({"a": {"b": true}, "list": ["first"]}));
    }

    #[test]
    fn set_replaces_non_mapping_root() {
        let mut obj = json!([1, 2]);
        set_at(&mut obj, &p("a"), json!(1)).unwrap();
        assert_eq!(obj, json!({"a": 1}));
    }

    #[test]
    fn set_keeps_sibling_key_order() {
        let mut obj: Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        set_at(&mut obj, &p("z"), json!(9)).unwrap();
        set_at(&mut obj, &p("new"), json!(0)).unwrap();
        let keys: Vec<_> = obj.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "new"]);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut obj = json!({"a": {"b": [1, 2]}});
        let path = p("a.b[1]");
        set_at(&mut obj, &path, json!({"deep": true})).unwrap();
        assert_eq!(get_at(&obj, &path), Some(&json!({"deep": true})));
    }

    #[test]
    fn set_rejects_index_at_usize_max() {
        let mut obj = json!({"keep": 1});
        let path = p(&format!("a[{}]", usize::MAX));
        assert_eq!(
            set_at(&mut obj, &path, json!(1)),
            Err(WriteError::IndexTooLarge {
                path: "a[18446744073709551615]".to_string(),
                index: usize::MAX,
                limit: DEFAULT_MAX_INDEX,
            })
        );
        assert_eq!(obj, json!({"keep": 1}));
    }

    #[test]
    fn set_rejects_index_past_default_ceiling() {
        let mut obj = json!({});
        let path = p("a.b[1000000000000000].c");
        assert!(matches!(
            set_at(&mut obj, &path, json!(1)),
            Err(WriteError::IndexTooLarge { index: 1_000_000_000_000_000, .. })
        ));
        assert_eq!(obj, json!({}));

        set_at(&mut obj, &p(&format!("a[{DEFAULT_MAX_INDEX}]")), json!(1)).unwrap();
        assert_eq!(obj["a"].as_array().map(Vec::len), Some(DEFAULT_MAX_INDEX + 1));
    }

    #[test]
    fn set_within_clamps_to_ceiling() {
        let mut obj = json!({});
        let path = p(&format!("a[{}]", MAX_INDEX_CEILING + 1));
        assert_eq!(
            set_within(&mut obj, &path, json!(1), usize::MAX),
            Err(WriteError::IndexTooLarge {
                path: path.to_string(),
                index: MAX_INDEX_CEILING + 1,
                limit: MAX_INDEX_CEILING,
            })
        );
    }
}
