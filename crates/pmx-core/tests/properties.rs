use pmx_core::{
    combination_count, combinations, deep_clone, get_at, parse, set_at, Engine, MatrixParameter,
    ParamPath, Segment, DEFAULT_MAX_DEPTH,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_path() -> impl Strategy<Value = ParamPath> {
    prop::collection::vec(("[a-z]{1,5}", prop::option::of(0usize..4)), 1..5).prop_map(|segs| {
        ParamPath::new(
            segs.into_iter()
                .map(|(field, index)| match index {
                    Some(index) => Segment::indexed(field, index),
                    None => Segment::field(field),
                })
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn prop_parse_is_pure_and_round_trips(path in arb_path()) {
        let raw = path.to_string();
        let first = parse(&raw).unwrap();
        let second = parse(&raw).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, path);
    }

    #[test]
    fn prop_set_then_get_returns_value(base in arb_json(), path in arb_path(), value in arb_json()) {
        let mut copy = deep_clone(&base, DEFAULT_MAX_DEPTH).unwrap();
        set_at(&mut copy, &path, value.clone()).unwrap();
        prop_assert_eq!(get_at(&copy, &path), Some(&value));
    }

    #[test]
    fn prop_apply_one_never_touches_base(base in arb_json(), path in arb_path(), value in arb_json()) {
        let snapshot = base.clone();
        let mut out = Engine::default().apply_one(&base, &path.to_string(), &value).unwrap();
        set_at(&mut out, &path, json!("mutated after the fact")).unwrap();
        prop_assert_eq!(base, snapshot);
    }

    #[test]
    fn prop_safe_navigation_without_root_key(base in arb_json()) {
        let mut base = base;
        if let Value::Object(map) = &mut base {
            map.remove("a");
        }
        prop_assert_eq!(get_at(&base, &parse("a.b.c").unwrap()), None);
    }

    #[test]
    fn prop_product_size(sizes in prop::collection::vec(0usize..5, 0..5)) {
        let matrix: Vec<MatrixParameter> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| MatrixParameter::new(format!("p{i}"), (0..n).map(|v| json!(v)).collect()))
            .collect();
        let expected: usize = sizes.iter().product();
        prop_assert_eq!(combination_count(&matrix), Some(expected));
        prop_assert_eq!(combinations(&matrix).len(), expected);
    }

    #[test]
    fn prop_expand_matches_combinations(base in arb_json(), sizes in prop::collection::vec(1usize..4, 0..4)) {
        let matrix: Vec<MatrixParameter> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| MatrixParameter::new(format!("knobs.k{i}"), (0..n).map(|v| json!(v)).collect()))
            .collect();
        let variants = Engine::default().expand(&base, &matrix).unwrap();
        prop_assert_eq!(variants.len(), combinations(&matrix).len());
    }
}
