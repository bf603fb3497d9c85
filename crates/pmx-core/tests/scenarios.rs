//! End-to-end scenarios for overrides and matrix expansion.
//!
//! These exercise the engine the way a test harness drives it: take a
//! persona definition, declare a matrix, and consume independent variants.

use pmx_core::{
    combinations, discover_paths, parse, Engine, EngineConfig, Error, Override, PathError,
};
use pmx_test_utils::{
    nested_chain, sample_character, scenario_character, tone_emoji_matrix, uniform_matrix,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Overriding one array slot changes only the copy.
#[test]
fn single_slot_override_leaves_base_intact() {
    let base = scenario_character();
    let out = Engine::default()
        .apply_one(&base, "character.style.chat[0]", &json!("energetic"))
        .unwrap();

    assert_eq!(
        out,
        json!({"character": {"name": "Ava", "style": {"chat": ["energetic"]}}})
    );
    assert_eq!(base, scenario_character());
}

/// Two binary parameters give four combinations, odometer order.
#[test]
fn tone_emoji_matrix_order() {
    let assignments: Vec<_> = combinations(&tone_emoji_matrix())
        .iter()
        .map(|c| serde_json::Value::Object(c.assignment()))
        .collect();

    assert_eq!(
        assignments,
        vec![
            json!({"character.tone": "formal", "character.emoji": true}),
            json!({"character.tone": "formal", "character.emoji": false}),
            json!({"character.tone": "casual", "character.emoji": true}),
            json!({"character.tone": "casual", "character.emoji": false}),
        ]
    );
}

/// Discovery lists a key before its slots.
#[test]
fn discovery_of_small_sequence() {
    let paths: Vec<_> = discover_paths(&json!({"a": [1, 2]}), "").collect();
    assert_eq!(paths, vec!["a", "a[0]", "a[1]"]);
}

/// Empty paths and empty segments are malformed.
#[test]
fn malformed_paths_rejected() {
    assert_eq!(parse(""), Err(PathError::Empty));
    assert!(matches!(parse("a..b"), Err(PathError::EmptySegment { .. })));
}

/// Variants are fully independent of each other.
#[test]
fn variants_do_not_share_structure() {
    let base = sample_character();
    let mut variants = Engine::default()
        .expand(&base, &tone_emoji_matrix())
        .unwrap();

    variants[0].config["character"]["style"]["chat"][0] = json!("changed");
    for variant in &variants[1..] {
        assert_eq!(variant.config["character"]["style"]["chat"][0], json!("calm"));
    }
    assert_eq!(base, sample_character());
}

/// Every variant carries the combination that produced it.
#[test]
fn variants_carry_their_assignment() {
    let variants = Engine::default()
        .expand(&sample_character(), &tone_emoji_matrix())
        .unwrap();

    for variant in &variants {
        for o in variant.combination.overrides() {
            let path = parse(&o.path).unwrap();
            assert_eq!(pmx_core::get_at(&variant.config, &path), Some(&o.value));
        }
    }
}

/// A bad path in a batch means nothing is applied.
#[test]
fn batch_with_bad_path_applies_nothing() {
    let base = sample_character();
    let overrides = vec![
        Override::new("character.tone", json!("formal")),
        Override::new("character.style.chat[", json!("x")),
    ];

    let result = Engine::default().apply_many(&base, &overrides);
    assert!(matches!(
        result,
        Err(Error::MalformedPath(PathError::UnterminatedBracket(_)))
    ));
    assert_eq!(base["character"]["tone"], json!("neutral"));
}

/// Oversized matrices are refused before enumeration.
#[test]
fn combination_ceiling_enforced() {
    let engine = Engine::new(EngineConfig::new().with_max_combinations(1_000));
    let matrix = uniform_matrix(4, 10);

    assert!(engine.combinations(&matrix).is_ok());

    let too_big = uniform_matrix(4, 10).with("extra", vec![json!(1), json!(2)]);
    assert_eq!(
        engine.combinations(&too_big),
        Err(Error::CombinationLimitExceeded {
            requested: Some(2_000),
            limit: 1_000,
        })
    );

    let overflowing = uniform_matrix(64, 3);
    assert!(matches!(
        engine.combinations(&overflowing),
        Err(Error::CombinationLimitExceeded { requested: None, .. })
    ));
}

/// Pathologically deep bases fail with a bounded error instead of recursing.
#[test]
fn deep_base_rejected() {
    let engine = Engine::new(EngineConfig::new().with_max_depth(32));
    assert!(engine.apply_one(&nested_chain(32), "x", &json!(1)).is_ok());
    assert!(matches!(
        engine.apply_one(&nested_chain(33), "x", &json!(1)),
        Err(Error::TooDeep(_))
    ));
}
