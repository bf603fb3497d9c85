//! Testing utilities for PMX workspace
//!
//! Shared fixtures for configuration trees and matrices.

#![allow(missing_docs)]

use pmx_core::{MatrixParameter, MatrixSpec};
use serde_json::{json, Value};

pub fn sample_character() -> Value {
    json!({
        "character": {
            "name": "Ava",
            "tone": "neutral",
            "style": {
                "chat": ["calm", "concise"],
                "post": ["warm"],
                "all": []
            },
            "topics": ["music", "travel"],
            "settings": {
                "emoji": false,
                "temperature": 0.7,
                "voice": null
            }
        }
    })
}

pub fn scenario_character() -> Value {
    json!({"character": {"name": "Ava", "style": {"chat": ["calm"]}}})
}

pub fn tone_emoji_matrix() -> MatrixSpec {
    MatrixSpec::default()
        .with("character.tone", vec![json!("formal"), json!("casual")])
        .with("character.emoji", vec![json!(true), json!(false)])
}

/// Parameters named `p0..p{n}` each offering `width` integer values
pub fn uniform_matrix(parameters: usize, width: usize) -> MatrixSpec {
    (0..parameters)
        .map(|i| {
            MatrixParameter::new(
                format!("params.p{i}"),
                (0..width).map(|v| json!(v)).collect(),
            )
        })
        .collect()
}

/// Chain of `depth` nested single-key mappings ending in a scalar
pub fn nested_chain(depth: usize) -> Value {
    (0..depth).fold(json!("leaf"), |inner, _| json!({ "next": inner }))
}
