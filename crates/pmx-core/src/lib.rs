//! PMX Core
//!
//! Parameter-path overrides and combinatorial variant generation for
//! JSON-like configuration trees.
//!
//! # Core Concepts
//!
//! - [`ParamPath`]: Parsed address such as `character.style.chat[0]`
//! - [`get_at`] / [`set_at`]: Lenient reads, authoritative writes
//! - [`Engine`]: Applies overrides to copies and expands matrices, within
//!   the limits of an [`EngineConfig`]
//! - [`MatrixSpec`] / [`Combination`]: Parameter domains and one point of
//!   their cartesian product
//! - [`Variant`]: Base configuration with one combination applied
//! - [`discover_paths`]: Every addressable path of a configuration
//!
//! # Example
//!
//! ```
//! use pmx_core::{Engine, MatrixSpec};
//! use serde_json::json;
//!
//! let base = json!({"character": {"name": "Ava", "tone": "neutral"}});
//! let matrix = MatrixSpec::default()
//!     .with("character.tone", vec![json!("formal"), json!("casual")])
//!     .with("character.emoji", vec![json!(true), json!(false)]);
//!
//! let variants = Engine::default().expand(&base, &matrix)?;
//! assert_eq!(variants.len(), 4);
//! assert_eq!(variants[0].config["character"]["tone"], json!("formal"));
//! assert_eq!(base["character"]["tone"], json!("neutral"));
//! # Ok::<(), pmx_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod access;
mod clone;
mod config;
mod discovery;
mod engine;
mod error;
mod expand;
mod matrix;
mod overrides;
mod path;

// Re-exports
pub use access::{get_at, require_at, set_at};
pub use clone::{deep_clone, DEFAULT_MAX_DEPTH};
pub use config::{
    EngineConfig, DEFAULT_MAX_COMBINATIONS, DEFAULT_MAX_INDEX, MAX_DEPTH_CEILING,
    MAX_INDEX_CEILING,
};
pub use discovery::{discover_paths, is_valid_path, unresolved_parameters, DiscoveredPaths};
pub use engine::Engine;
pub use error::{AccessError, CloneError, Error, PathError, Result, WriteError};
pub use expand::Variant;
pub use matrix::{
    combination_count, combinations, Combination, MatrixParameter, MatrixSpec, Override,
};
pub use path::{parse, ParamPath, Segment};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
