//! PMX CLI support
//!
//! File loading, settings, and command implementations behind the `pmx`
//! binary. The engine itself lives in `pmx-core`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod loader;
pub mod settings;

pub use loader::{
    load_base, load_matrix, parse_matrix, sample_matrix, Format, LoadError, SAMPLE_MATRIX,
};
pub use settings::{Settings, SettingsError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
