//! Engine resource limits

use serde::{Deserialize, Serialize};

use crate::clone::DEFAULT_MAX_DEPTH;
use crate::error::Error;

/// Default ceiling on combinations produced by one matrix
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

/// Default ceiling on array indices written by the engine
pub const DEFAULT_MAX_INDEX: usize = 65_535;

/// Highest `max_index` honoured by any write
///
/// Larger configured values are clamped to this when writing.
pub const MAX_INDEX_CEILING: usize = 1 << 24;

/// Highest `max_depth` accepted by [`EngineConfig::validate`]
///
/// Cloning recurses once per nesting level.
pub const MAX_DEPTH_CEILING: usize = 4096;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Largest matrix product the engine will enumerate
    pub max_combinations: usize,

    /// Deepest container nesting the engine will clone
    pub max_depth: usize,

    /// Largest array index an override may write
    ///
    /// Writing past the end of a sequence pads it, so this bounds the
    /// allocation one override can cause.
    pub max_index: usize,
}

impl EngineConfig {
    /// Create config with default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combination ceiling
    #[inline]
    #[must_use]
    pub fn with_max_combinations(mut self, limit: usize) -> Self {
        self.max_combinations = limit;
        self
    }

    /// Set the clone depth limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the array index ceiling
    #[inline]
    #[must_use]
    pub fn with_max_index(mut self, index: usize) -> Self {
        self.max_index = index;
        self
    }

    /// Check limits are usable
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if a limit is zero, `max_depth`
    /// exceeds [`MAX_DEPTH_CEILING`], or `max_index` exceeds
    /// [`MAX_INDEX_CEILING`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_combinations == 0 {
            return Err(Error::InvalidConfig(
                "max_combinations must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_CEILING {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be between 1 and {MAX_DEPTH_CEILING} (got {})",
                self.max_depth
            )));
        }
        if self.max_index > MAX_INDEX_CEILING {
            return Err(Error::InvalidConfig(format!(
                "max_index must be at most {MAX_INDEX_CEILING} (got {})",
                self.max_index
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_index: DEFAULT_MAX_INDEX,
        }
    }
}
