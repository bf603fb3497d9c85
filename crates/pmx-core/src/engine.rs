//! Engine handle carrying resource limits

use serde_json::Value;

use crate::clone::deep_clone;
use crate::config::EngineConfig;
use crate::error::Result;

/// Override and matrix engine
///
/// Stateless apart from its [`EngineConfig`]; cheap to copy and safe to
/// share across threads. Every operation returns freshly built trees and
/// leaves its inputs untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create engine with the given limits
    #[inline]
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create engine after validating the limits
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if the limits are unusable.
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Engine limits
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Deep copy of `base` within the configured depth limit
    ///
    /// # Errors
    /// Returns [`crate::Error::TooDeep`] if `base` nests past `max_depth`.
    #[inline]
    pub fn clone_base(&self, base: &Value) -> Result<Value> {
        Ok(deep_clone(base, self.config.max_depth)?)
    }
}
