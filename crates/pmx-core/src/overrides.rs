//! Applying overrides to copies of a base configuration

use serde_json::Value;

use crate::access::set_within;
use crate::clone::deep_clone;
use crate::engine::Engine;
use crate::error::Result;
use crate::matrix::Override;
use crate::path::ParamPath;

impl Engine {
    /// Copy `base` and set one path on the copy
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedPath`] if `path` does not parse and
    /// [`crate::Error::TooDeep`] if `base` or `value` nests past `max_depth`.
    pub fn apply_one(&self, base: &Value, path: &str, value: &Value) -> Result<Value> {
        let path: ParamPath = path.parse()?;
        self.apply_parsed(base, [(&path, value)])
    }

    /// Copy `base` once and apply every override to that copy, in order
    ///
    /// Later overrides see the effect of earlier ones. All paths are parsed
    /// before anything is applied, so a malformed path anywhere in the batch
    /// fails the whole call.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedPath`] for the first override whose
    /// path does not parse, or [`crate::Error::TooDeep`] as for
    /// [`Engine::apply_one`].
    pub fn apply_many(&self, base: &Value, overrides: &[Override]) -> Result<Value> {
        let paths = overrides
            .iter()
            .map(|o| o.path.parse::<ParamPath>())
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_parsed(base, paths.iter().zip(overrides.iter().map(|o| &o.value)))
    }

    /// Copy `base` once and apply already-parsed overrides, in order
    ///
    /// # Errors
    /// Returns [`crate::Error::TooDeep`] if `base` or any value nests past
    /// `max_depth`, and [`crate::Error::IndexLimitExceeded`] if a path
    /// indexes past `max_index` (clamped to [`crate::MAX_INDEX_CEILING`]).
    pub fn apply_parsed<'a, I>(&self, base: &Value, overrides: I) -> Result<Value>
    where
        I: IntoIterator<Item = (&'a ParamPath, &'a Value)>,
    {
        let mut out = self.clone_base(base)?;
        for (path, value) in overrides {
            let value = deep_clone(value, self.config().max_depth)?;
            set_within(&mut out, path, value, self.config().max_index)?;
        }
        Ok(out)
    }
}
