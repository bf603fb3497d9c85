//! Expanding a matrix into configuration variants

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::Engine;
use crate::error::Result;
use crate::matrix::{Combination, MatrixParameter};
use crate::path::ParamPath;

/// Configuration produced by one matrix combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Overrides that produced this variant
    pub combination: Combination,
    /// Base configuration with the overrides applied
    pub config: Value,
}

impl Variant {
    /// Assignment of the originating combination
    #[inline]
    #[must_use]
    pub fn assignment(&self) -> Map<String, Value> {
        self.combination.assignment()
    }
}

impl Engine {
    /// Build one independent variant of `base` per matrix combination
    ///
    /// Variants come out in [`Engine::combinations`] order. Each owns its
    /// whole tree; none shares structure with `base` or with another variant.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedPath`] if a parameter path does not
    /// parse, [`crate::Error::CombinationLimitExceeded`] if the product is
    /// over the ceiling, and [`crate::Error::TooDeep`] if `base` or a
    /// candidate value nests past `max_depth`.
    pub fn expand(&self, base: &Value, matrix: &[MatrixParameter]) -> Result<Vec<Variant>> {
        let paths = matrix
            .iter()
            .map(|param| param.parameter.parse::<ParamPath>())
            .collect::<Result<Vec<_>, _>>()?;

        self.combinations(matrix)?
            .into_iter()
            .map(|combination| {
                let values = combination.overrides().iter().map(|o| &o.value);
                let config = self.apply_parsed(base, paths.iter().zip(values))?;
                Ok(Variant {
                    combination,
                    config,
                })
            })
            .collect()
    }
}
