//! Matrix specifications and their cartesian product
//!
//! A [`MatrixSpec`] lists parameter paths with candidate values. Every
//! [`Combination`] picks one value per parameter; together they cover the
//! full product, enumerated with the last parameter varying fastest.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::Engine;
use crate::error::{Error, Result};

/// One field mutation: set `path` to `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Override {
    /// Parameter path, e.g. `character.style.chat[0]`
    pub path: String,
    /// Value written at `path`
    pub value: Value,
}

impl Override {
    /// Create override
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// Candidate values to try for one parameter path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixParameter {
    /// Parameter path
    pub parameter: String,
    /// Values to try, in order
    pub values: Vec<Value>,
}

impl MatrixParameter {
    /// Create parameter
    #[inline]
    #[must_use]
    pub fn new(parameter: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            parameter: parameter.into(),
            values,
        }
    }
}

/// Ordered list of matrix parameters
///
/// Order only affects enumeration order of the product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixSpec(Vec<MatrixParameter>);

impl MatrixSpec {
    /// Append a parameter
    #[inline]
    #[must_use]
    pub fn with(mut self, parameter: impl Into<String>, values: Vec<Value>) -> Self {
        self.0.push(MatrixParameter::new(parameter, values));
        self
    }

    /// Number of combinations, `None` if the product overflows `usize`
    #[inline]
    #[must_use]
    pub fn combination_count(&self) -> Option<usize> {
        combination_count(&self.0)
    }
}

impl Deref for MatrixSpec {
    type Target = [MatrixParameter];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<MatrixParameter> for MatrixSpec {
    fn from_iter<I: IntoIterator<Item = MatrixParameter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One point in the matrix product: one override per parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<Override>);

impl Combination {
    /// Overrides in matrix order
    #[inline]
    #[must_use]
    pub fn overrides(&self) -> &[Override] {
        &self.0
    }

    /// Number of overrides
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if combination assigns nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value assigned to `path`, if any
    ///
    /// When a path repeats, the later assignment wins, matching application
    /// order.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0.iter().rev().find(|o| o.path == path).map(|o| &o.value)
    }

    /// Assignment as an ordered `path -> value` mapping
    #[must_use]
    pub fn assignment(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|o| (o.path.clone(), o.value.clone()))
            .collect()
    }

    fn push(&mut self, item: Override) {
        self.0.push(item);
    }
}

impl From<Vec<Override>> for Combination {
    fn from(overrides: Vec<Override>) -> Self {
        Self(overrides)
    }
}

impl<'a> IntoIterator for &'a Combination {
    type Item = &'a Override;
    type IntoIter = std::slice::Iter<'a, Override>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Product of all parameter domain sizes
///
/// `Some(1)` for an empty matrix, `None` if the product overflows `usize`.
#[must_use]
pub fn combination_count(matrix: &[MatrixParameter]) -> Option<usize> {
    matrix
        .iter()
        .try_fold(1usize, |acc, param| acc.checked_mul(param.values.len()))
}

/// Cartesian product of the matrix, last parameter varying fastest
///
/// Unbounded: callers that take matrices from outside should go through
/// [`Engine::combinations`], which enforces the configured ceiling first.
#[must_use]
pub fn combinations(matrix: &[MatrixParameter]) -> Vec<Combination> {
    matrix
        .iter()
        .fold(vec![Combination::default()], |acc, param| {
            let mut next = Vec::with_capacity(acc.len().saturating_mul(param.values.len()));
            for combo in &acc {
                for value in &param.values {
                    let mut branch = combo.clone();
                    branch.push(Override::new(param.parameter.clone(), value.clone()));
                    next.push(branch);
                }
            }
            next
        })
}

impl Engine {
    /// Fail unless the matrix product fits the configured ceiling
    ///
    /// # Errors
    /// Returns [`Error::CombinationLimitExceeded`] when the product exceeds
    /// `max_combinations` or overflows.
    pub fn check_matrix(&self, matrix: &[MatrixParameter]) -> Result<usize> {
        let limit = self.config().max_combinations;
        match combination_count(matrix) {
            Some(count) if count <= limit => Ok(count),
            requested => Err(Error::CombinationLimitExceeded { requested, limit }),
        }
    }

    /// Cartesian product of the matrix, bounded by `max_combinations`
    ///
    /// # Errors
    /// Returns [`Error::CombinationLimitExceeded`] before allocating anything
    /// if the product is over the ceiling.
    pub fn combinations(&self, matrix: &[MatrixParameter]) -> Result<Vec<Combination>> {
        self.check_matrix(matrix)?;
        Ok(combinations(matrix))
    }
}
