//! Command implementations
//!
//! Each command writes machine-readable output to `out`; diagnostics go
//! through `tracing`.

use std::io::Write;

use anyhow::{Context, Result};
use pmx_core::{discover_paths, unresolved_parameters, Engine, MatrixSpec};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
struct CombinationLine<'a> {
    idx: usize,
    assignment: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a Value>,
}

/// Print the matrix summary and one JSON line per combination
///
/// # Errors
/// Returns error if the matrix is over the engine ceiling or `out` fails.
pub fn combos(engine: &Engine, matrix: &MatrixSpec, out: &mut impl Write) -> Result<()> {
    let combinations = engine.combinations(matrix)?;
    tracing::info!(
        parameters = matrix.len(),
        combinations = combinations.len(),
        "enumerated matrix"
    );

    writeln!(out, "parameters: {}", matrix.len())?;
    writeln!(out, "combinations: {}", combinations.len())?;
    for (idx, combination) in combinations.iter().enumerate() {
        let line = CombinationLine {
            idx,
            assignment: combination.assignment(),
            config: None,
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}

/// Print one JSON line per variant of `base`
///
/// # Errors
/// Returns error if expansion fails or `out` fails.
pub fn expand(
    engine: &Engine,
    base: &Value,
    matrix: &MatrixSpec,
    out: &mut impl Write,
) -> Result<()> {
    let variants = engine
        .expand(base, matrix)
        .context("expanding matrix against base")?;
    tracing::info!(variants = variants.len(), "expanded matrix");

    for (idx, variant) in variants.iter().enumerate() {
        let line = CombinationLine {
            idx,
            assignment: variant.assignment(),
            config: Some(&variant.config),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}

/// Print every addressable path of `base`, one per line
///
/// # Errors
/// Returns error if `out` fails.
pub fn paths(base: &Value, out: &mut impl Write) -> Result<()> {
    for path in discover_paths(base, "") {
        writeln!(out, "{path}")?;
    }
    Ok(())
}

/// Report matrix parameters that do not resolve on `base`
///
/// Returns `true` when every parameter resolves.
///
/// # Errors
/// Returns error if `out` fails.
pub fn check(base: &Value, matrix: &MatrixSpec, out: &mut impl Write) -> Result<bool> {
    let unresolved = unresolved_parameters(base, matrix);
    for path in &unresolved {
        tracing::warn!(parameter = %path, "parameter does not resolve on base");
        writeln!(out, "unresolved: {path}")?;
    }
    if unresolved.is_empty() {
        writeln!(out, "ok: all {} parameters resolve", matrix.len())?;
    }
    Ok(unresolved.is_empty())
}
