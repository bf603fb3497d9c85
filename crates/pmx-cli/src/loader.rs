//! Matrix and base-configuration file loading
//!
//! Decodes YAML or JSON files into [`MatrixSpec`]s and configuration trees.
//! A matrix file is either a bare list of parameters or a mapping with a
//! `matrix` key holding that list:
//!
//! ```yaml
//! matrix:
//!   - parameter: character.tone
//!     values: [formal, casual]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use pmx_core::{MatrixSpec, ParamPath, PathError};
use serde_json::Value as JsonValue;

/// Bundled sample matrix (YAML), used when no file is given
pub const SAMPLE_MATRIX: &str = include_str!("../data/sample-matrix.yaml");

/// File format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml`, `.yml`, and anything unrecognised
    Yaml,
}

impl Format {
    /// Detect format from a file name
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loader error types
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid matrix: {0}")]
    Invalid(String),

    #[error("invalid matrix: parameter {index} ('{parameter}'): {source}")]
    MalformedParameter {
        index: usize,
        parameter: String,
        #[source]
        source: PathError,
    },
}

/// Read and validate a matrix file
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read, does not decode, or is
/// not a valid matrix.
pub fn load_matrix(path: &Path) -> Result<MatrixSpec, LoadError> {
    let text = read(path)?;
    let spec = parse_matrix(&text, Format::from_path(path))?;
    tracing::debug!(
        file = %path.display(),
        parameters = spec.len(),
        "loaded matrix"
    );
    Ok(spec)
}

/// Decode and validate matrix text
///
/// # Errors
/// Returns [`LoadError`] if the text does not decode or is not a valid
/// matrix.
pub fn parse_matrix(text: &str, format: Format) -> Result<MatrixSpec, LoadError> {
    let document = decode(text, format)?;

    let list = match document {
        JsonValue::Object(mut map) => map.remove("matrix").ok_or_else(|| {
            LoadError::Invalid("expected a `matrix` key holding a list of parameters".into())
        })?,
        list @ JsonValue::Array(_) => list,
        _ => {
            return Err(LoadError::Invalid(
                "expected a list of parameters or a `matrix` key".into(),
            ))
        }
    };

    let spec: MatrixSpec =
        serde_json::from_value(list).map_err(|e| LoadError::Invalid(e.to_string()))?;
    validate(&spec)?;
    Ok(spec)
}

/// Decode the bundled [`SAMPLE_MATRIX`]
///
/// # Errors
/// Returns [`LoadError`] if the bundled text is not a valid matrix.
pub fn sample_matrix() -> Result<MatrixSpec, LoadError> {
    let spec = parse_matrix(SAMPLE_MATRIX, Format::Yaml)?;
    tracing::debug!(parameters = spec.len(), "using bundled sample matrix");
    Ok(spec)
}

/// Read a base configuration object
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read or does not decode.
pub fn load_base(path: &Path) -> Result<JsonValue, LoadError> {
    let text = read(path)?;
    let base = decode(&text, Format::from_path(path))?;
    tracing::debug!(file = %path.display(), "loaded base configuration");
    Ok(base)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(text: &str, format: Format) -> Result<JsonValue, LoadError> {
    Ok(match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    })
}

fn validate(spec: &MatrixSpec) -> Result<(), LoadError> {
    if spec.is_empty() {
        return Err(LoadError::Invalid("matrix has no parameters".into()));
    }

    for (index, param) in spec.iter().enumerate() {
        param
            .parameter
            .parse::<ParamPath>()
            .map_err(|source| LoadError::MalformedParameter {
                index,
                parameter: param.parameter.clone(),
                source,
            })?;

        if param.values.is_empty() {
            return Err(LoadError::Invalid(format!(
                "parameter {index} ('{}') has no values",
                param.parameter
            )));
        }
    }
    Ok(())
}
