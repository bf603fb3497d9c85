//! Error types for the PMX engine
//!
//! Provides the error taxonomy for:
//! - Malformed parameter paths
//! - Pathologically deep (or cyclic) configuration trees
//! - Matrix products over the configured ceiling
//! - Typed reads of absent paths
//! - Writes to array slots past the index ceiling

/// Malformed parameter path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path string is empty
    #[error("path is empty")]
    Empty,

    /// Two consecutive dots, or a leading/trailing dot
    #[error("path contains empty segment at position {position}")]
    EmptySegment {
        /// Zero-based index of the offending segment
        position: usize,
    },

    /// `[` without a matching `]`
    #[error("unterminated bracket in segment '{0}'")]
    UnterminatedBracket(String),

    /// Bracket content is not a non-negative integer
    #[error("invalid array index '{index}' in segment '{segment}'")]
    InvalidIndex {
        /// Whole segment text
        segment: String,
        /// Text between the brackets
        index: String,
    },

    /// Missing field name or trailing characters after `]`
    #[error("invalid segment '{0}'")]
    InvalidSegment(String),
}

/// Deep clone failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloneError {
    /// Nesting exceeded the configured limit
    #[error("clone depth exceeded limit of {limit}")]
    DepthExceeded {
        /// Maximum nesting depth allowed
        limit: usize,
    },
}

/// Typed read failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Navigation stopped before the end of the path
    #[error("path '{path}' does not resolve: nothing at '{at}'")]
    Missing {
        /// Full path requested
        path: String,
        /// Prefix of the path that first failed to resolve
        at: String,
    },
}

/// Write failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// Path addresses an array slot past the ceiling
    #[error("index {index} in '{path}' exceeds limit of {limit}")]
    IndexTooLarge {
        /// Offending path
        path: String,
        /// Index requested
        index: usize,
        /// Ceiling in force
        limit: usize,
    },
}

/// Main engine error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Parameter path could not be parsed
    #[error("malformed path: {0}")]
    MalformedPath(#[from] PathError),

    /// Base object too deep to clone
    #[error(transparent)]
    TooDeep(#[from] CloneError),

    /// Matrix product over the ceiling
    ///
    /// `requested` is `None` when the product overflows `usize`.
    #[error("matrix would produce {} combinations, limit is {limit}", display_count(.requested))]
    CombinationLimitExceeded {
        /// Product of all parameter domain sizes
        requested: Option<usize>,
        /// Configured ceiling
        limit: usize,
    },

    /// Override writes an array slot past the configured ceiling
    #[error("index {index} in '{path}' exceeds limit of {limit}")]
    IndexLimitExceeded {
        /// Offending path
        path: String,
        /// Index requested
        index: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Engine configuration rejected
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl From<WriteError> for Error {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::IndexTooLarge { path, index, limit } => {
                Self::IndexLimitExceeded { path, index, limit }
            }
        }
    }
}

fn display_count(count: &Option<usize>) -> String {
    count.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string())
}

/// Result alias for engine operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
