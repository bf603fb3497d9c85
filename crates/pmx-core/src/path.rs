//! Parameter paths for addressing within configuration trees
//!
//! Provides [`ParamPath`] for addressing fields and array slots of a
//! configuration object with strings like `character.style.chat[0]`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::PathError;

/// One addressing step: a field name, optionally followed by an array index
///
/// `chat[0]` is `Segment { field: "chat", index: Some(0) }`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    field: String,
    index: Option<usize>,
}

impl Segment {
    /// Plain field segment
    #[inline]
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            index: None,
        }
    }

    /// Field segment addressing one slot of the sequence stored at `name`
    #[inline]
    #[must_use]
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            field: name.into(),
            index: Some(index),
        }
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field
    }

    /// Array index, if any
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    fn parse(token: &str) -> Result<Self, PathError> {
        let Some(open) = token.find('[') else {
            if token.contains(']') {
                return Err(PathError::InvalidSegment(token.to_string()));
            }
            return Ok(Self::field(token));
        };

        let field = &token[..open];
        if field.is_empty() || field.contains(']') {
            return Err(PathError::InvalidSegment(token.to_string()));
        }

        let rest = &token[open + 1..];
        let Some(close) = rest.find(']') else {
            return Err(PathError::UnterminatedBracket(token.to_string()));
        };

        let digits = &rest[..close];
        let invalid_index = || PathError::InvalidIndex {
            segment: token.to_string(),
            index: digits.to_string(),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_index());
        }
        let index = digits.parse::<usize>().map_err(|_| invalid_index())?;

        // Only one index per segment: `a[0][1]` is rejected here.
        if !rest[close + 1..].is_empty() {
            return Err(PathError::InvalidSegment(token.to_string()));
        }

        Ok(Self::indexed(field, index))
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.field, index),
            None => f.write_str(&self.field),
        }
    }
}

/// Parsed parameter path
///
/// Ordered sequence of [`Segment`]s, root to leaf. Whether an indexed
/// segment actually lands on a sequence is only checked when the path is
/// applied to an object.
///
/// # Examples
/// - `character.name` → `[character, name]`
/// - `character.style.chat[0]` → `[character, style, chat[0]]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ParamPath(Vec<Segment>);

impl ParamPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

/// Parse a dot-separated parameter path
///
/// # Errors
/// Returns [`PathError`] if the path is empty, has an empty segment, or a
/// bracket that is unterminated, not a non-negative integer, or followed by
/// further characters.
pub fn parse(path: &str) -> Result<ParamPath, PathError> {
    path.parse()
}

impl FromStr for ParamPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        s.split('.')
            .enumerate()
            .map(|(position, token)| {
                if token.is_empty() {
                    Err(PathError::EmptySegment { position })
                } else {
                    Segment::parse(token)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Display for ParamPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for ParamPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}
