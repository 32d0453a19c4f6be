//! Dotted field paths used in diagnostics
//!
//! Provides [`FieldPath`], the `camera.position`-style prefix a section is
//! validated under.

use std::fmt::{self, Display, Formatter};

/// Path of a section within a profile document
///
/// Array elements are addressed by their section name, not their index:
/// every entry of `modules` validates under `module`.
///
/// # Examples
/// - `["camera"]` → `camera`
/// - `["camera", "position"]` → `camera.position`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
