//! Profile schema versions
//!
//! Provides [`Version`], the `{major, minor}` pair every profile document
//! declares, and [`CURRENT_VERSION`], the revision this crate writes.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Schema revision a profile document was written against
///
/// Ordered by `major` first, then `minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    /// Major revision; a newer major cannot be read
    pub major: u32,
    /// Minor revision; newer minors only add optional fields
    pub minor: u32,
}

/// The revision produced by encoding and by migration
pub const CURRENT_VERSION: Version = Version::new(1, 1);

impl Version {
    /// Create a version
    #[inline]
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether documents at this version can be read by a reader at `current`
    ///
    /// Any older version is readable (through migration), as is a newer minor
    /// of the same major.
    #[inline]
    #[must_use]
    pub fn is_readable_by(self, current: Self) -> bool {
        self.major <= current.major
    }
}

impl Default for Version {
    fn default() -> Self {
        CURRENT_VERSION
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
