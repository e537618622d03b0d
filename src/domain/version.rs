use crate::error::{ReleaserError, Result};
use semver::Prerelease;
use std::fmt;

/// Strip the leading `v` epoch marker from a tag or version string.
///
/// Purely textual: nothing is validated, and every other character is left
/// as is. Stripping the whole run of leading `v`s keeps the function
/// idempotent (`normalize(normalize(x)) == normalize(x)`).
pub fn normalize(raw: &str) -> &str {
    raw.trim_start_matches('v')
}

/// Semantic version representation
///
/// Ordered by major, minor, patch, then pre-release label using semver
/// precedence (`1.0.0-rc.1 < 1.0.0`). Build metadata is discarded on parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

impl Version {
    /// Create a new release version without a pre-release label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    /// Parse an already normalized version string (e.g. "1.2.3" or "2.0.0-rc.1")
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed =
            semver::Version::parse(raw).map_err(|e| ReleaserError::invalid_version(raw, e.to_string()))?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
        })
    }

    /// Normalize a raw tag name or user input, then parse it
    pub fn from_raw(raw: &str) -> Result<Self> {
        Self::parse(normalize(raw))
    }

    /// Whether this version carries a pre-release label
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}
