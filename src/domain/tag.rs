use chrono::{DateTime, Utc};

use crate::domain::version::{normalize, Version};
use crate::error::Result;

/// A repository tag as reported by the hosting service
///
/// The name is kept raw (possibly `v`-prefixed); the version is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub committed_at: DateTime<Utc>,
}

impl Tag {
    /// Create a new tag snapshot
    pub fn new(name: impl Into<String>, committed_at: DateTime<Utc>) -> Self {
        Tag {
            name: name.into(),
            committed_at,
        }
    }

    /// Extract version number from tag (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        normalize(&self.name)
    }

    /// Parse the tag name as a version
    pub fn parse_version(&self) -> Result<Version> {
        Version::parse(self.version_part())
    }

    /// Parsed version, or `None` for non-version tags
    pub fn version(&self) -> Option<Version> {
        self.parse_version().ok()
    }
}

/// A tag paired with the version parsed from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub version: Version,
    pub tag: Tag,
}

impl ResolvedTag {
    pub fn new(version: Version, tag: Tag) -> Self {
        ResolvedTag { version, tag }
    }
}
