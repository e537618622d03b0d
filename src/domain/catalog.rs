use crate::domain::{Tag, Version};
use crate::error::{ReleaserError, Result};

/// Read-only view of every tag fetched for a project in one invocation
///
/// Tags are ordered newest first by commit timestamp when the catalog is
/// built, so traversal order never depends on how the hosting service happened
/// to sort its response. Ties keep their fetch order.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    /// Build a catalog from a single tag fetch
    pub fn new(mut tags: Vec<Tag>) -> Self {
        tags.sort_by(|a, b| b.committed_at.cmp(&a.committed_at));
        TagCatalog { tags }
    }

    /// The newest tag
    pub fn latest(&self) -> Result<&Tag> {
        self.tags.first().ok_or(ReleaserError::EmptyCatalog)
    }

    /// First tag whose normalized name parses to `version`
    pub fn find_by_version(&self, version: &Version) -> Result<&Tag> {
        self.versions()
            .find(|(candidate, _)| candidate == version)
            .map(|(_, tag)| tag)
            .ok_or_else(|| ReleaserError::TagNotFound(version.to_string()))
    }

    /// All tags, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.tags.iter()
    }

    /// Tags that parse as versions, newest first; non-version tags are skipped
    pub fn versions(&self) -> impl Iterator<Item = (Version, &Tag)> + '_ {
        self.tags
            .iter()
            .filter_map(|tag| tag.version().map(|version| (version, tag)))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagCatalog {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
