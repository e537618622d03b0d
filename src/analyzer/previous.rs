use tracing::debug;

use crate::domain::{ResolvedTag, TagCatalog, Version};
use crate::error::{ReleaserError, Result};

/// Find the release preceding `release` within the same major version line.
///
/// Scans the catalog newest first and picks the first tag that parses as a
/// version, is strictly lower than `release`, and shares its major component.
/// Cross-major history never takes part in a changelog.
///
/// # Errors
/// * `NoPreviousVersion` - `release` is the first release of its major line
pub fn resolve_previous(catalog: &TagCatalog, release: &Version) -> Result<ResolvedTag> {
    catalog
        .versions()
        .filter(|(candidate, _)| candidate < release)
        .find(|(candidate, _)| candidate.major == release.major)
        .map(|(version, tag)| {
            debug!(tag = %tag.name, %version, %release, "resolved previous release");
            ResolvedTag::new(version, tag.clone())
        })
        .ok_or_else(|| ReleaserError::NoPreviousVersion(release.clone()))
}
