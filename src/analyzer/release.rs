use tracing::debug;

use crate::domain::{normalize, ResolvedTag, TagCatalog, Version};
use crate::error::{ReleaserError, Result};

/// Determine the tag being released.
///
/// With no requested version (or an empty one) the newest tag in the catalog
/// is released. Otherwise the request is normalized and parsed, and the first
/// catalog tag with an equal version is selected.
///
/// # Errors
/// * `EmptyCatalog` - no tags at all
/// * `MalformedLatestTag` - the newest tag is not a version and none was requested
/// * `InvalidVersionFormat` - the requested version does not parse
/// * `TagNotFound` - no tag carries the requested version
pub fn resolve_release(catalog: &TagCatalog, requested: Option<&str>) -> Result<ResolvedTag> {
    let requested = requested.map(str::trim).filter(|raw| !raw.is_empty());

    let Some(raw) = requested else {
        let latest = catalog.latest()?;
        let version = latest
            .parse_version()
            .map_err(|_| ReleaserError::MalformedLatestTag(latest.name.clone()))?;
        debug!(tag = %latest.name, %version, "releasing latest tag");
        return Ok(ResolvedTag::new(version, latest.clone()));
    };

    let target = Version::parse(normalize(raw))?;
    let tag = catalog.find_by_version(&target)?;
    debug!(tag = %tag.name, version = %target, "releasing requested tag");
    Ok(ResolvedTag::new(target, tag.clone()))
}
