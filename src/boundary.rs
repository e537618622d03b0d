use std::fmt;

use crate::domain::Version;

/// Warnings raised while cutting a release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No older tag in the release's major line; the changelog has no entries
    FirstReleaseInMajorLine { version: Version },
    /// No merged change requests fell inside the changelog window
    NoMergedChangeRequests { previous: Version, release: Version },
    /// The release was created but the archive could not be linked to it
    AssetLinkFailed { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FirstReleaseInMajorLine { version } => {
                write!(
                    f,
                    "{} is the first release of major version {}; changelog left empty",
                    version, version.major
                )
            }
            BoundaryWarning::NoMergedChangeRequests { previous, release } => {
                write!(
                    f,
                    "No merged merge requests between {} and {}",
                    previous, release
                )
            }
            BoundaryWarning::AssetLinkFailed { tag, reason } => {
                write!(
                    f,
                    "Release '{}' was created but linking the archive failed: {}",
                    tag, reason
                )
            }
        }
    }
}
