//! Hosting service abstraction layer
//!
//! The [HostingService] trait covers everything the release workflow needs from
//! the project's hosting service:
//!
//! - [client::GitLabClient]: the GitLab REST API v4 over a blocking HTTP client
//! - [mock::MockHostingService]: an in-memory implementation for testing
//!
//! Workflow code depends on the trait, never on a concrete client.

pub mod client;
pub mod mock;

pub use client::GitLabClient;
pub use mock::MockHostingService;

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::domain::{ChangeRequestSummary, Tag};
use crate::error::Result;

/// Path of the REST API below the instance root
pub(crate) const API_PATH: &str = "/api/v4";

/// A file uploaded to the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Project-relative URL of the upload (e.g. `/uploads/<secret>/1.2.0.tar.gz`)
    pub url: String,
    /// Human-readable name of the upload
    pub display_name: String,
}

/// Parameters for creating a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub name: String,
    pub tag_name: String,
    pub description: String,
}

/// A release as recorded by the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub tag_name: String,
    pub name: String,
}

/// An asset link attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    pub name: String,
    pub url: String,
}

/// Blocking operations against the project's hosting service
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Implementations map transport and API failures into
/// [crate::error::ReleaserError]; nothing is retried.
pub trait HostingService: Send + Sync {
    /// All tags of the project with their commit timestamps
    fn list_tags(&self, project_id: &str) -> Result<Vec<Tag>>;

    /// Merged change requests created strictly between the two instants,
    /// in the order the service returns them
    fn list_merged_change_requests(
        &self,
        project_id: &str,
        created_after: DateTime<Utc>,
        created_before: DateTime<Utc>,
    ) -> Result<Vec<ChangeRequestSummary>>;

    /// Upload a file to the project
    fn upload_file(&self, project_id: &str, path: &Path) -> Result<UploadedFile>;

    /// Create a release for an existing tag
    fn create_release(&self, project_id: &str, release: &ReleaseRequest) -> Result<ReleaseRecord>;

    /// Attach an asset link to the release of `tag_name`
    fn link_release_asset(&self, project_id: &str, tag_name: &str, link: &AssetLink) -> Result<()>;
}

/// Absolute URL of an uploaded file, as linked from a release.
///
/// Uploads are served relative to the project's web page:
/// `<base>/<project>/<upload url>`. `base_url` may be given with or without
/// the `/api/v4` suffix accepted by the API client.
pub fn upload_web_url(base_url: &str, project_id: &str, upload_url: &str) -> String {
    format!(
        "{}/{}/{}",
        instance_root(base_url),
        project_id,
        upload_url.trim_start_matches('/')
    )
}

/// Instance web root of a configured GitLab URL
fn instance_root(base_url: &str) -> &str {
    let trimmed = base_url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(API_PATH)
        .unwrap_or(trimmed)
        .trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_web_url() {
        assert_eq!(
            upload_web_url(
                "https://gitlab.example.com/",
                "group/app",
                "/uploads/abc123/1.2.0.tar.gz"
            ),
            "https://gitlab.example.com/group/app/uploads/abc123/1.2.0.tar.gz"
        );
    }

    #[test]
    fn test_upload_web_url_strips_api_path() {
        for base in [
            "https://gitlab.example.com/api/v4",
            "https://gitlab.example.com/api/v4/",
            " https://gitlab.example.com ",
        ] {
            assert_eq!(
                upload_web_url(base, "group/app", "/uploads/abc123/1.2.0.tar.gz"),
                "https://gitlab.example.com/group/app/uploads/abc123/1.2.0.tar.gz"
            );
        }
    }

    #[test]
    fn test_upload_web_url_keeps_subpath_installs() {
        assert_eq!(
            upload_web_url(
                "https://example.com/gitlab/api/v4",
                "7",
                "uploads/abc/1.0.0.tar.gz"
            ),
            "https://example.com/gitlab/7/uploads/abc/1.0.0.tar.gz"
        );
    }
}
