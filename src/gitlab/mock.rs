use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{ChangeRequestSummary, Tag};
use crate::error::{ReleaserError, Result};
use crate::gitlab::{AssetLink, HostingService, ReleaseRecord, ReleaseRequest, UploadedFile};

/// Mock hosting service for testing without network access
///
/// Serves a fixed tag list and merged change requests, and records every
/// upload, release and asset link it is asked to create.
#[derive(Default)]
pub struct MockHostingService {
    tags: Vec<Tag>,
    change_requests: Vec<(DateTime<Utc>, ChangeRequestSummary)>,
    link_error: Option<String>,
    queries: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
    uploads: Mutex<Vec<PathBuf>>,
    releases: Mutex<Vec<ReleaseRequest>>,
    links: Mutex<Vec<(String, AssetLink)>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHostingService {
    /// Create a new empty mock service
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, in the order the service will report it
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Add a merged change request created at `created_at`
    pub fn add_change_request(&mut self, created_at: DateTime<Utc>, summary: ChangeRequestSummary) {
        self.change_requests.push((created_at, summary));
    }

    /// Make every asset link request fail with `message`
    pub fn fail_asset_links(&mut self, message: impl Into<String>) {
        self.link_error = Some(message.into());
    }

    /// Windows passed to `list_merged_change_requests`
    pub fn queries(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        locked(&self.queries).clone()
    }

    /// Files passed to `upload_file`
    pub fn uploads(&self) -> Vec<PathBuf> {
        locked(&self.uploads).clone()
    }

    /// Releases passed to `create_release`
    pub fn releases(&self) -> Vec<ReleaseRequest> {
        locked(&self.releases).clone()
    }

    /// `(tag name, link)` pairs successfully linked
    pub fn links(&self) -> Vec<(String, AssetLink)> {
        locked(&self.links).clone()
    }
}

impl HostingService for MockHostingService {
    fn list_tags(&self, _project_id: &str) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn list_merged_change_requests(
        &self,
        _project_id: &str,
        created_after: DateTime<Utc>,
        created_before: DateTime<Utc>,
    ) -> Result<Vec<ChangeRequestSummary>> {
        locked(&self.queries).push((created_after, created_before));

        Ok(self
            .change_requests
            .iter()
            .filter(|(created_at, _)| *created_at > created_after && *created_at < created_before)
            .map(|(_, summary)| summary.clone())
            .collect())
    }

    fn upload_file(&self, _project_id: &str, path: &Path) -> Result<UploadedFile> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ReleaserError::api(400, format!("not a file: {}", path.display())))?;

        locked(&self.uploads).push(path.to_path_buf());
        Ok(UploadedFile {
            url: format!("/uploads/mock/{}", file_name),
            display_name: file_name,
        })
    }

    fn create_release(&self, _project_id: &str, release: &ReleaseRequest) -> Result<ReleaseRecord> {
        let mut releases = locked(&self.releases);
        if releases.iter().any(|r| r.tag_name == release.tag_name) {
            return Err(ReleaserError::api(409, "Release already exists"));
        }

        releases.push(release.clone());
        Ok(ReleaseRecord {
            tag_name: release.tag_name.clone(),
            name: release.name.clone(),
        })
    }

    fn link_release_asset(&self, _project_id: &str, tag_name: &str, link: &AssetLink) -> Result<()> {
        if let Some(message) = &self.link_error {
            return Err(ReleaserError::api(422, message.clone()));
        }

        locked(&self.links).push((tag_name.to_string(), link.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn summary(id: u64) -> ChangeRequestSummary {
        ChangeRequestSummary {
            id,
            title: format!("change {}", id),
            web_url: format!("https://gitlab.example.com/mr/{}", id),
            author_name: "bob".to_string(),
            author_url: "https://gitlab.example.com/bob".to_string(),
        }
    }

    #[test]
    fn test_mock_tags_keep_insertion_order() {
        let mut service = MockHostingService::new();
        service.add_tag(Tag::new("v1.0.0", at(1)));
        service.add_tag(Tag::new("v2.0.0", at(2)));

        let names: Vec<String> = service
            .list_tags("p")
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["v1.0.0", "v2.0.0"]);
    }

    #[test]
    fn test_mock_change_requests_filtered_by_exclusive_window() {
        let mut service = MockHostingService::new();
        service.add_change_request(at(10), summary(1));
        service.add_change_request(at(20), summary(2));
        service.add_change_request(at(30), summary(3));

        let found = service
            .list_merged_change_requests("p", at(10), at(30))
            .unwrap();
        assert_eq!(found, vec![summary(2)]);
        assert_eq!(service.queries(), vec![(at(10), at(30))]);
    }

    #[test]
    fn test_mock_records_release_and_rejects_duplicates() {
        let service = MockHostingService::new();
        let request = ReleaseRequest {
            name: "1.0.0".to_string(),
            tag_name: "v1.0.0".to_string(),
            description: "notes".to_string(),
        };

        assert_eq!(service.create_release("p", &request).unwrap().tag_name, "v1.0.0");
        assert!(service.create_release("p", &request).is_err());
        assert_eq!(service.releases(), vec![request]);
    }

    #[test]
    fn test_mock_link_failure() {
        let mut service = MockHostingService::new();
        service.fail_asset_links("link exists");
        let link = AssetLink {
            name: "1.0.0.tar.gz".to_string(),
            url: "https://gitlab.example.com/p/uploads/mock/1.0.0.tar.gz".to_string(),
        };

        assert!(service.link_release_asset("p", "v1.0.0", &link).is_err());
        assert!(service.links().is_empty());
    }
}
