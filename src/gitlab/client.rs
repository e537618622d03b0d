use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;
use url::Url;

use super::{AssetLink, HostingService, ReleaseRecord, ReleaseRequest, UploadedFile, API_PATH};
use crate::changelog::MERGED_STATE;
use crate::domain::{ChangeRequestSummary, Tag};
use crate::error::{ReleaserError, Result};

/// Header carrying the personal/project access token
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Header naming the next page of a paginated list (empty on the last page)
const NEXT_PAGE_HEADER: &str = "x-next-page";

const PER_PAGE: &str = "100";

const USER_AGENT_VALUE: &str = concat!("releaser/", env!("CARGO_PKG_VERSION"));

/// GitLab REST API v4 client
#[derive(Clone)]
pub struct GitLabClient {
    api_base: Url,
    token: String,
    client: Client,
}

impl fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabClient")
            .field("api_base", &self.api_base.as_str())
            .field("token", &"*".repeat(self.token.len()))
            .finish()
    }
}

impl GitLabClient {
    /// Create a client for a GitLab instance.
    ///
    /// `base_url` is the instance root (e.g. `https://gitlab.com`); `/api/v4`
    /// is appended unless already present.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT_VALUE).build()?;

        Ok(GitLabClient {
            api_base: versioned_api_url(base_url)?,
            token: token.into(),
            client,
        })
    }

    /// The API root requests are issued against
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Build URL for a project endpoint; the project id is encoded as one segment
    pub fn project_url(&self, project_id: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ReleaserError::config(format!("GitLab URL cannot be a base: {}", self.api_base))
            })?
            .pop_if_empty()
            .push("projects")
            .push(project_id)
            .extend(segments);
        Ok(url)
    }

    /// Merged merge requests created inside `(created_after, created_before)`
    pub fn merge_requests_url(
        &self,
        project_id: &str,
        created_after: DateTime<Utc>,
        created_before: DateTime<Utc>,
    ) -> Result<Url> {
        let mut url = self.project_url(project_id, &["merge_requests"])?;
        url.query_pairs_mut()
            .append_pair("state", MERGED_STATE)
            .append_pair("created_after", &timestamp(created_after))
            .append_pair("created_before", &timestamp(created_before));
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(TOKEN_HEADER, &self.token)
    }

    /// GET every page of a list endpoint
    fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = String::from("1");

        loop {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("per_page", PER_PAGE)
                .append_pair("page", &page);

            debug!(url = %page_url, "GET");
            let response = self.authorized(self.client.get(page_url)).send()?;
            let next = next_page(&response);
            let batch: Vec<T> = handle_response(response)?;
            items.extend(batch);

            match next {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(items)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T> {
        debug!(url = %url, "POST");
        let response = self.authorized(self.client.post(url)).json(body).send()?;
        handle_response(response)
    }
}

impl HostingService for GitLabClient {
    fn list_tags(&self, project_id: &str) -> Result<Vec<Tag>> {
        let url = self.project_url(project_id, &["repository", "tags"])?;
        let payloads: Vec<TagPayload> = self.get_all(url)?;
        payloads.into_iter().map(TagPayload::into_tag).collect()
    }

    fn list_merged_change_requests(
        &self,
        project_id: &str,
        created_after: DateTime<Utc>,
        created_before: DateTime<Utc>,
    ) -> Result<Vec<ChangeRequestSummary>> {
        let url = self.merge_requests_url(project_id, created_after, created_before)?;
        let payloads: Vec<MergeRequestPayload> = self.get_all(url)?;
        Ok(payloads.into_iter().map(Into::into).collect())
    }

    fn upload_file(&self, project_id: &str, path: &Path) -> Result<UploadedFile> {
        let url = self.project_url(project_id, &["uploads"])?;
        let form = multipart::Form::new().file("file", path)?;

        debug!(url = %url, file = %path.display(), "POST multipart");
        let response = self.authorized(self.client.post(url)).multipart(form).send()?;
        let payload: UploadPayload = handle_response(response)?;

        Ok(UploadedFile {
            url: payload.url,
            display_name: payload.alt,
        })
    }

    fn create_release(&self, project_id: &str, release: &ReleaseRequest) -> Result<ReleaseRecord> {
        let url = self.project_url(project_id, &["releases"])?;
        let body = ReleaseBody {
            name: &release.name,
            tag_name: &release.tag_name,
            description: &release.description,
        };
        let payload: ReleasePayload = self.post_json(url, &body)?;

        Ok(ReleaseRecord {
            tag_name: payload.tag_name,
            name: payload.name.unwrap_or_else(|| release.name.clone()),
        })
    }

    fn link_release_asset(&self, project_id: &str, tag_name: &str, link: &AssetLink) -> Result<()> {
        let url = self.project_url(project_id, &["releases", tag_name, "assets", "links"])?;
        let body = LinkBody {
            name: &link.name,
            url: &link.url,
        };
        let _: serde_json::Value = self.post_json(url, &body)?;
        Ok(())
    }
}

/// Append `/api/v4` to an instance URL unless it already ends with it
fn versioned_api_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ReleaserError::config("GitLab URL is empty"));
    }

    let with_api = if trimmed.ends_with(API_PATH) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, API_PATH)
    };
    Ok(Url::parse(&with_api)?)
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn next_page(response: &Response) -> Option<String> {
    response
        .headers()
        .get(NEXT_PAGE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Decode a successful response, or turn an error response into `Api`
fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json()?);
    }

    let message = response
        .json::<ErrorPayload>()
        .ok()
        .and_then(ErrorPayload::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Err(ReleaserError::api(status.as_u16(), message))
}

#[derive(Debug, Deserialize)]
struct TagPayload {
    name: String,
    commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    committed_date: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
}

impl TagPayload {
    fn into_tag(self) -> Result<Tag> {
        let committed_at = self
            .commit
            .committed_date
            .or(self.commit.created_at)
            .ok_or_else(|| {
                ReleaserError::api(200, format!("tag '{}' has no commit timestamp", self.name))
            })?;
        Ok(Tag::new(self.name, committed_at))
    }
}

#[derive(Debug, Deserialize)]
struct MergeRequestPayload {
    id: u64,
    title: String,
    web_url: String,
    author: AuthorPayload,
}

#[derive(Debug, Deserialize)]
struct AuthorPayload {
    username: String,
    web_url: String,
}

impl From<MergeRequestPayload> for ChangeRequestSummary {
    fn from(mr: MergeRequestPayload) -> Self {
        ChangeRequestSummary {
            id: mr.id,
            title: mr.title,
            web_url: mr.web_url,
            author_name: mr.author.username,
            author_url: mr.author.web_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadPayload {
    alt: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    tag_name: String,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReleaseBody<'a> {
    name: &'a str,
    tag_name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct LinkBody<'a> {
    name: &'a str,
    url: &'a str,
}

/// GitLab reports errors as `{"message": ...}` (string or object) or `{"error": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<serde_json::Value>,
    error: Option<String>,
}

impl ErrorPayload {
    fn into_message(self) -> Option<String> {
        match self.message {
            Some(serde_json::Value::String(message)) => Some(message),
            Some(other) => Some(other.to_string()),
            None => self.error,
        }
    }
}
