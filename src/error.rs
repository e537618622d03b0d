use thiserror::Error;

use crate::domain::Version;

/// Unified error type for releaser operations
#[derive(Error, Debug)]
pub enum ReleaserError {
    #[error("Invalid version format: '{input}' ({reason})")]
    InvalidVersionFormat { input: String, reason: String },

    #[error("Empty catalog: the project has no tags")]
    EmptyCatalog,

    #[error("Tag not found: no tag matches version {0}")]
    TagNotFound(String),

    #[error("Malformed latest tag: '{0}' is not a version")]
    MalformedLatestTag(String),

    #[error("No previous version: no tag older than {0} in the same major line")]
    NoPreviousVersion(Version),

    #[error(
        "Inconsistent tag ordering: previous tag '{previous}' is not older than release tag '{release}'"
    )]
    InconsistentTagOrdering { previous: String, release: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitLab API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in releaser
pub type Result<T> = std::result::Result<T, ReleaserError>;

impl ReleaserError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaserError::Config(msg.into())
    }

    /// Create an archive error with context
    pub fn archive(msg: impl Into<String>) -> Self {
        ReleaserError::Archive(msg.into())
    }

    /// Create an API error from a status code and message
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        ReleaserError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a version format error for the given input
    pub fn invalid_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaserError::InvalidVersionFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaserError::config("missing project_id");
        assert_eq!(err.to_string(), "Configuration error: missing project_id");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaserError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_no_previous_version_names_major_line() {
        let err = ReleaserError::NoPreviousVersion(Version::new(3, 0, 0));
        let msg = err.to_string();
        assert!(msg.contains("3.0.0"));
        assert!(msg.contains("same major line"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaserError::config("x"), "Configuration error"),
            (ReleaserError::archive("x"), "Archive error"),
            (ReleaserError::api(404, "x"), "GitLab API error (404)"),
            (
                ReleaserError::invalid_version("x", "y"),
                "Invalid version format",
            ),
            (ReleaserError::EmptyCatalog, "Empty catalog"),
            (ReleaserError::TagNotFound("9.9.9".into()), "Tag not found"),
            (
                ReleaserError::MalformedLatestTag("nightly".into()),
                "Malformed latest tag",
            ),
            (
                ReleaserError::InconsistentTagOrdering {
                    previous: "v1.0.0".into(),
                    release: "v1.1.0".into(),
                },
                "Inconsistent tag ordering",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
