use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Write;
use tracing::debug;

use crate::domain::{ChangeRequestSummary, ResolvedTag, Version};
use crate::error::{ReleaserError, Result};

/// Margin added on each side of the window so that commits made exactly at a
/// tag's timestamp fall inside the service's exclusive range query.
pub const WINDOW_MARGIN: TimeDelta = TimeDelta::seconds(1);

/// Merge request state the window query is restricted to
pub const MERGED_STATE: &str = "merged";

/// Exclusive time range selecting the merged change requests of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub previous_version: Version,
    pub release_version: Version,
}

impl ChangelogWindow {
    /// Render the changelog for this window's release
    pub fn render(&self, change_requests: &[ChangeRequestSummary]) -> String {
        render(&self.release_version, change_requests)
    }
}

/// Derive the changelog window spanning two resolved tags.
///
/// The previous tag must have been committed strictly before the release tag;
/// otherwise the tag timestamps contradict the version ordering and the window
/// would be empty or inverted.
pub fn build_window(previous: &ResolvedTag, release: &ResolvedTag) -> Result<ChangelogWindow> {
    if previous.tag.committed_at >= release.tag.committed_at {
        return Err(ReleaserError::InconsistentTagOrdering {
            previous: previous.tag.name.clone(),
            release: release.tag.name.clone(),
        });
    }

    let start = previous.tag.committed_at - WINDOW_MARGIN;
    let end = release.tag.committed_at + WINDOW_MARGIN;
    debug!(%start, %end, "changelog window");

    Ok(ChangelogWindow {
        start,
        end,
        previous_version: previous.version.clone(),
        release_version: release.version.clone(),
    })
}

/// Render release notes for `release`.
///
/// Change requests are listed in the order given. With none, only the header
/// line is produced.
pub fn render(release: &Version, change_requests: &[ChangeRequestSummary]) -> String {
    let mut changelog = format!("### Release notes for {}\n", release);

    if !change_requests.is_empty() {
        changelog.push_str("#### Merged Merge Requests\n");
        for cr in change_requests {
            let _ = writeln!(
                changelog,
                "- {} [#{}]({}) ([{}]({}))",
                cr.title, cr.id, cr.web_url, cr.author_name, cr.author_url
            );
        }
    }

    changelog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn resolved(name: &str, secs: i64) -> ResolvedTag {
        let tag = Tag::new(name, at(secs));
        ResolvedTag::new(tag.parse_version().unwrap(), tag)
    }

    fn change_request(id: u64, title: &str) -> ChangeRequestSummary {
        ChangeRequestSummary {
            id,
            title: title.to_string(),
            web_url: format!("https://gitlab.example.com/group/app/-/merge_requests/{}", id),
            author_name: "alice".to_string(),
            author_url: "https://gitlab.example.com/alice".to_string(),
        }
    }

    #[test]
    fn test_window_applies_margin() {
        let window = build_window(&resolved("v2.0.0", 50), &resolved("v2.1.0", 100)).unwrap();
        assert_eq!(window.start, at(49));
        assert_eq!(window.end, at(101));
        assert_eq!(window.previous_version, Version::new(2, 0, 0));
        assert_eq!(window.release_version, Version::new(2, 1, 0));
        assert!(window.start < window.end);
    }

    #[test]
    fn test_window_equal_timestamps() {
        assert!(matches!(
            build_window(&resolved("v2.0.0", 100), &resolved("v2.1.0", 100)),
            Err(ReleaserError::InconsistentTagOrdering { .. })
        ));
    }

    #[test]
    fn test_window_inverted_timestamps() {
        match build_window(&resolved("v2.0.0", 101), &resolved("v2.1.0", 100)) {
            Err(ReleaserError::InconsistentTagOrdering { previous, release }) => {
                assert_eq!(previous, "v2.0.0");
                assert_eq!(release, "v2.1.0");
            }
            other => panic!("expected InconsistentTagOrdering, got {:?}", other),
        }
    }

    #[test]
    fn test_render_with_change_requests() {
        let changelog = render(
            &Version::new(2, 1, 0),
            &[change_request(7, "Fix X"), change_request(3, "Add Y")],
        );
        let lines: Vec<&str> = changelog.lines().collect();
        assert_eq!(lines[0], "### Release notes for 2.1.0");
        assert_eq!(lines[1], "#### Merged Merge Requests");
        assert_eq!(
            lines[2],
            "- Fix X [#7](https://gitlab.example.com/group/app/-/merge_requests/7) ([alice](https://gitlab.example.com/alice))"
        );
        assert!(lines[3].starts_with("- Add Y [#3]"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_without_change_requests() {
        let changelog = render(&Version::new(3, 0, 0), &[]);
        assert_eq!(changelog, "### Release notes for 3.0.0\n");
    }

    #[test]
    fn test_window_render_uses_release_version() {
        let window = build_window(&resolved("v1.0.0", 1), &resolved("v1.0.1-rc.1", 2)).unwrap();
        assert!(window
            .render(&[])
            .starts_with("### Release notes for 1.0.1-rc.1"));
    }
}
