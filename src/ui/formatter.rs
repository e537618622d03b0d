//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from the
//! release workflow.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format a boundary warning for display.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// Format the release version resolution.
///
/// # Arguments
/// * `previous` - Tag of the previous release (None for the first release of a major line)
/// * `release` - Tag being released
pub fn format_resolved_tags(previous: Option<&str>, release: &str) -> String {
    match previous {
        Some(previous) => format!(
            "\n{}\n  From: {}\n  To:   {}",
            style("Release:").bold(),
            style(previous).red(),
            style(release).green()
        ),
        None => format!(
            "\n{}\n  Tag: {}",
            style("Initial Release:").bold(),
            style(release).green()
        ),
    }
}

/// Display the release version resolution.
pub fn display_resolved_tags(previous: Option<&str>, release: &str) {
    println!("{}", format_resolved_tags(previous, release));
}

/// Format the rendered changelog, indented under a heading.
pub fn format_changelog(changelog: &str) -> String {
    let mut output = format!("\n{}", style("Changelog:").bold().underlined());
    for line in changelog.lines() {
        output.push_str("\n  ");
        output.push_str(line);
    }
    output
}

/// Display the rendered changelog.
pub fn display_changelog(changelog: &str) {
    println!("{}", format_changelog(changelog));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use console::strip_ansi_codes;

    #[test]
    fn test_format_resolved_tags_with_previous() {
        let output = format_resolved_tags(Some("v1.0.0"), "v1.1.0");
        assert_eq!(
            strip_ansi_codes(&output),
            "\nRelease:\n  From: v1.0.0\n  To:   v1.1.0"
        );
    }

    #[test]
    fn test_format_resolved_tags_initial_release() {
        let output = format_resolved_tags(None, "v2.0.0");
        assert_eq!(strip_ansi_codes(&output), "\nInitial Release:\n  Tag: v2.0.0");
    }

    #[test]
    fn test_format_changelog_indents_lines() {
        let output = format_changelog("### Release notes for 1.1.0\n#### Merged Merge Requests\n");
        assert_eq!(
            strip_ansi_codes(&output),
            "\nChangelog:\n  ### Release notes for 1.1.0\n  #### Merged Merge Requests"
        );
    }

    #[test]
    fn test_format_boundary_warning() {
        let output = format_boundary_warning(&BoundaryWarning::FirstReleaseInMajorLine {
            version: Version::new(3, 0, 0),
        });
        let plain = strip_ansi_codes(&output);
        assert!(plain.starts_with("⚠ WARNING: "));
        assert!(plain.contains("3.0.0"));
    }
}
