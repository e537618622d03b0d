use releaser::boundary::BoundaryWarning;
use releaser::domain::Version;
use releaser::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_first_release_display() {
    let warning = BoundaryWarning::FirstReleaseInMajorLine {
        version: Version::new(3, 0, 0),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("first release of major version 3"),
        "Message should name the major line, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("3.0.0"),
        "Message should contain version '3.0.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_merged_change_requests_display() {
    let warning = BoundaryWarning::NoMergedChangeRequests {
        previous: Version::new(1, 0, 0),
        release: Version::new(1, 1, 0),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("1.0.0") && display_msg.contains("1.1.0"),
        "Message should contain both versions, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_asset_link_failed_display() {
    let warning = BoundaryWarning::AssetLinkFailed {
        tag: "v1.1.0".to_string(),
        reason: "GitLab API error (422): Link already exists".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("v1.1.0"),
        "Message should contain tag 'v1.1.0', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("Link already exists"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::FirstReleaseInMajorLine {
        version: Version::new(1, 0, 0),
    };
    assert_eq!(a.clone(), a);
    assert_ne!(
        a,
        BoundaryWarning::FirstReleaseInMajorLine {
            version: Version::new(2, 0, 0)
        }
    );
}

// ============================================================================
// UI formatting tests
// ============================================================================

#[test]
fn test_format_asset_link_warning() {
    let output = ui::format_boundary_warning(&BoundaryWarning::AssetLinkFailed {
        tag: "v1.0.0".to_string(),
        reason: "timeout".to_string(),
    });

    let plain = console::strip_ansi_codes(&output);
    assert!(plain.contains("WARNING"));
    assert!(plain.contains("v1.0.0"));
    assert!(plain.contains("timeout"));
}

#[test]
fn test_format_resolved_tags_names_both_tags() {
    let output = ui::format_resolved_tags(Some("v1.0.0"), "v1.1.0");
    let plain = console::strip_ansi_codes(&output);

    let from = plain.find("v1.0.0").unwrap();
    let to = plain.find("v1.1.0").unwrap();
    assert!(from < to);
}
