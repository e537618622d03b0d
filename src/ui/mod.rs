//! User interface module - console output for the release workflow.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_changelog, display_error, display_resolved_tags,
    display_status, display_success, format_boundary_warning, format_changelog,
    format_resolved_tags,
};
