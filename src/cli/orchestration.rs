//! Main release workflow orchestration logic
//!
//! Sequences the pure resolution steps with the hosting-service and archive
//! collaborators. This is the only layer that decides whether a failure aborts
//! the release or is downgraded to a warning.

use std::path::PathBuf;

use crate::analyzer::{resolve_previous, resolve_release};
use crate::archive::{archive_name, create_archive};
use crate::boundary::BoundaryWarning;
use crate::changelog::{build_window, render};
use crate::config::Config;
use crate::domain::{TagCatalog, Version};
use crate::error::{ReleaserError, Result};
use crate::gitlab::{upload_web_url, AssetLink, HostingService, ReleaseRequest};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can
/// be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Raw version to release; `None` releases the latest tag
    pub version: Option<String>,

    /// Directory the release archive is written to
    pub archive_dir: PathBuf,
}

impl Default for ReleaseWorkflowArgs {
    fn default() -> Self {
        ReleaseWorkflowArgs {
            version: None,
            archive_dir: PathBuf::from("."),
        }
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The released version
    pub version: Version,

    /// The tag the release was created for
    pub tag_name: String,

    /// The previous release in the same major line, if any
    pub previous_version: Option<Version>,

    /// Release description
    pub changelog: String,

    /// Local path of the release archive
    pub archive: PathBuf,

    /// URL the archive was linked under
    pub asset_url: String,

    /// Non-fatal issues encountered along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// 1. Fetch tags and resolve the release tag
/// 2. Resolve the previous release and build the changelog
/// 3. Archive the configured files
/// 4. Upload the archive, create the release, link the archive to it
///
/// # Arguments
///
/// * `args` - Workflow arguments (requested version, archive directory)
/// * `config` - Releaser configuration
/// * `service` - Hosting service to release against
///
/// # Returns
///
/// Result containing the created release info or the first fatal error
pub fn run_release_workflow<S: HostingService + ?Sized>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    service: &S,
) -> Result<WorkflowResult> {
    config.validate()?;
    let project_id = config.project_id.as_str();
    let mut warnings = Vec::new();

    ui::display_status(&format!("Fetching tags for project {}...", project_id));
    let catalog = TagCatalog::new(service.list_tags(project_id)?);
    let release = resolve_release(&catalog, args.version.as_deref())?;

    let (previous_version, changelog) = match resolve_previous(&catalog, &release.version) {
        Ok(previous) => {
            ui::display_resolved_tags(Some(&previous.tag.name), &release.tag.name);
            let window = build_window(&previous, &release)?;

            ui::display_status("Collecting merged merge requests...");
            let change_requests =
                service.list_merged_change_requests(project_id, window.start, window.end)?;
            if change_requests.is_empty() {
                warnings.push(BoundaryWarning::NoMergedChangeRequests {
                    previous: previous.version.clone(),
                    release: release.version.clone(),
                });
            }

            (Some(previous.version), window.render(&change_requests))
        }
        Err(ReleaserError::NoPreviousVersion(version)) => {
            ui::display_resolved_tags(None, &release.tag.name);
            warnings.push(BoundaryWarning::FirstReleaseInMajorLine { version });
            (None, render(&release.version, &[]))
        }
        Err(e) => return Err(e),
    };
    ui::display_changelog(&changelog);

    let destination = args.archive_dir.join(archive_name(&release.version));
    ui::display_status(&format!("Creating archive {}", destination.display()));
    let archive = create_archive(&config.files, &destination)?;

    ui::display_status("Uploading archive...");
    let upload = service.upload_file(project_id, &archive)?;

    ui::display_status(&format!("Creating release for tag {}", release.tag.name));
    let record = service.create_release(
        project_id,
        &ReleaseRequest {
            name: release.version.to_string(),
            tag_name: release.tag.name.clone(),
            description: changelog.clone(),
        },
    )?;

    let asset_url = upload_web_url(&config.gitlab.url, project_id, &upload.url);
    let link = AssetLink {
        name: upload.display_name,
        url: asset_url.clone(),
    };
    if let Err(e) = service.link_release_asset(project_id, &record.tag_name, &link) {
        warnings.push(BoundaryWarning::AssetLinkFailed {
            tag: record.tag_name.clone(),
            reason: e.to_string(),
        });
    }

    Ok(WorkflowResult {
        version: release.version,
        tag_name: record.tag_name,
        previous_version,
        changelog,
        archive,
        asset_url,
        warnings,
    })
}
