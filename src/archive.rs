use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::domain::Version;
use crate::error::{ReleaserError, Result};

/// File name of the release archive for `version` (e.g. "1.2.0.tar.gz")
pub fn archive_name(version: &Version) -> String {
    format!("{}.tar.gz", version)
}

/// Package `paths` into a gzip-compressed tarball at `destination`.
///
/// Directories are added recursively. Entries keep the path they were given,
/// minus any root or `..` components, with no extra top-level folder. An
/// existing archive at `destination` is overwritten.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written archive
/// * `Err` - No paths given, or any path could not be read or written
pub fn create_archive<P: AsRef<Path>>(paths: &[P], destination: &Path) -> Result<PathBuf> {
    if paths.is_empty() {
        return Err(ReleaserError::archive("no files to archive"));
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(destination).map_err(|e| {
        ReleaserError::archive(format!("cannot create '{}': {}", destination.display(), e))
    })?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for path in paths {
        let path = path.as_ref();
        let name = entry_name(path);
        debug!(path = %path.display(), entry = %name.display(), "archiving");

        let appended = if path.is_dir() {
            builder.append_dir_all(&name, path)
        } else {
            builder.append_path_with_name(path, &name)
        };
        appended.map_err(|e| {
            ReleaserError::archive(format!("cannot add '{}': {}", path.display(), e))
        })?;
    }

    builder.into_inner()?.finish()?;
    Ok(destination.to_path_buf())
}

fn entry_name(path: &Path) -> PathBuf {
    let name: PathBuf = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    if name.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        name
    }
}
