//! Web-archive mode
//!
//! When a project is packaged as a single deployable archive, the archive is
//! exploded into an ephemeral directory and its top-level entries become the
//! only layer. The directory is owned by an [`ExplodedArchive`] handle: it
//! lives until the handle is closed or dropped, so callers decide when the
//! files are no longer needed.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::archive::extract_archive;
use crate::error::{CoreError, Result};
use crate::files::list_directory;
use crate::layers::LayerConfiguration;
use crate::logger::BuildLogger;
use crate::project::ProjectLayout;

const EXPLODED_PREFIX: &str = "layerkit-exploded-";

/// Ephemeral directory holding an exploded archive
///
/// Dropping the handle deletes the directory on a best-effort basis; use
/// [`close`](Self::close) to observe deletion errors or
/// [`keep`](Self::keep) to take ownership of the files.
#[derive(Debug)]
pub struct ExplodedArchive {
    dir: TempDir,
}

impl ExplodedArchive {
    /// Root of the exploded tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the exploded tree now
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }

    /// Stop managing the directory and return its path
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Find the web archive a project's build produced
///
/// An explicit `webArchive` wins. Otherwise `libsDir` must contain exactly
/// one `*.war` file.
pub fn locate_web_archive(layout: &ProjectLayout) -> Result<PathBuf> {
    if let Some(explicit) = &layout.web_archive {
        if !explicit.try_exists()? {
            return Err(CoreError::ArchiveNotFound {
                path: explicit.clone(),
            });
        }
        return Ok(explicit.clone());
    }

    let libs_dir = &layout.libs_dir;
    if !libs_dir.try_exists()? {
        return Err(CoreError::ArchiveNotFound {
            path: libs_dir.clone(),
        });
    }

    let mut candidates: Vec<PathBuf> = list_directory(libs_dir)?
        .into_iter()
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("war"))
        })
        .collect();

    match candidates.len() {
        0 => Err(CoreError::ArchiveNotFound {
            path: libs_dir.clone(),
        }),
        1 => Ok(candidates.remove(0)),
        count => Err(CoreError::AmbiguousArchive {
            dir: libs_dir.clone(),
            count,
        }),
    }
}

/// Explode a web archive and list its top-level entries as a single layer
///
/// The returned configuration only populates the exploded-archive layer. Its
/// paths point into the returned [`ExplodedArchive`], which must outlive any
/// use of them.
pub fn explode_web_archive(
    archive: &Path,
    logger: &dyn BuildLogger,
) -> Result<(LayerConfiguration, ExplodedArchive)> {
    if !archive.try_exists()? {
        return Err(CoreError::ArchiveNotFound {
            path: archive.to_path_buf(),
        });
    }

    let dir = tempfile::Builder::new().prefix(EXPLODED_PREFIX).tempdir()?;
    tracing::debug!(
        "Exploding {} into {}",
        archive.display(),
        dir.path().display()
    );

    // On failure `dir` is dropped here and the partial tree removed
    let report = extract_archive(archive, dir.path())?;
    let exploded = ExplodedArchive { dir };

    let files = list_directory(exploded.path())?;
    if files.is_empty() {
        logger.warn(&format!("Web archive {} is empty", archive.display()));
    }
    logger.info(&format!(
        "Exploded {} ({} files, {} top-level entries)",
        archive.display(),
        report.files,
        files.len()
    ));
    for file in &files {
        tracing::debug!("\t{}", file.display());
    }

    let config = LayerConfiguration::builder().exploded_archive(files).build()?;
    Ok((config, exploded))
}
