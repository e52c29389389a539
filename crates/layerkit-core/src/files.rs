//! Filesystem helpers shared by the classifier, the extractor and the adapter
//!
//! Layer contents are only as reproducible as the order their files are
//! enumerated in, so every listing produced here is normalized and sorted.
//!
//! # Security
//!
//! [`canonicalize_lenient`] is the building block of the extraction sandbox:
//! - Every component that exists on disk is resolved through the real
//!   filesystem, symlinks included, even after a missing component
//! - Components that do not exist yet are applied lexically
//! - The result is always absolute, so callers can compare it with a
//!   canonical root using [`Path::starts_with`]

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// List the immediate children of a directory, sorted by path
///
/// This is a one-level listing: subdirectories are returned as entries, not
/// descended into.
pub fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        children.push(normalize_path(&entry?.path()));
    }
    sort_paths(&mut children);
    Ok(children)
}

/// Lexically normalize a path
///
/// Drops `.` components and redundant separators. `..` is kept as-is since
/// resolving it without the filesystem would be wrong in the presence of
/// symlinks.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Sort paths ascending by their normalized string form and drop duplicates
///
/// Comparison is byte-wise on the OS string, not component-wise, so
/// `lib/a-b.jar` sorts before `lib/a/b.jar`.
pub fn sort_paths(paths: &mut Vec<PathBuf>) {
    for path in paths.iter_mut() {
        *path = normalize_path(path);
    }
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup();
}

/// Canonicalize a path that may not exist yet
///
/// Components are resolved one at a time. Each step that exists on disk is
/// canonicalized by the OS, so a symlink is resolved wherever it appears,
/// including after a `..` that climbs back out of a missing directory.
/// Dangling symlinks are resolved through their target. Steps that do not
/// exist are applied lexically.
pub fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
    let mut resolved = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir()?
    };

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                resolved = match candidate.canonicalize() {
                    Ok(real) => real,
                    Err(err) if is_missing(&err) => match std::fs::read_link(&candidate) {
                        Ok(target) => canonicalize_lenient(&resolved.join(target))?,
                        Err(_) => candidate,
                    },
                    Err(err) => return Err(err.into()),
                };
            }
        }
    }

    Ok(resolved)
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
