//! Core error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocked unzipping files outside destination: {entry}")]
    PathTraversal { entry: String },

    #[error("Refusing to extract link entry: {entry}")]
    LinkEntry { entry: String },

    #[error("Invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Unsupported archive format: {path}")]
    UnsupportedArchive { path: PathBuf },

    #[error("Archive not found: {path}")]
    ArchiveNotFound { path: PathBuf },

    #[error("Found {count} web archives in {dir}, set webArchive to pick one")]
    AmbiguousArchive { dir: PathBuf, count: usize },

    #[error("Exploded archive files cannot be combined with the {layer} layer")]
    MixedLayers { layer: &'static str },

    #[error("Path {path} appears in more than one layer")]
    DuplicatePath { path: PathBuf },

    #[error("Invalid project descriptor: {message}")]
    InvalidProject { message: String },

    #[error("Failed to parse project descriptor: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Whether this error means an archive tried to write outside its destination
    #[must_use]
    pub fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. } | Self::LinkEntry { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
