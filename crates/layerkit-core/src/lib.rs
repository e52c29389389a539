//! layerkit Core - Container layer classification for compiled projects
//!
//! This crate turns the output of a build into a small number of
//! deterministically ordered file groups, ready to become container image
//! layers:
//! - `classify`: Partition classes, resources, dependencies and extra files
//! - `web_archive`: Explode a packaged web archive into a single layer
//! - `layers`: The immutable `LayerConfiguration` handed to image builders
//! - `archive`: Archive extraction that refuses to write outside its destination
//! - `project`: The `layerkit.yaml` project descriptor

pub mod archive;
pub mod classify;
pub mod error;
pub mod files;
pub mod layers;
pub mod logger;
pub mod project;
pub mod web_archive;

pub use archive::{
    ArchiveEntry, ArchiveFormat, EntryKind, ExtractOptions, ExtractionReport, LinkPolicy,
    extract_archive, extract_archive_atomic, extract_archive_with, list_archive,
    resolve_entry_target,
};
pub use classify::{
    BuildInputs, BuildOutputs, Classifier, MarkerPredicate, SnapshotPredicate, classify,
};
pub use error::{CoreError, Result};
pub use layers::{LayerConfiguration, LayerConfigurationBuilder, LayerKind, LayerSummary};
pub use logger::{BuildLogger, LogLevel, MemoryLogger, TracingLogger};
pub use project::{Packaging, ProjectLayout};
pub use web_archive::{ExplodedArchive, explode_web_archive, locate_web_archive};
