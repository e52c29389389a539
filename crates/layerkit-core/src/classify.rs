//! Classification of compiled build output into layers
//!
//! The classifier partitions compiled classes, resources, runtime
//! dependencies and extra files into disjoint, sorted layers. It knows
//! nothing about the build system producing them; callers describe their
//! build through [`BuildOutputs`].
//!
//! # Example
//!
//! ```rust,no_run
//! use layerkit_core::{classify, BuildInputs, TracingLogger};
//!
//! # fn example() -> layerkit_core::Result<()> {
//! let inputs = BuildInputs {
//!     classes_dirs: vec!["build/classes/java/main".into()],
//!     resources_dir: "build/resources/main".into(),
//!     runtime_classpath: vec!["libs/core-1.0.jar".into()],
//!     extra_dir: "src/main/jib".into(),
//! };
//! let layers = classify(&inputs, &TracingLogger)?;
//! for (kind, files) in layers.layers() {
//!     println!("{kind}: {} entries", files.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::{list_directory, normalize_path};
use crate::layers::LayerConfiguration;
use crate::logger::BuildLogger;

/// Marker that identifies snapshot dependencies by default
pub const DEFAULT_SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Where a build put its output
///
/// Implemented by [`BuildInputs`] for plain values and by
/// [`ProjectLayout`](crate::project::ProjectLayout) for descriptor files.
pub trait BuildOutputs {
    /// Compiled class output directories, in build order
    fn classes_dirs(&self) -> &[PathBuf];

    /// Processed resources directory
    fn resources_dir(&self) -> &Path;

    /// Effective runtime classpath; may include the directories above
    fn runtime_classpath(&self) -> &[PathBuf];

    /// Directory of extra files copied into the image as-is
    fn extra_dir(&self) -> &Path;
}

/// Plain-value [`BuildOutputs`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInputs {
    pub classes_dirs: Vec<PathBuf>,
    pub resources_dir: PathBuf,
    pub runtime_classpath: Vec<PathBuf>,
    pub extra_dir: PathBuf,
}

impl BuildOutputs for BuildInputs {
    fn classes_dirs(&self) -> &[PathBuf] {
        &self.classes_dirs
    }

    fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    fn runtime_classpath(&self) -> &[PathBuf] {
        &self.runtime_classpath
    }

    fn extra_dir(&self) -> &Path {
        &self.extra_dir
    }
}

/// Decides whether a dependency goes into the snapshot layer
pub trait SnapshotPredicate {
    fn is_snapshot(&self, dependency: &Path) -> bool;
}

impl<F> SnapshotPredicate for F
where
    F: Fn(&Path) -> bool,
{
    fn is_snapshot(&self, dependency: &Path) -> bool {
        self(dependency)
    }
}

/// Matches dependencies whose file name contains a marker string
///
/// This is a naming convention, not a version check: `core-SNAPSHOT-fix.jar`
/// matches, `core-1.0-snapshot.jar` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPredicate {
    marker: String,
}

impl MarkerPredicate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for MarkerPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_MARKER)
    }
}

impl SnapshotPredicate for MarkerPredicate {
    fn is_snapshot(&self, dependency: &Path) -> bool {
        dependency
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains(&self.marker))
    }
}

/// Classify build output with the default snapshot marker
pub fn classify(
    outputs: &dyn BuildOutputs,
    logger: &dyn BuildLogger,
) -> Result<LayerConfiguration> {
    Classifier::new(logger).classify(outputs)
}

/// Layer classifier with a configurable snapshot rule
pub struct Classifier<'a> {
    logger: &'a dyn BuildLogger,
    snapshots: Box<dyn SnapshotPredicate + 'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(logger: &'a dyn BuildLogger) -> Self {
        Self {
            logger,
            snapshots: Box::new(MarkerPredicate::default()),
        }
    }

    /// Replace the rule that splits snapshot from release dependencies
    pub fn with_snapshot_predicate(mut self, predicate: impl SnapshotPredicate + 'a) -> Self {
        self.snapshots = Box::new(predicate);
        self
    }

    /// Partition the build output into layers
    ///
    /// Missing directories are never an error: a missing classes directory
    /// is skipped with a notice, missing resources or extra directories give
    /// empty layers. A path is placed in the first layer that claims it, in
    /// the order classes, resources, extra files, dependencies.
    ///
    /// # Errors
    ///
    /// Fails only when an existing directory cannot be listed or a path's
    /// existence cannot be determined.
    pub fn classify(&self, outputs: &dyn BuildOutputs) -> Result<LayerConfiguration> {
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        // Adds each file in each classes output directory to the classes files list.
        let mut classes = Vec::new();
        self.logger
            .info("Adding corresponding output directories of source sets to image");
        for dir in outputs.classes_dirs() {
            if !dir.try_exists()? {
                self.logger
                    .info(&format!("\t'{}' (not found, skipped)", dir.display()));
                continue;
            }
            self.logger.info(&format!("\t'{}'", dir.display()));
            claim_into(&mut classes, &mut claimed, list_directory(dir)?);
        }
        if classes.is_empty() {
            self.logger
                .warn("No classes files were found - did you compile your project?");
        }

        let resources_dir = outputs.resources_dir();
        let mut resources = Vec::new();
        if resources_dir.try_exists()? {
            claim_into(&mut resources, &mut claimed, list_directory(resources_dir)?);
        }

        let extra_dir = outputs.extra_dir();
        let mut extra_files = Vec::new();
        if extra_dir.try_exists()? {
            claim_into(&mut extra_files, &mut claimed, list_directory(extra_dir)?);
        }

        // Everything else on the runtime classpath is a dependency, minus the
        // output roots themselves.
        let mut roots: HashSet<PathBuf> = outputs
            .classes_dirs()
            .iter()
            .map(|dir| normalize_path(dir))
            .collect();
        roots.insert(normalize_path(resources_dir));

        let mut dependencies = Vec::new();
        let mut snapshot_dependencies = Vec::new();
        for entry in outputs.runtime_classpath() {
            let path = normalize_path(entry);
            if roots.contains(&path) {
                continue;
            }
            if !claimed.insert(path.clone()) {
                tracing::debug!(
                    "Classpath entry {} already belongs to another layer",
                    path.display()
                );
                continue;
            }
            if self.snapshots.is_snapshot(&path) {
                snapshot_dependencies.push(path);
            } else {
                dependencies.push(path);
            }
        }

        LayerConfiguration::builder()
            .dependencies(dependencies)
            .snapshot_dependencies(snapshot_dependencies)
            .resources(resources)
            .classes(classes)
            .extra_files(extra_files)
            .build()
    }
}

fn claim_into(layer: &mut Vec<PathBuf>, claimed: &mut HashSet<PathBuf>, paths: Vec<PathBuf>) {
    for path in paths {
        if claimed.insert(path.clone()) {
            layer.push(path);
        }
    }
}
