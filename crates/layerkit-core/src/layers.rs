//! Layer configuration assembled from classified build output
//!
//! A [`LayerConfiguration`] holds either the five compiled-output layers or
//! the single exploded-archive layer, never both. Every layer is sorted by
//! path and no path belongs to more than one layer, so the same build always
//! produces the same layers in the same order.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::files::sort_paths;

/// The layers a configuration can hold, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Dependencies,
    SnapshotDependencies,
    Resources,
    Classes,
    ExtraFiles,
    ExplodedArchive,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Dependencies,
        LayerKind::SnapshotDependencies,
        LayerKind::Resources,
        LayerKind::Classes,
        LayerKind::ExtraFiles,
        LayerKind::ExplodedArchive,
    ];

    /// Human-readable layer name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Dependencies => "dependencies",
            LayerKind::SnapshotDependencies => "snapshot dependencies",
            LayerKind::Resources => "resources",
            LayerKind::Classes => "classes",
            LayerKind::ExtraFiles => "extra files",
            LayerKind::ExplodedArchive => "exploded archive",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable, sorted file lists for each layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LayerConfigurationBuilder")]
pub struct LayerConfiguration {
    dependencies: Vec<PathBuf>,
    snapshot_dependencies: Vec<PathBuf>,
    resources: Vec<PathBuf>,
    classes: Vec<PathBuf>,
    extra_files: Vec<PathBuf>,
    exploded_archive_files: Vec<PathBuf>,
}

impl LayerConfiguration {
    pub fn builder() -> LayerConfigurationBuilder {
        LayerConfigurationBuilder::default()
    }

    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    pub fn snapshot_dependencies(&self) -> &[PathBuf] {
        &self.snapshot_dependencies
    }

    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    pub fn classes(&self) -> &[PathBuf] {
        &self.classes
    }

    pub fn extra_files(&self) -> &[PathBuf] {
        &self.extra_files
    }

    pub fn exploded_archive_files(&self) -> &[PathBuf] {
        &self.exploded_archive_files
    }

    /// Files of a single layer
    pub fn files(&self, kind: LayerKind) -> &[PathBuf] {
        match kind {
            LayerKind::Dependencies => &self.dependencies,
            LayerKind::SnapshotDependencies => &self.snapshot_dependencies,
            LayerKind::Resources => &self.resources,
            LayerKind::Classes => &self.classes,
            LayerKind::ExtraFiles => &self.extra_files,
            LayerKind::ExplodedArchive => &self.exploded_archive_files,
        }
    }

    /// All layers in reporting order, including empty ones
    pub fn layers(&self) -> impl Iterator<Item = (LayerKind, &[PathBuf])> + '_ {
        LayerKind::ALL.into_iter().map(move |kind| (kind, self.files(kind)))
    }

    /// Whether this configuration came from an exploded web archive
    pub fn is_exploded(&self) -> bool {
        !self.exploded_archive_files.is_empty()
    }

    /// Total number of top-level entries across all layers
    pub fn len(&self) -> usize {
        self.layers().map(|(_, files)| files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count the files and bytes each populated layer would contain
    ///
    /// Directory entries are walked recursively; symlinks are not followed.
    pub fn summarize(&self) -> Result<Vec<LayerSummary>> {
        let mut summaries = Vec::new();
        for (kind, entries) in self.layers() {
            if entries.is_empty() {
                continue;
            }
            let mut summary = LayerSummary {
                kind,
                entries: entries.len(),
                files: 0,
                bytes: 0,
            };
            for entry in entries {
                summary.add_tree(entry)?;
            }
            summaries.push(summary);
        }
        Ok(summaries)
    }
}

impl TryFrom<LayerConfigurationBuilder> for LayerConfiguration {
    type Error = CoreError;

    fn try_from(builder: LayerConfigurationBuilder) -> Result<Self> {
        builder.build()
    }
}

/// File and byte totals for one layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSummary {
    pub kind: LayerKind,
    /// Top-level entries in the layer
    pub entries: usize,
    /// Regular files found under those entries
    pub files: usize,
    pub bytes: u64,
}

impl LayerSummary {
    fn add_tree(&mut self, root: &Path) -> Result<()> {
        for entry in walkdir::WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                self.files += 1;
                self.bytes += entry.metadata().map_err(std::io::Error::from)?.len();
            }
        }
        Ok(())
    }
}

/// Collects layer files and validates them into a [`LayerConfiguration`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerConfigurationBuilder {
    dependencies: Vec<PathBuf>,
    snapshot_dependencies: Vec<PathBuf>,
    resources: Vec<PathBuf>,
    classes: Vec<PathBuf>,
    extra_files: Vec<PathBuf>,
    exploded_archive_files: Vec<PathBuf>,
}

impl LayerConfigurationBuilder {
    pub fn dependencies(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.dependencies = files.into_iter().collect();
        self
    }

    pub fn snapshot_dependencies(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.snapshot_dependencies = files.into_iter().collect();
        self
    }

    pub fn resources(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.resources = files.into_iter().collect();
        self
    }

    pub fn classes(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.classes = files.into_iter().collect();
        self
    }

    pub fn extra_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.extra_files = files.into_iter().collect();
        self
    }

    pub fn exploded_archive(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.exploded_archive_files = files.into_iter().collect();
        self
    }

    /// Sort every layer and check the cross-layer invariants
    ///
    /// # Errors
    ///
    /// - [`CoreError::MixedLayers`] if exploded-archive files are combined
    ///   with any compiled-output layer
    /// - [`CoreError::DuplicatePath`] if a path appears in two layers
    pub fn build(mut self) -> Result<LayerConfiguration> {
        for files in [
            &mut self.dependencies,
            &mut self.snapshot_dependencies,
            &mut self.resources,
            &mut self.classes,
            &mut self.extra_files,
            &mut self.exploded_archive_files,
        ] {
            sort_paths(files);
        }

        let config = LayerConfiguration {
            dependencies: self.dependencies,
            snapshot_dependencies: self.snapshot_dependencies,
            resources: self.resources,
            classes: self.classes,
            extra_files: self.extra_files,
            exploded_archive_files: self.exploded_archive_files,
        };

        if config.is_exploded() {
            if let Some((kind, _)) = config
                .layers()
                .find(|(kind, files)| *kind != LayerKind::ExplodedArchive && !files.is_empty())
            {
                return Err(CoreError::MixedLayers { layer: kind.name() });
            }
        }

        let mut seen = HashSet::new();
        for (_, files) in config.layers() {
            for path in files {
                if !seen.insert(path.as_path()) {
                    return Err(CoreError::DuplicatePath { path: path.clone() });
                }
            }
        }

        Ok(config)
    }
}
