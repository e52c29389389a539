//! Project descriptor
//!
//! A `layerkit.yaml` file tells layerkit where a build leaves its output.
//! Every key is optional; missing keys fall back to the conventional Gradle
//! locations. Relative paths are resolved against the directory holding the
//! descriptor.
//!
//! ```yaml
//! packaging: jar
//! classesDirs:
//!   - build/classes/java/main
//!   - build/classes/kotlin/main
//! resourcesDir: build/resources/main
//! runtimeClasspath:
//!   - /home/me/.m2/repository/com/example/core/1.0/core-1.0.jar
//! extraDirectory: src/main/jib
//! snapshotMarker: SNAPSHOT
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::{BuildOutputs, DEFAULT_SNAPSHOT_MARKER, MarkerPredicate};
use crate::error::{CoreError, Result};

/// Default descriptor file name
pub const DEFAULT_FILE_NAME: &str = "layerkit.yaml";

/// How the project is packaged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    /// Loose compiled output, classified into five layers
    #[default]
    Jar,
    /// A single deployable web archive, exploded into one layer
    War,
}

/// Where a project's build output lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectLayout {
    pub packaging: Packaging,

    /// Compiled class output directories
    pub classes_dirs: Vec<PathBuf>,

    /// Processed resources directory
    pub resources_dir: PathBuf,

    /// Runtime classpath (jars and output directories)
    pub runtime_classpath: Vec<PathBuf>,

    /// Extra files copied into the image as-is
    pub extra_directory: PathBuf,

    /// Where packaged archives are searched when `webArchive` is not set
    pub libs_dir: PathBuf,

    /// Explicit web archive for `war` packaging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_archive: Option<PathBuf>,

    /// File name marker of snapshot dependencies
    pub snapshot_marker: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            packaging: Packaging::Jar,
            classes_dirs: vec![PathBuf::from("build/classes/java/main")],
            resources_dir: PathBuf::from("build/resources/main"),
            runtime_classpath: Vec::new(),
            extra_directory: PathBuf::from("src/main/jib"),
            libs_dir: PathBuf::from("build/libs"),
            web_archive: None,
            snapshot_marker: DEFAULT_SNAPSHOT_MARKER.to_string(),
        }
    }
}

impl ProjectLayout {
    /// Conventional layout for a project rooted at `root`
    pub fn for_root(root: &Path) -> Self {
        Self::default().resolve_against(root)
    }

    /// Load a descriptor, resolving relative paths against its directory
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        layout.validate()?;

        let base = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        Ok(layout.resolve_against(base))
    }

    /// Save the descriptor to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_against(mut self, base: &Path) -> Self {
        self.classes_dirs = self.classes_dirs.iter().map(|p| base.join(p)).collect();
        self.resources_dir = base.join(&self.resources_dir);
        self.runtime_classpath = self.runtime_classpath.iter().map(|p| base.join(p)).collect();
        self.extra_directory = base.join(&self.extra_directory);
        self.libs_dir = base.join(&self.libs_dir);
        self.web_archive = self.web_archive.as_deref().map(|p| base.join(p));
        self
    }

    /// Snapshot rule configured for this project
    pub fn snapshot_predicate(&self) -> MarkerPredicate {
        MarkerPredicate::new(self.snapshot_marker.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.snapshot_marker.is_empty() {
            return Err(CoreError::InvalidProject {
                message: "snapshotMarker must not be empty".to_string(),
            });
        }
        if self.packaging == Packaging::Jar && self.web_archive.is_some() {
            return Err(CoreError::InvalidProject {
                message: "webArchive is only used with `packaging: war`".to_string(),
            });
        }
        Ok(())
    }
}

impl BuildOutputs for ProjectLayout {
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
        &self.extra_directory
    }
}
