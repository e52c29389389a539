//! Classify command - compute layers from explicit build output paths

use layerkit_core::{BuildInputs, Classifier, MarkerPredicate, TracingLogger};
use std::path::{Path, PathBuf};

use crate::display;
use crate::error::{CliError, Result};

pub fn run(
    classes: &[PathBuf],
    resources: Option<&Path>,
    classpath: &[PathBuf],
    extra: Option<&Path>,
    snapshot_marker: &str,
    json: bool,
) -> Result<()> {
    if snapshot_marker.is_empty() {
        return Err(CliError::config("--snapshot-marker must not be empty"));
    }

    let inputs = BuildInputs {
        classes_dirs: classes.to_vec(),
        resources_dir: resources.map(Path::to_path_buf).unwrap_or_default(),
        runtime_classpath: classpath.to_vec(),
        extra_dir: extra.map(Path::to_path_buf).unwrap_or_default(),
    };

    let config = Classifier::new(&TracingLogger)
        .with_snapshot_predicate(MarkerPredicate::new(snapshot_marker))
        .classify(&inputs)?;

    display::print_layers(&config, json)
}
