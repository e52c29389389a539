//! Layers command - compute image layers from a project descriptor

use console::style;
use layerkit_core::project::DEFAULT_FILE_NAME;
use layerkit_core::{
    Classifier, Packaging, ProjectLayout, TracingLogger, explode_web_archive, locate_web_archive,
};
use std::path::Path;

use crate::display;
use crate::error::{CliError, Result};

/// Command-line overrides applied on top of the descriptor
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub packaging: Option<Packaging>,
    pub web_archive: Option<&'a Path>,
    pub snapshot_marker: Option<&'a str>,
}

pub fn run(
    project: &Path,
    overrides: Overrides<'_>,
    json: bool,
    keep_exploded: bool,
) -> Result<()> {
    let layout = load_layout(project, overrides)?;

    match layout.packaging {
        Packaging::Jar => {
            let config = Classifier::new(&TracingLogger)
                .with_snapshot_predicate(layout.snapshot_predicate())
                .classify(&layout)?;
            display::print_layers(&config, json)
        }
        Packaging::War => {
            let archive = locate_web_archive(&layout)?;
            let (config, exploded) = explode_web_archive(&archive, &TracingLogger)?;
            display::print_layers(&config, json)?;

            if keep_exploded {
                let kept = exploded.keep();
                eprintln!(
                    "{} Exploded archive kept at {}",
                    style("→").cyan(),
                    kept.display()
                );
            } else {
                exploded.close()?;
            }
            Ok(())
        }
    }
}

fn load_layout(project: &Path, overrides: Overrides<'_>) -> Result<ProjectLayout> {
    let mut layout = if project.try_exists()? {
        ProjectLayout::load_from(project)?
    } else if project.file_name().is_some_and(|name| name == DEFAULT_FILE_NAME) {
        let root = match project.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        tracing::info!(
            "No {} in {}, using the conventional build layout",
            DEFAULT_FILE_NAME,
            root.display()
        );
        ProjectLayout::for_root(root)
    } else {
        return Err(CliError::config_with_help(
            format!("project descriptor not found: {}", project.display()),
            format!("create {} or omit --project", DEFAULT_FILE_NAME),
        ));
    };

    if let Some(packaging) = overrides.packaging {
        layout.packaging = packaging;
    }
    if let Some(archive) = overrides.web_archive {
        layout.packaging = Packaging::War;
        layout.web_archive = Some(archive.to_path_buf());
    }
    if let Some(marker) = overrides.snapshot_marker {
        if marker.is_empty() {
            return Err(CliError::config("--snapshot-marker must not be empty"));
        }
        layout.snapshot_marker = marker.to_string();
    }

    Ok(layout)
}
