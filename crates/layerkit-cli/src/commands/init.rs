//! Init command - write a project descriptor with the conventional layout

use console::style;
use layerkit_core::{Packaging, ProjectLayout};
use std::path::Path;

use crate::error::{CliError, Result};

pub fn run(project: &Path, packaging: Packaging, force: bool) -> Result<()> {
    if project.try_exists()? && !force {
        return Err(CliError::config_with_help(
            format!("{} already exists", project.display()),
            "pass --force to overwrite it",
        ));
    }

    let layout = ProjectLayout {
        packaging,
        ..ProjectLayout::default()
    };
    layout.save_to(project)?;

    println!(
        "{} Wrote {}",
        style("✓").green().bold(),
        project.display()
    );
    Ok(())
}
