//! Explode command - unpack a web archive into a single layer

use console::style;
use layerkit_core::{TracingLogger, explode_web_archive};
use std::path::Path;

use crate::display;
use crate::error::Result;

pub fn run(archive: &Path, keep: bool, json: bool) -> Result<()> {
    let (config, exploded) = explode_web_archive(archive, &TracingLogger)?;
    display::print_layers(&config, json)?;

    if keep {
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
