//! Inspect command - view archive contents without extracting

use layerkit_core::list_archive;
use std::path::Path;

use crate::display;
use crate::error::Result;

pub fn run(archive: &Path, json: bool) -> Result<()> {
    let entries = list_archive(archive)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        display::print_entries(archive, &entries);
    }
    Ok(())
}
