//! Extract command - unpack an archive without letting entries escape

use layerkit_core::{ExtractOptions, LinkPolicy, extract_archive_atomic, extract_archive_with};
use std::path::Path;

use crate::display;
use crate::error::Result;

pub fn run(archive: &Path, dest: &Path, atomic: bool, skip_links: bool) -> Result<()> {
    let options = ExtractOptions {
        links: if skip_links {
            LinkPolicy::Skip
        } else {
            LinkPolicy::Reject
        },
    };

    let report = if atomic {
        extract_archive_atomic(archive, dest, &options)?
    } else {
        extract_archive_with(archive, dest, &options)?
    };

    display::print_extraction(&report, dest);
    Ok(())
}
