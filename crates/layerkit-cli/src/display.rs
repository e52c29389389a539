//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Layer configurations with per-layer totals
//! - Extraction reports
//! - Archive listings

use console::style;
use layerkit_core::{
    ArchiveEntry, EntryKind, ExtractionReport, LayerConfiguration, LayerKind, LayerSummary,
};
use std::path::{Component, Path};

use crate::error::Result;
use crate::util::{count, format_size};

/// Print a layer configuration, either as JSON or grouped by layer
pub fn print_layers(config: &LayerConfiguration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    if config.is_empty() {
        println!("{} No files to layer", style("⚠").yellow());
        return Ok(());
    }

    // Totals need every path to exist; classpath entries may point at jars
    // that were never downloaded.
    let summaries = match config.summarize() {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::debug!("Skipping layer totals: {}", e);
            Vec::new()
        }
    };

    for (kind, files) in config.layers() {
        if files.is_empty() {
            continue;
        }
        println!("{}", layer_header(kind, files.len(), summary_for(&summaries, kind)));
        for file in files {
            println!("  {}", file.display());
        }
        println!();
    }

    let populated = config.layers().filter(|(_, files)| !files.is_empty()).count();
    println!(
        "{} {} with {}",
        style("✓").green().bold(),
        count(populated, "layer", "layers"),
        count(config.len(), "entry", "entries")
    );
    Ok(())
}

fn summary_for(summaries: &[LayerSummary], kind: LayerKind) -> Option<&LayerSummary> {
    summaries.iter().find(|s| s.kind == kind)
}

fn layer_header(kind: LayerKind, entries: usize, summary: Option<&LayerSummary>) -> String {
    let title = style(kind.name()).cyan().bold();
    match summary {
        Some(s) => format!(
            "{} ({}, {}, {})",
            title,
            count(entries, "entry", "entries"),
            count(s.files, "file", "files"),
            format_size(s.bytes)
        ),
        None => format!("{} ({})", title, count(entries, "entry", "entries")),
    }
}

/// Print the outcome of an extraction
pub fn print_extraction(report: &ExtractionReport, dest: &Path) {
    println!(
        "{} Extracted {} ({}) and {} into {}",
        style("✓").green().bold(),
        count(report.files, "file", "files"),
        format_size(report.bytes),
        count(report.directories, "directory", "directories"),
        dest.display()
    );
    for name in &report.skipped {
        println!("  {} skipped {}", style("⚠").yellow(), name);
    }
}

/// Print an archive listing
pub fn print_entries(archive: &Path, entries: &[ArchiveEntry]) {
    println!("{} {}", style("Archive").cyan().bold(), archive.display());
    println!();

    for entry in entries {
        let kind = match entry.kind {
            EntryKind::Directory => "dir",
            EntryKind::File => "file",
            EntryKind::Symlink => "link",
            EntryKind::Other => "other",
        };
        let size = if entry.kind == EntryKind::File {
            format_size(entry.size)
        } else {
            String::new()
        };
        if escapes_root(&entry.name) {
            println!(
                "  {:5} {:40} {:>10}  {}",
                kind,
                style(&entry.name).red(),
                size,
                style("escapes destination").red().bold()
            );
        } else {
            println!("  {:5} {:40} {:>10}", kind, entry.name, size);
        }
    }

    let files: Vec<&ArchiveEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .collect();
    let total: u64 = files.iter().map(|e| e.size).sum();
    println!();
    println!(
        "{}: {} ({})",
        style("Total").bold(),
        count(files.len(), "file", "files"),
        format_size(total)
    );

    let unsafe_count = entries.iter().filter(|e| escapes_root(&e.name)).count();
    if unsafe_count > 0 {
        println!(
            "{} {} would be blocked on extraction",
            style("✗").red().bold(),
            count(unsafe_count, "entry", "entries")
        );
    }
}

/// Whether an entry name leaves its extraction root, judged on the name alone
///
/// Links already on disk are not considered; extraction checks those.
pub fn escapes_root(name: &str) -> bool {
    let mut depth = 0usize;
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return true,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            Component::Normal(_) => depth += 1,
        }
    }
    false
}
