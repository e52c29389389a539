//! Archive listing and extraction
//!
//! Supports zip containers (`.zip`, `.war`, `.jar`, `.ear`) and tar
//! containers (`.tar`, `.tar.gz`, `.tgz`). Every format is reduced to a
//! sequence of [`ArchiveEntry`] values and placed on disk by one routine, so
//! there is exactly one place where entry names are checked.
//!
//! # Security
//!
//! - Each entry name is joined to the canonical destination and resolved
//!   (symlinks, `.` and `..`) before anything is written
//! - An entry resolving outside the destination aborts the whole extraction
//!   with [`CoreError::PathTraversal`]
//! - Absolute entry names escape by construction and are rejected the same way
//! - Link entries are never materialized; see [`LinkPolicy`]
//!
//! Extraction is not atomic. Entries written before a failing entry stay on
//! disk. Use [`extract_archive_atomic`] when the destination must either be
//! complete or absent.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::files::canonicalize_lenient;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Container formats understood by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else if [".zip", ".war", ".jar", ".ear"]
            .iter()
            .any(|ext| name.ends_with(ext))
        {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }
}

/// What an archive entry declares itself to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    /// Symbolic or hard link
    Symlink,
    /// Devices, fifos and other special entries
    Other,
}

/// Information about an entry in an archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    /// Name exactly as declared in the archive
    pub name: String,
    pub kind: EntryKind,
    /// Declared size in bytes (0 for directories)
    pub size: u64,
}

impl ArchiveEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// What to do with link entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Abort extraction with [`CoreError::LinkEntry`]
    #[default]
    Reject,
    /// Leave the link out and keep going
    Skip,
}

/// Extraction settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub links: LinkPolicy,
}

/// Summary of a finished extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
    /// Names of entries that were left out
    pub skipped: Vec<String>,
}

/// Extract an archive to a destination directory with default options
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<ExtractionReport> {
    extract_archive_with(archive_path, dest, &ExtractOptions::default())
}

/// Extract an archive to a destination directory
///
/// The destination is created if it does not exist. Entries are processed in
/// archive order; a later entry with the same name overwrites an earlier one.
///
/// # Errors
///
/// Returns [`CoreError::PathTraversal`] for the first entry resolving outside
/// `dest`, [`CoreError::LinkEntry`] for a link entry under
/// [`LinkPolicy::Reject`], and I/O or format errors from reading the archive.
pub fn extract_archive_with(
    archive_path: &Path,
    dest: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    fs::create_dir_all(dest)?;

    let mut extractor = Extractor {
        root: dest.canonicalize()?,
        options: *options,
        report: ExtractionReport::default(),
    };

    tracing::debug!(
        "Extracting {} into {}",
        archive_path.display(),
        extractor.root.display()
    );

    for_each_entry(archive_path, |entry, contents| extractor.place(entry, contents))?;

    Ok(extractor.report)
}

/// Extract an archive so that `dest` is either complete or not created at all
///
/// Entries are unpacked into a temporary sibling of `dest`, which is renamed
/// onto `dest` once every entry succeeded. `dest` must not exist yet.
pub fn extract_archive_atomic(
    archive_path: &Path,
    dest: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    if dest.try_exists()? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination already exists: {}", dest.display()),
        )
        .into());
    }

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".layerkit-extract-")
        .tempdir_in(parent)?;

    // Dropping `staging` on error removes the partial tree
    let report = extract_archive_with(archive_path, staging.path(), options)?;

    let staged = staging.keep();
    if let Err(err) = fs::rename(&staged, dest) {
        let _ = fs::remove_dir_all(&staged);
        return Err(err.into());
    }

    Ok(report)
}

/// List the entries of an archive in archive order without extracting
pub fn list_archive(archive_path: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    for_each_entry(archive_path, |entry, _| {
        entries.push(entry.clone());
        Ok(())
    })?;
    Ok(entries)
}

/// Resolve where an entry would be written and check it stays inside `root`
///
/// `root` must already be canonical. The entry name is first normalized on
/// its own: absolute names and `..` climbing above the archive root are
/// rejected outright. The joined path is then resolved through the
/// filesystem, so existing symlinks under `root` are followed before the
/// containment check. The returned path is equal to, or nested under,
/// `root`.
pub fn resolve_entry_target(root: &Path, name: &str) -> Result<PathBuf> {
    let traversal = || CoreError::PathTraversal {
        entry: name.to_string(),
    };

    let relative = normalize_entry_name(name).ok_or_else(traversal)?;
    let target = canonicalize_lenient(&root.join(relative))?;
    if target.starts_with(root) {
        Ok(target)
    } else {
        Err(traversal())
    }
}

/// Collapse `.` and `..` in an entry name without leaving the archive root
fn normalize_entry_name(name: &str) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return None,
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    Some(normalized)
}

/// Feed every entry of the archive, with its contents, to `visit`
fn for_each_entry<F>(archive_path: &Path, visit: F) -> Result<()>
where
    F: FnMut(&ArchiveEntry, &mut dyn Read) -> Result<()>,
{
    let format =
        ArchiveFormat::from_path(archive_path).ok_or_else(|| CoreError::UnsupportedArchive {
            path: archive_path.to_path_buf(),
        })?;

    let file = File::open(archive_path)?;
    match format {
        ArchiveFormat::Zip => visit_zip(BufReader::new(file), visit),
        ArchiveFormat::Tar => visit_tar(BufReader::new(file), visit),
        ArchiveFormat::TarGz => visit_tar(GzDecoder::new(BufReader::new(file)), visit),
    }
}

fn visit_zip<R, F>(reader: R, mut visit: F) -> Result<()>
where
    R: Read + io::Seek,
    F: FnMut(&ArchiveEntry, &mut dyn Read) -> Result<()>,
{
    let mut archive = zip::ZipArchive::new(reader)?;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if file.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };
        let entry = ArchiveEntry {
            name: file.name().to_string(),
            kind,
            size: file.size(),
        };

        visit(&entry, &mut file)?;
    }
    Ok(())
}

fn visit_tar<R, F>(reader: R, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(&ArchiveEntry, &mut dyn Read) -> Result<()>,
{
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries()? {
        let mut entry = entry?;

        let entry_type = entry.header().entry_type();
        let kind = if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_symlink() || entry_type.is_hard_link() {
            EntryKind::Symlink
        } else if entry_type.is_file() || entry_type.is_contiguous() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let info = ArchiveEntry {
            name: String::from_utf8_lossy(&entry.path_bytes()).into_owned(),
            kind,
            size: entry.size(),
        };

        visit(&info, &mut entry)?;
    }
    Ok(())
}

/// Places entries under a canonical root
struct Extractor {
    root: PathBuf,
    options: ExtractOptions,
    report: ExtractionReport,
}

impl Extractor {
    fn place(&mut self, entry: &ArchiveEntry, contents: &mut dyn Read) -> Result<()> {
        let target = resolve_entry_target(&self.root, &entry.name)?;

        match entry.kind {
            EntryKind::Directory => {
                fs::create_dir_all(&target)?;
                self.report.directories += 1;
            }
            EntryKind::File => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&target)?;
                self.report.bytes += io::copy(contents, &mut out)?;
                self.report.files += 1;
            }
            EntryKind::Symlink => match self.options.links {
                LinkPolicy::Reject => {
                    return Err(CoreError::LinkEntry {
                        entry: entry.name.clone(),
                    });
                }
                LinkPolicy::Skip => self.skip(entry, "link entries are not extracted"),
            },
            EntryKind::Other => self.skip(entry, "unsupported entry type"),
        }

        Ok(())
    }

    fn skip(&mut self, entry: &ArchiveEntry, reason: &str) {
        tracing::warn!("Skipping '{}': {}", entry.name, reason);
        self.report.skipped.push(entry.name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    enum Item<'a> {
        Dir(&'a str),
        File(&'a str, &'a [u8]),
        Link(&'a str, &'a str),
    }

    fn create_zip(dir: &Path, name: &str, items: &[Item<'_>]) -> PathBuf {
        let zip_path = dir.join(name);
        let file = File::create(&zip_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for item in items {
            match item {
                Item::Dir(name) => writer.add_directory(*name, options).unwrap(),
                Item::File(name, content) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(content).unwrap();
                }
                Item::Link(name, target) => writer.add_symlink(*name, *target, options).unwrap(),
            }
        }
        writer.finish().unwrap();
        zip_path
    }

    /// Write a tar entry without the path validation `tar::Builder` applies
    fn append_raw<W: Write>(builder: &mut tar::Builder<W>, name: &str, content: &[u8]) {
        let mut header = tar::Header::new_old();
        let bytes = name.as_bytes();
        header.as_old_mut().name[..bytes.len()].copy_from_slice(bytes);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_cksum();
        builder.append(&header, content).unwrap();
    }

    fn create_tar_gz(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in files {
            append_raw(&mut builder, name, content);
        }
        builder.into_inner().unwrap().finish().unwrap();
        path
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("app.war")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("LIB.JAR")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("out.tar.gz")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("out.tgz")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("out.tar")),
            Some(ArchiveFormat::Tar)
        );
        assert_eq!(ArchiveFormat::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_extract_reproduces_content() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "app.war",
            &[
                Item::Dir("WEB-INF/"),
                Item::Dir("WEB-INF/classes/"),
                Item::File("WEB-INF/web.xml", b"<web-app/>"),
                Item::File("index.html", b"<html></html>"),
                Item::File("static/css/site.css", b"body {}"),
            ],
        );

        let dest = temp.path().join("out");
        let report = extract_archive(&archive, &dest).unwrap();

        assert_eq!(report.directories, 2);
        assert_eq!(report.files, 3);
        assert_eq!(report.bytes, 10 + 13 + 7);
        assert!(report.skipped.is_empty());

        assert!(dest.join("WEB-INF/classes").is_dir());
        assert_eq!(fs::read(dest.join("WEB-INF/web.xml")).unwrap(), b"<web-app/>");
        assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"<html></html>");
        // No directory entry for static/css, parents are created on demand
        assert_eq!(fs::read(dest.join("static/css/site.css")).unwrap(), b"body {}");
    }

    #[test]
    fn test_extract_blocks_parent_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "evil.zip",
            &[
                Item::File("good.txt", b"ok"),
                Item::File("../../escape.txt", b"pwned"),
                Item::File("after.txt", b"never"),
            ],
        );

        let dest = temp.path().join("a/b/out");
        let err = extract_archive(&archive, &dest).unwrap_err();

        match &err {
            CoreError::PathTraversal { entry } => assert_eq!(entry, "../../escape.txt"),
            other => panic!("expected path traversal, got {other:?}"),
        }
        assert!(err.is_security_violation());
        assert!(!temp.path().join("a/escape.txt").exists());
        // Not atomic: the earlier entry stays, processing stopped at the bad one
        assert!(dest.join("good.txt").exists());
        assert!(!dest.join("after.txt").exists());
    }

    #[test]
    fn test_extract_blocks_absolute_names() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside.txt");
        let name = outside.to_string_lossy().to_string();
        let archive = create_zip(temp.path(), "abs.zip", &[Item::File(&name, b"pwned")]);

        let err = extract_archive(&archive, &temp.path().join("out")).unwrap_err();

        assert!(matches!(err, CoreError::PathTraversal { .. }));
        assert!(!outside.exists());
    }

    #[test]
    fn test_extract_allows_inner_parent_segments() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "ok.zip",
            &[Item::File("a/../b/file.txt", b"inside")],
        );

        let dest = temp.path().join("out");
        extract_archive(&archive, &dest).unwrap();

        assert_eq!(fs::read(dest.join("b/file.txt")).unwrap(), b"inside");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_blocks_existing_symlink_escape() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        let dest = temp.path().join("out");
        fs::create_dir_all(&outside).unwrap();
        fs::create_dir_all(&dest).unwrap();
        std::os::unix::fs::symlink(&outside, dest.join("link")).unwrap();

        let archive = create_zip(temp.path(), "sym.zip", &[Item::File("link/x.txt", b"pwned")]);
        let err = extract_archive(&archive, &dest).unwrap_err();

        assert!(matches!(err, CoreError::PathTraversal { .. }));
        assert!(!outside.join("x.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_blocks_symlink_behind_missing_dir() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        let dest = temp.path().join("out");
        fs::create_dir_all(&outside).unwrap();
        fs::create_dir_all(&dest).unwrap();
        std::os::unix::fs::symlink("../outside", dest.join("link")).unwrap();

        let archive = create_zip(
            temp.path(),
            "hidden.zip",
            &[Item::File("nope/../link/x.txt", b"pwned")],
        );
        let err = extract_archive(&archive, &dest).unwrap_err();

        assert!(matches!(
            err,
            CoreError::PathTraversal { ref entry } if entry == "nope/../link/x.txt"
        ));
        assert!(!outside.join("x.txt").exists());
        assert!(!dest.join("nope").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_blocks_dangling_symlink_escape() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        std::os::unix::fs::symlink("../planted.txt", dest.join("config.txt")).unwrap();

        let archive = create_zip(
            temp.path(),
            "dangling.zip",
            &[Item::File("config.txt", b"pwned")],
        );
        let err = extract_archive(&archive, &dest).unwrap_err();

        assert!(matches!(err, CoreError::PathTraversal { .. }));
        assert!(!temp.path().join("planted.txt").exists());
    }

    #[test]
    fn test_entry_names_cannot_climb_above_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();

        assert_eq!(
            resolve_entry_target(&root, "a/./b/../c.txt").unwrap(),
            root.join("a/c.txt")
        );
        assert_eq!(resolve_entry_target(&root, "./").unwrap(), root);
        for name in ["../x", "a/../../x", "/etc/passwd"] {
            let result = resolve_entry_target(&root, name);
            assert!(
                matches!(result, Err(CoreError::PathTraversal { .. })),
                "{name} should be blocked"
            );
        }
    }

    #[test]
    fn test_extract_rejects_link_entries_by_default() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "links.zip",
            &[
                Item::File("real.txt", b"data"),
                Item::Link("alias.txt", "real.txt"),
            ],
        );

        let dest = temp.path().join("out");
        let err = extract_archive(&archive, &dest).unwrap_err();
        assert!(matches!(err, CoreError::LinkEntry { ref entry } if entry == "alias.txt"));

        let dest = temp.path().join("out-skip");
        let options = ExtractOptions {
            links: LinkPolicy::Skip,
        };
        let report = extract_archive_with(&archive, &dest, &options).unwrap();
        assert_eq!(report.files, 1);
        assert_eq!(report.skipped, vec!["alias.txt".to_string()]);
        assert!(!dest.join("alias.txt").exists());
    }

    #[test]
    fn test_duplicate_entries_last_write_wins() {
        let temp = TempDir::new().unwrap();
        let archive = create_tar_gz(
            temp.path(),
            "dup.tar.gz",
            &[("config.txt", b"first version"), ("config.txt", b"second")],
        );

        let dest = temp.path().join("out");
        extract_archive(&archive, &dest).unwrap();

        assert_eq!(fs::read(dest.join("config.txt")).unwrap(), b"second");
    }

    #[test]
    fn test_extract_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("index.html"), "stale content that is longer").unwrap();

        let archive = create_zip(temp.path(), "app.war", &[Item::File("index.html", b"new")]);
        extract_archive(&archive, &dest).unwrap();

        assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"new");
    }

    #[test]
    fn test_extract_tar_gz() {
        let temp = TempDir::new().unwrap();
        let archive = create_tar_gz(
            temp.path(),
            "bundle.tar.gz",
            &[("docs/readme.md", b"# hi"), ("bin/run.sh", b"#!/bin/sh")],
        );

        let dest = temp.path().join("out");
        let report = extract_archive(&archive, &dest).unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(fs::read(dest.join("docs/readme.md")).unwrap(), b"# hi");
        assert_eq!(fs::read(dest.join("bin/run.sh")).unwrap(), b"#!/bin/sh");
    }

    #[test]
    fn test_extract_tar_gz_blocks_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = create_tar_gz(
            temp.path(),
            "evil.tgz",
            &[("../escape.txt", b"pwned")],
        );

        let err = extract_archive(&archive, &temp.path().join("out")).unwrap_err();

        assert!(matches!(err, CoreError::PathTraversal { .. }));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_list_archive_preserves_order() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "app.war",
            &[
                Item::File("z.txt", b"zz"),
                Item::Dir("a/"),
                Item::File("a/b.txt", b"b"),
            ],
        );

        let entries = list_archive(&archive).unwrap();

        assert_eq!(
            entries,
            vec![
                ArchiveEntry {
                    name: "z.txt".to_string(),
                    kind: EntryKind::File,
                    size: 2,
                },
                ArchiveEntry {
                    name: "a/".to_string(),
                    kind: EntryKind::Directory,
                    size: 0,
                },
                ArchiveEntry {
                    name: "a/b.txt".to_string(),
                    kind: EntryKind::File,
                    size: 1,
                },
            ]
        );
        assert!(!temp.path().join("z.txt").exists());
    }

    #[test]
    fn test_unsupported_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "plain").unwrap();

        assert!(matches!(
            list_archive(&path),
            Err(CoreError::UnsupportedArchive { .. })
        ));
    }

    #[test]
    fn test_atomic_extract_success() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(temp.path(), "app.war", &[Item::File("index.html", b"hi")]);

        let dest = temp.path().join("exploded");
        extract_archive_atomic(&archive, &dest, &ExtractOptions::default()).unwrap();

        assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"hi");
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".layerkit-extract-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_atomic_extract_failure_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(
            temp.path(),
            "evil.zip",
            &[
                Item::File("good.txt", b"ok"),
                Item::File("../../../escape.txt", b"pwned"),
            ],
        );

        let dest = temp.path().join("exploded");
        let err = extract_archive_atomic(&archive, &dest, &ExtractOptions::default()).unwrap_err();

        assert!(err.is_security_violation());
        assert!(!dest.exists());
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the archive itself should remain");
    }

    #[test]
    fn test_atomic_extract_refuses_existing_destination() {
        let temp = TempDir::new().unwrap();
        let archive = create_zip(temp.path(), "app.war", &[Item::File("index.html", b"hi")]);
        let dest = temp.path().join("exploded");
        fs::create_dir_all(&dest).unwrap();

        assert!(matches!(
            extract_archive_atomic(&archive, &dest, &ExtractOptions::default()),
            Err(CoreError::Io(_))
        ));
    }
}
