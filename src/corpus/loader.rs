// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading transcripts from disk.
//!
//! Walk the directory, pick up every `.txt` and every `.zip`, read them all in
//! parallel. A file that can't be read or isn't UTF-8 is skipped with a warning
//! rather than failing the whole load: one broken transcript shouldn't take
//! search down. The same goes for archives and their members.
//!
//! Document ids are paths relative to the root, always with `/` separators, so
//! an id like `1997/1997_M1_青山刚昌_日文.txt` means the same thing everywhere.
//! A `.txt` member of an archive is keyed `{archive path}|{member name}`, e.g.
//! `2001/talks.zip|2001_SP_高山南_中文.txt`.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use super::Corpus;
use crate::error::{Result, SleuthError};

/// Separates the archive path from the member name in a document id.
pub const ARCHIVE_MEMBER_SEPARATOR: char = '|';

/// `(archive or file path, member name)` for a document id.
pub fn split_archive_id(id: &str) -> (&str, Option<&str>) {
    match id.split_once(ARCHIVE_MEMBER_SEPARATOR) {
        Some((archive, member)) => (archive, Some(member)),
        None => (id, None),
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Collect every `.txt` and `.zip` file below `root`, sorted by path.
pub fn discover_transcripts(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SleuthError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && (has_extension(path, "txt") || has_extension(path, "zip")) {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Document id for `path`: relative to `root`, `/`-separated.
pub fn document_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read one transcript. Errors are reported, not fatal.
fn read_transcript(root: &Path, path: &Path) -> Option<(String, String)> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %SleuthError::io(path, e), "skipping transcript");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some((document_id(root, path), text)),
        Err(_) => {
            let err = SleuthError::InvalidUtf8 {
                path: path.to_path_buf(),
            };
            warn!(path = %path.display(), error = %err, "skipping transcript");
            None
        }
    }
}

/// Read every `.txt` member of the archive at `path`, in archive order.
///
/// An archive that can't be opened yields nothing. A member that can't be
/// read or isn't UTF-8 is skipped; the rest of the archive still loads.
fn read_archive(root: &Path, path: &Path) -> Vec<(String, String)> {
    let archive_id = document_id(root, path);
    let opened = File::open(path)
        .map_err(|e| SleuthError::io(path, e))
        .and_then(|file| ZipArchive::new(file).map_err(|e| SleuthError::archive(path, e)));
    let mut archive = match opened {
        Ok(archive) => archive,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping archive");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut member = match archive.by_index(index) {
            Ok(member) => member,
            Err(e) => {
                warn!(path = %path.display(), index, error = %SleuthError::archive(path, e), "skipping archive member");
                continue;
            }
        };
        let name = member.name().to_string();
        if member.is_dir() || !name.ends_with(".txt") {
            continue;
        }

        let mut bytes = Vec::new();
        if let Err(e) = member.read_to_end(&mut bytes) {
            warn!(path = %path.display(), member = %name, error = %SleuthError::io(path, e), "skipping archive member");
            continue;
        }
        match String::from_utf8(bytes) {
            Ok(text) => {
                entries.push((format!("{}{}{}", archive_id, ARCHIVE_MEMBER_SEPARATOR, name), text));
            }
            Err(_) => {
                warn!(path = %path.display(), member = %name, "skipping archive member: not valid UTF-8");
            }
        }
    }
    debug!(path = %path.display(), members = entries.len(), "read archive");
    entries
}

/// Every document one discovered path contributes.
fn read_source(root: &Path, path: &Path) -> Vec<(String, String)> {
    if has_extension(path, "zip") {
        read_archive(root, path)
    } else {
        read_transcript(root, path).into_iter().collect()
    }
}

/// Load every transcript below `root` into a [`Corpus`].
pub fn load_dir(root: impl AsRef<Path>) -> Result<Corpus> {
    let root = root.as_ref();
    let paths = discover_transcripts(root)?;

    #[cfg(feature = "parallel")]
    let entries: Vec<(String, String)> = paths
        .par_iter()
        .flat_map_iter(|path| read_source(root, path))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let entries: Vec<(String, String)> = paths
        .iter()
        .flat_map(|path| read_source(root, path))
        .collect();

    let corpus = Corpus::from_map(entries);
    info!(
        root = %root.display(),
        files = paths.len(),
        documents = corpus.len(),
        "loaded corpus"
    );
    Ok(corpus)
}

/// Load every transcript below `root`, reporting progress on `progress`.
#[cfg(feature = "parallel")]
pub fn load_dir_with_progress(root: impl AsRef<Path>, progress: &ProgressBar) -> Result<Corpus> {
    let root = root.as_ref();
    let paths = discover_transcripts(root)?;
    let total = paths.len();
    let counter = AtomicUsize::new(0);
    progress.set_length(total as u64);

    let entries: Vec<(String, String)> = paths
        .par_iter()
        .flat_map_iter(|path| {
            let loaded = read_source(root, path);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            loaded
        })
        .collect();

    let corpus = Corpus::from_map(entries);
    info!(
        root = %root.display(),
        files = total,
        documents = corpus.len(),
        "loaded corpus"
    );
    Ok(corpus)
}
