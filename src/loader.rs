//! Reading message files from disk.
//!
//! Paths may name single message files or directories. A directory is read one
//! level deep, plus the `cur/` and `new/` subdirectories of a maildir. Files are
//! read and parsed in parallel; failures are collected instead of aborting the
//! whole load.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::LoadError;
use crate::message::ThreadedMessage;
use crate::parser::parse_message;

const MAILDIR_SUBDIRS: [&str; 2] = ["cur", "new"];

/// Messages read from disk together with the files that could not be used.
#[derive(Debug, Default)]
pub struct LoadedMessages {
    pub messages: Vec<ThreadedMessage>,
    pub errors: Vec<LoadError>,
}

/// Expand `paths` into the list of candidate message files.
///
/// Results are sorted per directory so loads are reproducible.
pub fn collect_message_files(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<LoadError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        if path.is_dir() {
            match list_directory(path) {
                Ok(found) => files.extend(found),
                Err(e) => errors.push(LoadError::io(path, e)),
            }
        } else {
            files.push(path.clone());
        }
    }

    (files, errors)
}

fn list_directory(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = list_files(dir)?;

    for subdir in MAILDIR_SUBDIRS {
        let candidate = dir.join(subdir);
        if candidate.is_dir() {
            files.extend(list_files(&candidate)?);
        }
    }

    Ok(files)
}

/// Regular, non-hidden files directly inside `dir`
fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<ThreadedMessage, LoadError> {
    let raw = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    parse_message(&raw).map_err(|e| LoadError::parse(path, e))
}

/// Read and parse every message reachable from `paths`.
pub fn load_messages(paths: &[PathBuf]) -> LoadedMessages {
    let (files, mut errors) = collect_message_files(paths);
    log::info!("loading {} message files", files.len());

    let results: Vec<Result<ThreadedMessage, LoadError>> =
        files.par_iter().map(|path| load_file(path)).collect();

    let mut messages = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(message) => messages.push(message),
            Err(e) => {
                log::warn!("skipping {}: {}", e.path().display(), e);
                errors.push(e);
            }
        }
    }

    log::info!(
        "loaded {} messages ({} files skipped)",
        messages.len(),
        errors.len()
    );

    LoadedMessages { messages, errors }
}
