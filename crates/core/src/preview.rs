//! Structural previews of generated output trees.
//!
//! A preview summarizes a directory tree without file contents: one entry
//! per directory (the root first, then depth-first), each listing its
//! immediate subdirectory and file names, plus aggregate counts across the
//! whole walk. Child names are sorted lexically so a walk is deterministic.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Path recorded for the root of the walked tree.
pub const ROOT_PATH: &str = ".";

/// Summary of a single directory: its path relative to the walked root and
/// the names of its immediate children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Relative path from the output root; the root itself is [`ROOT_PATH`].
    pub path: String,
    /// Immediate subdirectory names, sorted.
    pub directories: Vec<String>,
    /// Immediate file names, sorted.
    pub files: Vec<String>,
}

/// Structural summary of a full tree walk.
///
/// Invariant: `total_files` equals the sum of `files.len()` over all
/// entries, and `total_dirs` the sum of `directories.len()` — the root is
/// never counted as its own subdirectory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreePreview {
    pub entries: Vec<DirectoryEntry>,
    pub total_files: usize,
    pub total_dirs: usize,
}

/// Walk `root` depth-first and build its [`TreePreview`].
///
/// Synchronous by design; callers on the async path wrap this in
/// `spawn_blocking` together with archiving.
pub fn scan_tree(root: &Path) -> Result<TreePreview, CoreError> {
    let mut preview = TreePreview {
        entries: Vec::new(),
        total_files: 0,
        total_dirs: 0,
    };
    walk(root, root, &mut preview)?;
    Ok(preview)
}

fn walk(root: &Path, dir: &Path, preview: &mut TreePreview) -> Result<(), CoreError> {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            directories.push(name);
        } else {
            files.push(name);
        }
    }

    directories.sort();
    files.sort();

    let path = match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ROOT_PATH.to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        // `dir` always descends from `root`, but fall back rather than panic.
        Err(_) => dir.to_string_lossy().into_owned(),
    };

    preview.total_files += files.len();
    preview.total_dirs += directories.len();

    let subdirs = directories.clone();
    preview.entries.push(DirectoryEntry {
        path,
        directories,
        files,
    });

    for name in &subdirs {
        walk(root, &dir.join(name), preview)?;
    }

    Ok(())
}
