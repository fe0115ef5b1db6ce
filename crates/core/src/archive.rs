//! Archiving of generated output trees.
//!
//! Packs every regular file under the output root into a single
//! deflate-compressed zip. Entry names are paths relative to the output
//! root with forward slashes, so the archive reproduces the tree structure
//! on extraction and never leaks the job id or absolute paths.

use std::fs;
use std::io;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CoreError;

/// Compress the tree rooted at `src` into a zip file at `dest`.
///
/// Synchronous; callers on the async path run this under `spawn_blocking`.
/// Files are added in the same sorted depth-first order the preview walk
/// uses, so archive layout is deterministic.
pub fn archive_tree(src: &Path, dest: &Path) -> Result<(), CoreError> {
    let file = fs::File::create(dest)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_directory(&mut writer, src, src, options)?;

    writer.finish()?;
    Ok(())
}

fn add_directory(
    writer: &mut ZipWriter<fs::File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<(), CoreError> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    for name in names {
        let path = dir.join(&name);
        if path.is_dir() {
            add_directory(writer, root, &path, options)?;
        } else {
            writer.start_file(entry_name(root, &path), options)?;
            let mut input = fs::File::open(&path)?;
            io::copy(&mut input, writer)?;
        }
    }

    Ok(())
}

/// Internal entry name for a file: its path relative to the archived root,
/// joined with forward slashes regardless of platform.
fn entry_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
