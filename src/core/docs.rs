//! Document discovery for mdwalk.
//!
//! Provides the [DocumentRef] struct used throughout mdwalk and the [resolve]
//! function which turns the invocation target into an ordered document list.
//!
//! A single file resolves to a one-element list. A directory is walked
//! recursively; only files with a markdown-family extension are kept, and
//! hidden or dependency-cache directories are pruned before descending into
//! them rather than filtered afterwards, so large excluded trees are never
//! scanned at all.

use crate::core::error::BrowseError;

use std::fs;
use std::path::{Path, PathBuf};

/// Directory names that are never descended into during a scan.
/// This keeps the walk fast and the results free of vendored noise.
#[rustfmt::skip]
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules", "target", "dist", "build", "out",
    "venv", "__pycache__", "vendor",
];

/// A single viewable document.
///
/// Holds the on-disk path and the name shown in the browser list
/// (the path relative to the invocation root). Identity is the path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DocumentRef {
    path: PathBuf,
    display: String,
}

impl DocumentRef {
    pub fn new(path: PathBuf, display: String) -> Self {
        DocumentRef { path, display }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display
    }
}

/// Resolves `target` into the ordered list of documents to browse.
/// `exclude` adds directory names to the built-in pruning list.
///
/// # Errors
/// * [BrowseError::NotFound] if `target` does not exist.
/// * [BrowseError::EmptyDirectory] if a directory yields no matching files.
pub fn resolve(
    target: &Path,
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<DocumentRef>, BrowseError> {
    if !target.exists() {
        return Err(BrowseError::NotFound(target.to_path_buf()));
    }

    if target.is_file() {
        let display = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.display().to_string());
        return Ok(vec![DocumentRef::new(target.to_path_buf(), display)]);
    }

    let mut paths = Vec::new();
    collect_documents(target, extensions, exclude, &mut paths)?;

    if paths.is_empty() {
        return Err(BrowseError::EmptyDirectory(target.to_path_buf()));
    }

    // Ordinal, case-sensitive path order keeps the listing stable across runs.
    paths.sort();

    let docs = paths
        .into_iter()
        .map(|path| {
            let display = path
                .strip_prefix(target)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            DocumentRef::new(path, display)
        })
        .collect();

    Ok(docs)
}

/// Recursive walk with an explicit pruning predicate: excluded directories are
/// skipped before descending, never entered and filtered post-hoc.
fn collect_documents(
    dir: &Path,
    extensions: &[String],
    exclude: &[String],
    out: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if !is_pruned_dir(&entry.file_name().to_string_lossy(), exclude) {
                collect_documents(&path, extensions, exclude, out)?;
            }
        } else if file_type.is_file() && has_document_extension(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}

/// Pruning predicate: hidden directories, dependency caches and any
/// names added through the config.
fn is_pruned_dir(name: &str, exclude: &[String]) -> bool {
    name.starts_with('.')
        || EXCLUDED_DIRS.contains(&name)
        || exclude.iter().any(|e| e == name)
}

fn has_document_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
        .unwrap_or(false)
}
