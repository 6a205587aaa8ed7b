//! In-repository content search for mdwalk.
//!
//! Implements the [search] function and the [SearchResult] struct used by the
//! search mode of the browser.
//!
//! Matching is a case-insensitive substring test per line. Each file
//! contributes at most one result: its first matching line. Results keep the
//! traversal order of the file list, they are not relevance-ranked. The whole
//! scan is recomputed on every query change; there is no cached index, which
//! is acceptable at the document counts this tool targets.

use crate::core::docs::DocumentRef;

use std::fs;

/// Maximum number of characters kept from a matched line.
pub const PREVIEW_MAX_CHARS: usize = 80;

/// A single search hit: the document, the 1-based line number of the first
/// matching line, and a bounded preview of that line.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    doc: DocumentRef,
    line: usize,
    preview: String,
}

impl SearchResult {
    #[inline]
    pub fn doc(&self) -> &DocumentRef {
        &self.doc
    }

    /// 1-based line number of the first match.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Scans `files` in order for `query`, case-insensitively.
///
/// An empty query yields no results. Files that cannot be read are skipped
/// silently; partial results are acceptable for best-effort navigation.
pub fn search(files: &[DocumentRef], query: &str) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for doc in files {
        let Ok(content) = fs::read_to_string(doc.path()) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            if line.to_lowercase().contains(&needle) {
                results.push(SearchResult {
                    doc: doc.clone(),
                    line: idx + 1,
                    preview: make_preview(line),
                });
                break;
            }
        }
    }

    results
}

/// Trims the matched line and bounds it to [PREVIEW_MAX_CHARS] characters.
fn make_preview(line: &str) -> String {
    line.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn doc(path: &std::path::Path) -> DocumentRef {
        let display = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        DocumentRef::new(path.to_path_buf(), display)
    }

    #[test]
    fn empty_query_returns_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("a.md");
        fs::write(&file, "anything")?;
        assert!(search(&[doc(&file)], "").is_empty());
        Ok(())
    }

    #[test]
    fn search_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("a.md");
        fs::write(&file, "Hello World\n")?;
        let results = search(&[doc(&file)], "hello");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].preview(), "Hello World");
        Ok(())
    }

    #[test]
    fn first_matching_line_only() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.md");
        fs::write(
            &file,
            "intro\nnothing here\nnothing there\nmore intro\n  Project Alpha kickoff  \nalpha again\n",
        )?;
        let results = search(&[doc(&file)], "alpha");
        assert_eq!(results.len(), 1, "one result per file");
        assert_eq!(results[0].line(), 5);
        assert_eq!(results[0].preview(), "Project Alpha kickoff");
        Ok(())
    }

    #[test]
    fn preview_is_bounded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("long.md");
        let long_line = format!("needle {}", "x".repeat(300));
        fs::write(&file, &long_line)?;
        let results = search(&[doc(&file)], "needle");
        assert_eq!(results[0].preview().chars().count(), PREVIEW_MAX_CHARS);
        Ok(())
    }

    #[test]
    fn unreadable_files_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let good = dir.path().join("good.md");
        fs::write(&good, "match me\n")?;
        let gone = dir.path().join("gone.md");
        let files = vec![doc(&gone), doc(&good)];
        let results = search(&files, "match");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc().display_name(), "good.md");
        Ok(())
    }

    #[test]
    fn results_keep_file_list_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "shared term\n")?;
        fs::write(&b, "shared term\n")?;
        let results = search(&[doc(&b), doc(&a)], "shared");
        let names: Vec<&str> = results.iter().map(|r| r.doc().display_name()).collect();
        assert_eq!(names, vec!["b.md", "a.md"]);
        Ok(())
    }
}
