//! Document discovery tests for mdwalk
//!
//! These tests exercise `core::docs::resolve` against real temporary
//! directory trees: extension filtering, hidden and dependency-cache
//! pruning, ordering, and the two distinct failure cases.

use mdwalk::core::{BrowseError, resolve};
use std::fs;
use tempfile::tempdir;

fn md_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

#[test]
fn test_resolve_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("b.markdown"), "b")?;
    fs::write(dir.path().join("c.txt"), "c")?;
    fs::write(dir.path().join("a.md"), "a")?;

    let files = resolve(dir.path(), &md_extensions(), &[])?;
    let names: Vec<&str> = files.iter().map(|f| f.display_name()).collect();
    assert_eq!(names, vec!["a.md", "b.markdown"]);
    Ok(())
}

#[test]
fn test_resolve_recurses_with_relative_display_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let nested = dir.path().join("docs").join("guide");
    fs::create_dir_all(&nested)?;
    fs::write(nested.join("intro.md"), "hello")?;
    fs::write(dir.path().join("readme.md"), "top")?;

    let files = resolve(dir.path(), &md_extensions(), &[])?;
    let names: Vec<&str> = files.iter().map(|f| f.display_name()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"readme.md"));
    assert!(
        names
            .iter()
            .any(|n| n.ends_with("intro.md") && n.starts_with("docs")),
        "nested file keeps its relative path: {:?}",
        names
    );
    Ok(())
}

#[test]
fn test_resolve_prunes_hidden_and_dependency_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("keep.md"), "keep")?;
    for excluded in [".git", ".cache", "node_modules", "target"] {
        let sub = dir.path().join(excluded);
        fs::create_dir(&sub)?;
        fs::write(sub.join("skip.md"), "skip")?;
    }

    let files = resolve(dir.path(), &md_extensions(), &[])?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].display_name(), "keep.md");
    Ok(())
}

#[test]
fn test_resolve_honors_configured_excludes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("keep.md"), "keep")?;
    let drafts = dir.path().join("drafts");
    fs::create_dir(&drafts)?;
    fs::write(drafts.join("wip.md"), "wip")?;

    let all = resolve(dir.path(), &md_extensions(), &[])?;
    assert_eq!(all.len(), 2, "'drafts' is scanned by default");

    let filtered = resolve(dir.path(), &md_extensions(), &["drafts".to_string()])?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].display_name(), "keep.md");
    Ok(())
}

#[test]
fn test_resolve_single_file_target() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("solo.md");
    fs::write(&path, "solo")?;

    let files = resolve(&path, &md_extensions(), &[])?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path(), path.as_path());
    Ok(())
}

#[test]
fn test_resolve_missing_target_is_not_found() {
    let result = resolve(
        std::path::Path::new("/definitely/not/a/real/mdwalk/path"),
        &md_extensions(),
        &[],
    );
    assert!(matches!(result, Err(BrowseError::NotFound(_))));
}

#[test]
fn test_resolve_directory_without_documents() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("notes.txt"), "plain text")?;

    let result = resolve(dir.path(), &md_extensions(), &[]);
    assert!(matches!(result, Err(BrowseError::EmptyDirectory(_))));
    Ok(())
}
