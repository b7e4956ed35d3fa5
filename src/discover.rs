//! Source file discovery.
//!
//! Walks the scan root lazily with `walkdir`. Symlinks are not followed, so a
//! link pointing back up the tree cannot make the walk loop; a directory that
//! cannot be listed surfaces as an error item and ends the run.

use crate::error::AnalysisError;
use pkggraph::filters;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Default substring a file name must contain to be scanned.
pub const DEFAULT_SOURCE_MARKER: &str = ".go";

/// Lazily enumerate files under `root` whose name contains `marker`.
///
/// Directories whose root-relative path matches one of `exclude_patterns` are
/// pruned; files are never matched against the patterns. Only regular files
/// (or symlinks to them) are yielded. Yield order follows directory traversal
/// and is not sorted.
pub fn discover_source_files<'a>(
    root: &'a Path,
    marker: &'a str,
    exclude_patterns: &'a [String],
) -> impl Iterator<Item = Result<PathBuf, AnalysisError>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| !is_excluded(entry, root, exclude_patterns))
        .filter_map(move |entry| match entry {
            Ok(entry) => is_source_file(&entry, marker).then(|| Ok(entry.into_path())),
            Err(err) => Some(Err(AnalysisError::Walk(err))),
        })
}

fn is_source_file(entry: &DirEntry, marker: &str) -> bool {
    let name_matches = entry
        .file_name()
        .to_str()
        .map(|name| name.contains(marker))
        .unwrap_or(false);

    name_matches && is_regular_file(entry)
}

/// Regular files, and symlinks that resolve to one. Links to directories
/// (`cloud.google.com` in a vendored tree) and dangling links are skipped.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        std::fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    } else {
        file_type.is_file()
    }
}

fn is_excluded(entry: &DirEntry, root: &Path, exclude_patterns: &[String]) -> bool {
    if entry.depth() == 0 || exclude_patterns.is_empty() || !entry.file_type().is_dir() {
        return false;
    }

    let relative = match entry.path().strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return false,
    };

    let path_str = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    filters::matches_any(&path_str, exclude_patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn discovered(root: &Path, marker: &str, excludes: &[String]) -> Vec<String> {
        let mut found: Vec<String> = discover_source_files(root, marker, excludes)
            .map(|path| {
                let path = path.expect("walk failed");
                path.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_finds_go_files_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "main.go", "package main");
        create_test_file(root, "pkg/api/api.go", "package api");
        create_test_file(root, "pkg/api/README.md", "# api");
        create_test_file(root, "go.mod", "module example.org/shop");

        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &[]),
            vec!["main.go", "pkg/api/api.go"]
        );
    }

    #[test]
    fn test_marker_is_a_substring_match() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "tmpl/page.gohtml", "");
        create_test_file(root, "tmpl/page.txt", "");

        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &[]),
            vec!["tmpl/page.gohtml"]
        );
    }

    #[test]
    fn test_directories_matching_marker_are_not_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "assets.go/readme", "");
        create_test_file(root, "assets.go/embed.go", "package assets");

        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &[]),
            vec!["assets.go/embed.go"]
        );
    }

    #[test]
    fn test_exclude_patterns_prune_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "vendor/golang.org/x/net/http.go", "package net");
        create_test_file(root, "pkg/parser/testdata/bad.go", "package bad");
        create_test_file(root, "pkg/parser/parser.go", "package parser");

        let excludes = vec!["vendor*".to_string(), "*testdata*".to_string()];
        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &excludes),
            vec!["pkg/parser/parser.go"]
        );
    }

    #[test]
    fn test_exclude_patterns_only_match_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "gen.go", "package main");
        create_test_file(root, "gen/gen.go", "package gen");

        let excludes = vec!["gen*".to_string()];
        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &excludes),
            vec!["gen.go"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_matching_marker_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "real/x.go", "package real");
        std::os::unix::fs::symlink(root.join("real"), root.join("cloud.google.com")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("x.go")).unwrap();

        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &[]),
            vec!["real/x.go"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_scanned() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "real/x.go", "package real");
        std::os::unix::fs::symlink(root.join("real/x.go"), root.join("alias.go")).unwrap();
        std::os::unix::fs::symlink(root.join("missing.go"), root.join("dangling.go")).unwrap();

        assert_eq!(
            discovered(root, DEFAULT_SOURCE_MARKER, &[]),
            vec!["alias.go", "real/x.go"]
        );
    }

    #[test]
    fn test_missing_root_yields_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let mut results = discover_source_files(&missing, DEFAULT_SOURCE_MARKER, &[]);
        assert!(matches!(results.next(), Some(Err(AnalysisError::Walk(_)))));
    }
}
