//! Go internal package graph analyzer
//!
//! Walks a source tree, extracts each file's import block and builds the graph
//! of imports between the project's own packages.

use crate::assemble::{GraphBuilder, PackageGraph};
use crate::discover::{DEFAULT_SOURCE_MARKER, discover_source_files};
use crate::error::AnalysisError;
use crate::extract::extract_imports;
use crate::filter::internal_imports;
use crate::namespace::Namespace;
use crate::package::PackageId;
use log::{debug, info, trace, warn};
use std::path::Path;

/// Options for a single analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Substring a file name must contain to be scanned.
    pub source_marker: String,
    /// Wildcard patterns for root-relative directories to skip.
    pub exclude_patterns: Vec<String>,
    /// Log and skip unreadable files instead of failing the run.
    pub skip_unreadable: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            source_marker: DEFAULT_SOURCE_MARKER.to_string(),
            exclude_patterns: Vec::new(),
            skip_unreadable: false,
        }
    }
}

/// Fail unless `root` is an existing directory.
pub fn ensure_scan_root(root: &Path) -> Result<(), AnalysisError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidRoot(root.to_path_buf()))
    }
}

/// Feed one file's source text into the builder.
fn record_source(
    builder: &mut GraphBuilder,
    package: PackageId,
    source: &str,
    namespace: &Namespace,
) {
    let raw_imports = extract_imports(source);
    let internal = internal_imports(namespace, &raw_imports);

    for target in &internal {
        trace!("{package} imports {target}");
    }

    builder.add_file(package, internal);
}

/// Build a graph from in-memory `(package, source text)` pairs.
pub fn build_graph<I, S>(sources: I, namespace: &Namespace) -> PackageGraph
where
    I: IntoIterator<Item = (PackageId, S)>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::new();
    for (package, source) in sources {
        record_source(&mut builder, package, source.as_ref(), namespace);
    }
    builder.finish()
}

/// Analyze a Go source tree and return its internal package graph
pub fn analyze_project(
    root: &Path,
    namespace: &Namespace,
    options: &AnalysisOptions,
) -> Result<PackageGraph, AnalysisError> {
    ensure_scan_root(root)?;

    info!("Discovering files under {}", root.display());

    let mut builder = GraphBuilder::new();
    let mut scanned = 0usize;

    for file_path in
        discover_source_files(root, &options.source_marker, &options.exclude_patterns)
    {
        let file_path = file_path?;
        let package = PackageId::from_file_path(&file_path, root)?;

        debug!("Scanning file {}", file_path.display());

        let source = match std::fs::read_to_string(&file_path) {
            Ok(source) => source,
            Err(e) if options.skip_unreadable => {
                warn!("Skipping file {}: {}", file_path.display(), e);
                continue;
            }
            Err(e) => return Err(AnalysisError::ReadFile(file_path, e)),
        };

        record_source(&mut builder, package, &source, namespace);
        scanned += 1;
    }

    info!(
        "Scanned {} files in {} packages",
        scanned,
        builder.package_count()
    );

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn ns(name: &str) -> Namespace {
        Namespace::new(name).unwrap()
    }

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_build_graph_from_sources() {
        let sources = vec![
            (PackageId::new("a"), "package a\nimport (\n\t\"proj/b\"\n)\n"),
            (PackageId::new("a"), "package a\nimport (\n\t\"proj/c\"\n\t\"fmt\"\n)\n"),
            (PackageId::new("d"), "package d\n"),
        ];

        let graph = build_graph(sources, &ns("proj"));
        let a = PackageId::new("a");
        let targets: Vec<&str> = graph.imports_of(&a).map(PackageId::as_str).collect();

        assert_eq!(targets, vec!["b", "c"]);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.contains(&PackageId::new("d")));
    }

    #[test]
    fn test_invalid_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = analyze_project(&missing, &ns("proj"), &AnalysisOptions::default());
        assert!(matches!(result, Err(AnalysisError::InvalidRoot(_))));
    }

    #[test]
    fn test_analyze_project_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a/x.go", "package a\nimport (\n\t\"proj/b\"\n)\n");
        create_test_file(root, "a/y.go", "package a\nimport (\n\t\"proj/c\"\n)\n");
        create_test_file(root, "b/b.go", "package b\n");
        create_test_file(root, "notes.txt", "import (\n\"proj/zzz\"\n)\n");

        let graph = analyze_project(root, &ns("proj"), &AnalysisOptions::default()).unwrap();

        let a = PackageId::new("a");
        let mut targets: Vec<&str> = graph.imports_of(&a).map(PackageId::as_str).collect();
        targets.sort();
        assert_eq!(targets, vec!["b", "c"]);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.contains(&PackageId::new("b")));
        assert!(!graph.is_import_only(&PackageId::new("b")));
        assert!(graph.is_import_only(&PackageId::new("c")));
        assert!(!graph.contains(&PackageId::new("zzz")));
    }

    #[test]
    fn test_no_internal_imports_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "main.go", "package main\nimport (\n\t\"fmt\"\n)\n");
        create_test_file(root, "util/util.go", "package util\n");

        let graph = analyze_project(root, &ns("proj"), &AnalysisOptions::default()).unwrap();
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_undecodable_file_is_fatal_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("bad.go"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = analyze_project(root, &ns("proj"), &AnalysisOptions::default());
        assert!(matches!(result, Err(AnalysisError::ReadFile(_, _))));
    }

    #[test]
    fn test_undecodable_file_can_be_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("bad.go"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        create_test_file(root, "good/good.go", "package good\n");

        let options = AnalysisOptions {
            skip_unreadable: true,
            ..AnalysisOptions::default()
        };
        let graph = analyze_project(root, &ns("proj"), &options).unwrap();

        assert_eq!(graph.nodes(), &[PackageId::new("good")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_vendor_directory_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "real/x.go", "package real\nimport (\n\t\"proj/b\"\n)\n");
        std::os::unix::fs::symlink(root.join("real"), root.join("cloud.google.com")).unwrap();

        let graph = analyze_project(root, &ns("proj"), &AnalysisOptions::default()).unwrap();

        let real = PackageId::new("real");
        let targets: Vec<&str> = graph.imports_of(&real).map(PackageId::as_str).collect();
        assert_eq!(targets, vec!["b"]);
        assert!(!graph.contains(&PackageId::new("cloud.google.com")));
    }

    #[test]
    fn test_custom_source_marker() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a/a.go", "package a\n");
        create_test_file(root, "b/b.gox", "package b\n");

        let options = AnalysisOptions {
            source_marker: ".gox".to_string(),
            ..AnalysisOptions::default()
        };
        let graph = analyze_project(root, &ns("proj"), &options).unwrap();

        assert_eq!(graph.nodes(), &[PackageId::new("b")]);
    }
}
