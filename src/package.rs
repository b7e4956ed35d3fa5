use crate::error::AnalysisError;
use pkggraph::GraphId;
use std::fmt;
use std::path::{Component, Path};

/// Identifier of a project-internal package: its directory relative to the
/// scan root, joined with `/`. The empty string is the root package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    pub fn root() -> Self {
        PackageId(String::new())
    }

    /// Create a package id from a slash-separated path, dropping stray
    /// leading/trailing separators.
    pub fn new(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        PackageId(normalized.trim_matches('/').to_string())
    }

    /// Derive the package owning `path`: the file's enclosing directory,
    /// relative to `root`.
    pub fn from_file_path(path: &Path, root: &Path) -> Result<Self, AnalysisError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| AnalysisError::OutsideRoot(path.to_path_buf(), root.to_path_buf()))?;

        let mut parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        // The final component is the file itself.
        parts.pop();

        Ok(PackageId(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl GraphId for PackageId {
    fn to_path(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_nested_file_maps_to_directory() {
        let root = PathBuf::from("/src/shop");
        let file = root.join("internal").join("store").join("store.go");

        let id = PackageId::from_file_path(&file, &root).unwrap();
        assert_eq!(id.as_str(), "internal/store");
    }

    #[test]
    fn test_root_file_maps_to_root_package() {
        let root = PathBuf::from("/src/shop");
        let id = PackageId::from_file_path(&root.join("doc.go"), &root).unwrap();

        assert!(id.is_root());
        assert_eq!(id, PackageId::root());
        assert_eq!(id.to_string(), ".");
    }

    #[test]
    fn test_relative_scan_root() {
        let root = PathBuf::from("./project");
        let file = PathBuf::from("./project/cmd/tool/main.go");

        let id = PackageId::from_file_path(&file, &root).unwrap();
        assert_eq!(id.as_str(), "cmd/tool");
    }

    #[test]
    fn test_file_outside_root_is_rejected() {
        let root = PathBuf::from("/src/shop");
        let result = PackageId::from_file_path(Path::new("/elsewhere/main.go"), &root);

        assert!(matches!(result, Err(AnalysisError::OutsideRoot(_, _))));
    }

    #[test]
    fn test_new_normalizes_separators() {
        assert_eq!(PackageId::new("/pkg/api/").as_str(), "pkg/api");
        assert_eq!(PackageId::new("pkg\\api").as_str(), "pkg/api");
        assert!(PackageId::new("/").is_root());
    }
}
