//! Graph assembly.
//!
//! [`GraphBuilder`] is fed one scanned file at a time and owns all state for a
//! run. Each file's internal imports are appended to its package's list once;
//! repeated targets are kept, so the per-package edge count is the sum of the
//! per-file counts.

use crate::package::PackageId;
use std::collections::{HashMap, HashSet};

/// A directed `source imports target` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportEdge {
    pub source: PackageId,
    pub target: PackageId,
}

/// Accumulates packages and their internal imports across scanned files.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<PackageId>,
    seen: HashSet<PackageId>,
    imports: Vec<(PackageId, Vec<PackageId>)>,
    slots: HashMap<PackageId, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file owned by `package` together with its internal imports.
    pub fn add_file(&mut self, package: PackageId, internal_imports: Vec<PackageId>) {
        if self.seen.insert(package.clone()) {
            self.nodes.push(package.clone());
        }

        match self.slots.get(&package) {
            Some(&slot) => self.imports[slot].1.extend(internal_imports),
            None => {
                self.slots.insert(package.clone(), self.imports.len());
                self.imports.push((package, internal_imports));
            }
        }
    }

    /// Imports accumulated so far for `package`.
    pub fn imports_of(&self, package: &PackageId) -> &[PackageId] {
        self.slots
            .get(package)
            .map(|&slot| self.imports[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Number of file-owning packages seen so far.
    pub fn package_count(&self) -> usize {
        self.nodes.len()
    }

    /// Flatten into the final graph. Import targets that own no file become
    /// import-only nodes.
    pub fn finish(self) -> PackageGraph {
        let GraphBuilder {
            mut nodes,
            mut seen,
            imports,
            ..
        } = self;

        let mut import_only = HashSet::new();
        let mut edges = Vec::new();

        for (source, targets) in imports {
            for target in targets {
                if seen.insert(target.clone()) {
                    nodes.push(target.clone());
                    import_only.insert(target.clone());
                }
                edges.push(ImportEdge {
                    source: source.clone(),
                    target,
                });
            }
        }

        PackageGraph {
            nodes,
            edges,
            import_only,
        }
    }
}

/// The assembled package graph: nodes in first-seen order and edges in
/// accumulation order, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    nodes: Vec<PackageId>,
    edges: Vec<ImportEdge>,
    import_only: HashSet<PackageId>,
}

impl PackageGraph {
    pub fn nodes(&self) -> &[PackageId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ImportEdge] {
        &self.edges
    }

    pub fn contains(&self, package: &PackageId) -> bool {
        self.nodes.contains(package)
    }

    /// True for packages that are imported but own no scanned file.
    pub fn is_import_only(&self, package: &PackageId) -> bool {
        self.import_only.contains(package)
    }

    /// Targets imported by `package`, in accumulation order.
    pub fn imports_of<'a>(
        &'a self,
        package: &'a PackageId,
    ) -> impl Iterator<Item = &'a PackageId> + 'a {
        self.edges
            .iter()
            .filter(move |edge| &edge.source == package)
            .map(|edge| &edge.target)
    }
}
