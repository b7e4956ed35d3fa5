use crate::package::PackageId;
use std::collections::BTreeSet;

/// Default marker for entrypoint packages (Go's `cmd/<tool>` convention).
pub const DEFAULT_HIGHLIGHT_MARKER: &str = "cmd";

/// Partition of package ids into highlighted and normal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub highlighted: BTreeSet<PackageId>,
    pub normal: BTreeSet<PackageId>,
}

impl Classification {
    pub fn is_highlighted(&self, package: &PackageId) -> bool {
        self.highlighted.contains(package)
    }
}

/// Highlight every package whose id contains `marker` as a literal substring.
///
/// An empty marker is a substring of every id; it is treated as "highlight
/// nothing" instead, so `--highlight ""` switches highlighting off.
pub fn classify<'a, I>(packages: I, marker: &str) -> Classification
where
    I: IntoIterator<Item = &'a PackageId>,
{
    let mut classification = Classification::default();

    for package in packages {
        if !marker.is_empty() && package.as_str().contains(marker) {
            classification.highlighted.insert(package.clone());
        } else {
            classification.normal.insert(package.clone());
        }
    }

    classification
}
