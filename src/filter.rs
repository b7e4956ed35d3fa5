use crate::namespace::Namespace;
use crate::package::PackageId;

/// Rewrite a raw import as a namespace-relative package id, or `None` when the
/// import does not start with the namespace.
///
/// The namespace is a literal string prefix; the remainder loses at most one
/// leading `/`. An import equal to the namespace refers to the root package,
/// and `example.org/shopfront/api` under `example.org/shop` becomes
/// `front/api`.
pub fn internal_import(namespace: &Namespace, raw: &str) -> Option<PackageId> {
    let rest = raw.strip_prefix(namespace.as_str())?;
    Some(PackageId::new(rest.strip_prefix('/').unwrap_or(rest)))
}

/// Keep the internal imports of `raw_imports`, in order. Duplicates are kept.
pub fn internal_imports<S: AsRef<str>>(namespace: &Namespace, raw_imports: &[S]) -> Vec<PackageId> {
    raw_imports
        .iter()
        .filter_map(|raw| internal_import(namespace, raw.as_ref()))
        .collect()
}
