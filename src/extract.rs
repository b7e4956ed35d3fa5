//! Textual import extraction.
//!
//! This is a best-effort match on the parenthesized `import ( ... )` group, not
//! a Go parser. Known limitations:
//! - only the first import block of a file is read; later blocks are ignored
//! - single-line `import "x"` statements are not seen
//! - aliased imports keep their alias (`db "x/y"` becomes `db x/y`) and so never
//!   match a namespace prefix
//! - a `)` inside a comment in the block ends the block early

use regex::Regex;
use std::sync::LazyLock;

static IMPORT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bimport\s*\((.*?)\)").unwrap());

/// Return the raw import paths of the first import block in `source`, in
/// declaration order. Each line is trimmed and has its quote characters
/// removed; blank lines are skipped.
pub fn extract_imports(source: &str) -> Vec<String> {
    let block = match IMPORT_BLOCK.captures(source).and_then(|c| c.get(1)) {
        Some(block) => block.as_str(),
        None => return Vec::new(),
    };

    block
        .lines()
        .map(|line| line.trim().replace('"', ""))
        .filter(|statement| !statement.is_empty())
        .collect()
}
