//! Resolution of the project's base import path.
//!
//! Resolution happens once, before any file is scanned. Each
//! [`NamespaceSource`] is tried in order and the first non-empty answer wins;
//! if none produces one the run stops with [`AnalysisError::EmptyNamespace`],
//! since an empty namespace would classify every import as internal.

use crate::error::AnalysisError;
use log::{debug, info};
use regex::Regex;
use std::fmt;
use std::io::{BufRead, ErrorKind, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Manifest file looked up at the scan root.
pub const MANIFEST_FILE: &str = "go.mod";

const PROMPT: &str = "Input module name: ";

static MODULE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^module[ \t]+(.*?)\s*$").unwrap());

/// The project's base import path, e.g. `example.org/shop`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Trim surrounding whitespace and trailing separators; `None` if nothing
    /// is left.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim().trim_end_matches('/');
        if name.is_empty() {
            None
        } else {
            Some(Namespace(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a namespace may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceSource {
    /// A value given on the command line or in the config file.
    Flag(String),
    /// The `module` directive of `go.mod` at the scan root.
    Manifest,
    /// Ask the operator.
    Prompt,
}

/// Extract the module path from manifest text.
///
/// The first line-anchored `module <name>` directive wins. Quotes around the
/// name and a trailing `//` comment are dropped.
pub fn parse_module_directive(manifest: &str) -> Option<String> {
    let captures = MODULE_DIRECTIVE.captures(manifest)?;
    let raw = captures.get(1)?.as_str();

    let without_comment = match raw.find("//") {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let name = without_comment
        .trim()
        .trim_matches(|c| c == '"' || c == '`')
        .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Read the module path declared in `<root>/go.mod`.
///
/// A missing manifest or one without a directive resolves to `None`; any other
/// I/O failure is an error.
pub fn read_manifest_namespace(root: &Path) -> Result<Option<String>, AnalysisError> {
    let manifest_path = root.join(MANIFEST_FILE);

    match std::fs::read_to_string(&manifest_path) {
        Ok(content) => {
            let declared = parse_module_directive(&content);
            if declared.is_none() {
                debug!("No module directive in {}", manifest_path.display());
            }
            Ok(declared)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No manifest at {}", manifest_path.display());
            Ok(None)
        }
        Err(e) => Err(AnalysisError::ManifestRead(manifest_path, e)),
    }
}

/// Resolves the namespace from an ordered list of sources, prompting through
/// the injected reader/writer pair when it reaches [`NamespaceSource::Prompt`].
pub struct NamespaceResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> NamespaceResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn resolve(
        &mut self,
        root: &Path,
        sources: &[NamespaceSource],
    ) -> Result<Namespace, AnalysisError> {
        for source in sources {
            let candidate = match source {
                NamespaceSource::Flag(value) => Some(value.clone()),
                NamespaceSource::Manifest => read_manifest_namespace(root)?,
                NamespaceSource::Prompt => Some(self.prompt()?),
            };

            if let Some(namespace) = candidate.as_deref().and_then(Namespace::new) {
                info!("Using module namespace {namespace} ({source:?})");
                return Ok(namespace);
            }
            debug!("{source:?} did not produce a namespace");
        }

        Err(AnalysisError::EmptyNamespace)
    }

    fn prompt(&mut self) -> Result<String, AnalysisError> {
        self.output
            .write_all(PROMPT.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(AnalysisError::Prompt)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(AnalysisError::Prompt)?;

        Ok(line.trim().to_string())
    }
}
