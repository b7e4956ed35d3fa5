//! Run configuration.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `gopkg-graph.toml` at the scan root, and command-line flags applied last by
//! the binary.

use crate::analysis::AnalysisOptions;
use crate::classify::DEFAULT_HIGHLIGHT_MARKER;
use crate::discover::DEFAULT_SOURCE_MARKER;
use crate::error::AnalysisError;
use crate::namespace::NamespaceSource;
use crate::output::OutputFormat;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Config file looked up at the scan root.
pub const CONFIG_FILE: &str = "gopkg-graph.toml";

/// Contents of `gopkg-graph.toml`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub graph: GraphSection,
}

/// The `[graph]` table.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphSection {
    pub module: Option<String>,
    pub highlight: Option<String>,
    pub source_marker: Option<String>,
    pub exclude: Vec<String>,
    pub skip_unreadable: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// Parse config file text.
pub fn parse_config(content: &str, path: &Path) -> Result<FileConfig, AnalysisError> {
    toml::from_str(content).map_err(|e| AnalysisError::ConfigParse(path.to_path_buf(), e))
}

/// Load `<root>/gopkg-graph.toml` if it exists.
pub fn load_config(root: &Path) -> Result<Option<FileConfig>, AnalysisError> {
    let config_path = root.join(CONFIG_FILE);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AnalysisError::ConfigRead(config_path, e)),
    };

    parse_config(&content, &config_path).map(Some)
}

/// Values given on the command line. `None`/`false`/empty means the flag was
/// not passed and the lower layers stand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub output_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub module: Option<String>,
    pub highlight: Option<String>,
    pub source_marker: Option<String>,
    pub exclude: Vec<String>,
    pub skip_unreadable: bool,
    pub no_prompt: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scan_directory: PathBuf,
    pub output_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub module: Option<String>,
    pub highlight: String,
    pub prompt: bool,
    pub analysis: AnalysisOptions,
}

impl Settings {
    /// Defaults overlaid with the config file.
    pub fn new(scan_directory: PathBuf, file: FileConfig) -> Self {
        let graph = file.graph;
        let defaults = AnalysisOptions::default();

        Self {
            scan_directory,
            output_file: None,
            format: graph.format,
            module: graph.module,
            highlight: graph
                .highlight
                .unwrap_or_else(|| DEFAULT_HIGHLIGHT_MARKER.to_string()),
            prompt: true,
            analysis: AnalysisOptions {
                source_marker: graph
                    .source_marker
                    .unwrap_or_else(|| DEFAULT_SOURCE_MARKER.to_string()),
                exclude_patterns: graph.exclude,
                skip_unreadable: graph.skip_unreadable.unwrap_or(defaults.skip_unreadable),
            },
        }
    }

    /// Apply command-line flags on top of the default and file layers.
    ///
    /// Scalar flags replace the file value; `--exclude` patterns are added to
    /// the file's list.
    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if overrides.output_file.is_some() {
            self.output_file = overrides.output_file;
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        if overrides.module.is_some() {
            self.module = overrides.module;
        }
        if let Some(highlight) = overrides.highlight {
            self.highlight = highlight;
        }
        if let Some(marker) = overrides.source_marker {
            self.analysis.source_marker = marker;
        }
        self.analysis.exclude_patterns.extend(overrides.exclude);
        if overrides.skip_unreadable {
            self.analysis.skip_unreadable = true;
        }
        if overrides.no_prompt {
            self.prompt = false;
        }
    }

    /// Namespace sources in the order they are tried: explicit module, then
    /// `go.mod`, then the interactive prompt when allowed.
    pub fn namespace_sources(&self) -> Vec<NamespaceSource> {
        let mut sources = Vec::new();
        if let Some(module) = &self.module {
            sources.push(NamespaceSource::Flag(module.clone()));
        }
        sources.push(NamespaceSource::Manifest);
        if self.prompt {
            sources.push(NamespaceSource::Prompt);
        }
        sources
    }

    /// Explicit format, or one inferred from the output file name.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::infer(self.output_file.as_deref()))
    }
}
