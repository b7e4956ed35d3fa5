//! Rendering of the finished graph and delivery to stdout or a file.

use crate::assemble::PackageGraph;
use crate::classify::Classification;
use crate::cytoscape::render_cytoscape_html;
use crate::error::RenderError;
use crate::package::PackageId;
use clap::ValueEnum;
use pkggraph::DependencyGraph;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Output format for the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Graphviz DOT
    Dot,
    /// Mermaid flowchart
    Mermaid,
    /// Cytoscape graph data as JSON
    Cytoscape,
    /// Standalone HTML page with an interactive Cytoscape view
    Html,
}

impl OutputFormat {
    /// Pick a format from the output file extension; DOT otherwise.
    pub fn infer(output: Option<&Path>) -> Self {
        let extension = output
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("html" | "htm") => OutputFormat::Html,
            Some("json") => OutputFormat::Cytoscape,
            Some("mmd" | "mermaid") => OutputFormat::Mermaid,
            _ => OutputFormat::Dot,
        }
    }
}

/// Load the assembled graph and its classification into a renderable graph.
pub fn to_dependency_graph(
    graph: &PackageGraph,
    classification: &Classification,
) -> DependencyGraph<PackageId> {
    let mut dependency_graph = DependencyGraph::new();

    for package in graph.nodes() {
        dependency_graph.ensure_node(package.clone());
        if graph.is_import_only(package) {
            dependency_graph.mark_import_only(package);
        }
        if classification.is_highlighted(package) {
            dependency_graph.mark_highlighted(package);
        }
    }

    for edge in graph.edges() {
        dependency_graph.add_dependency(edge.source.clone(), edge.target.clone());
    }

    dependency_graph
}

/// Render the graph in `format`.
pub fn render(
    graph: &DependencyGraph<PackageId>,
    format: OutputFormat,
) -> Result<String, RenderError> {
    let rendered = match format {
        OutputFormat::Dot => graph.to_dot(),
        OutputFormat::Mermaid => graph.to_mermaid(),
        OutputFormat::Cytoscape => serde_json::to_string_pretty(&graph.to_graph_data())?,
        OutputFormat::Html => render_cytoscape_html(&graph.to_graph_data())?,
    };
    Ok(rendered)
}

/// Write the rendered graph to `output`, or to stdout when no file is given.
pub fn write_output(rendered: &str, output: Option<&Path>) -> Result<(), RenderError> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| RenderError::Write(path.to_path_buf(), e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(RenderError::Stdout)
        }
    }
}
