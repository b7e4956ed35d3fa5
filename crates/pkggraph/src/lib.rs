//! Graph models and renderers shared by the `gopkg-graph` CLI.
//!
//! The analysis side builds a [`DependencyGraph`]; everything after that point
//! (DOT, Mermaid, Cytoscape payloads) lives here so the extraction pipeline never
//! has to know how a graph is drawn.

pub mod dependency_graph;
pub mod filters;

pub use dependency_graph::{DependencyGraph, GraphId};

use serde::{Deserialize, Serialize};

/// Graph node representation shared between the CLI and frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String, // "package" or "import_only"
    pub is_orphan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
}

/// Graph edge representation shared between the CLI and frontend.
///
/// `count` is the number of import declarations collapsed into this edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub count: usize,
}

/// Graph configuration for visualization consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub highlighted_packages: Vec<String>,
}

/// Complete graph data payload passed from the CLI to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<GraphConfig>,
}
