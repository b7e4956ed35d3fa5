//! Internal package import graphs for Go source trees.
//!
//! The pipeline runs leaf-first: [`discover`] finds source files, [`namespace`]
//! resolves the module path once up front, [`extract`] pulls each file's import
//! block, [`filter`] keeps the imports inside the module, [`package`] maps files
//! to their owning package, and [`assemble`] accumulates the graph.
//! [`classify`] and [`output`] prepare it for rendering.

pub mod analysis;
pub mod assemble;
pub mod classify;
pub mod config;
pub mod cytoscape;
pub mod discover;
pub mod error;
pub mod extract;
pub mod filter;
pub mod namespace;
pub mod output;
pub mod package;

pub use analysis::{AnalysisOptions, analyze_project, build_graph};
pub use assemble::{GraphBuilder, ImportEdge, PackageGraph};
pub use classify::{Classification, classify};
pub use error::{AnalysisError, RenderError};
pub use namespace::{Namespace, NamespaceResolver, NamespaceSource};
pub use output::OutputFormat;
pub use package::PackageId;
