use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the package graph
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid scan directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read source file {0}: {1}")]
    ReadFile(PathBuf, std::io::Error),

    #[error("Failed to read manifest {0}: {1}")]
    ManifestRead(PathBuf, std::io::Error),

    #[error("Failed to read module name from input: {0}")]
    Prompt(std::io::Error),

    #[error("No module namespace resolved; pass --module or declare one in go.mod")]
    EmptyNamespace,

    #[error("File {0} is outside the scan directory {1}")]
    OutsideRoot(PathBuf, PathBuf),

    #[error("Failed to read config file {0}: {1}")]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    ConfigParse(PathBuf, toml::de::Error),
}

/// Errors raised while rendering or writing the finished graph
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize graph data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write graph to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to write graph to stdout: {0}")]
    Stdout(std::io::Error),
}
