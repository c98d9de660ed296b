//! CLI error types.

use std::path::PathBuf;

use sitegraph_config::ConfigError;
use sitegraph_engine::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Validation(String),
}
