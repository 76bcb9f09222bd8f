//! Application-level errors.

use pixelink_core::ConfigError;
use pixelink_render::{ExportError, RendererError};
use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Script error: {0}")]
    Script(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
