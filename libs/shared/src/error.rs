use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a playbook from disk.
///
/// A playbook that reads fine but does not hold a play is not an error; the
/// parser reports it as "no descriptor" so the scan can move on.
#[derive(Debug, Error)]
pub enum PlaybookError {
    #[error("failed to read playbook {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while mapping a descriptor onto a job template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to serialize extra_vars: {0}")]
    ExtraVars(#[from] serde_yaml::Error),
}

/// Errors raised while loading the application inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("applications file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read applications file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse applications file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("`{key}` must be a mapping of application name to settings")]
    InvalidApplications { key: String },
}
