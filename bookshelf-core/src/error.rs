//! Error types for the bookshelf core with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a catalog, reading configuration or wiring
/// the controller to its collaborators.
///
/// Filtering, pagination and rendering never fail; they absorb odd input by
/// defaulting instead.
#[derive(Error, Debug)]
pub enum BookshelfError {
    /// A collaborator the controller cannot run without was not supplied
    #[error("Missing required element: {element}\n\nThe catalog controller needs a {element} before it can render results.")]
    MissingElement { element: &'static str },

    /// Failed to read a catalog file from disk
    #[error("Failed to read catalog from {path}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid YAML for the expected shape
    #[error("Failed to parse catalog YAML from {path}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Catalog could not be written out as YAML
    #[error("Failed to serialize catalog to YAML")]
    CatalogSerialize {
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Catalog file is not valid JSON for the expected shape
    #[error("Failed to parse catalog JSON from {path}")]
    CatalogJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog lists the same book id more than once
    #[error("Duplicate book id in catalog: {id}")]
    DuplicateBook { id: String },

    /// Catalog file extension is neither YAML nor JSON
    #[error("Unsupported catalog format: {path}\n\nUse a .yaml, .yml or .json file.")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration values that cannot be used
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Failed to read the configuration file
    #[error("Failed to read config from {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for the expected shape
    #[error("Failed to parse config from {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

pub type Result<T> = std::result::Result<T, BookshelfError>;
