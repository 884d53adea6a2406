//! Catalog file loading
//!
//! A catalog file holds the author and genre lookup tables plus the list of
//! books, as YAML or JSON:
//!
//! ```yaml
//! authors:
//!   a1: Ann Author
//! genres:
//!   g1: Fantasy
//! books:
//!   - id: "1"
//!     title: Alpha
//!     author: a1
//!     image: https://example.com/alpha.jpg
//!     genres: [g1]
//! ```

use std::path::Path;
use tracing::debug;

use super::Catalog;
use crate::error::{BookshelfError, Result};

const INLINE_SOURCE: &str = "<inline>";

impl Catalog {
    /// Load a catalog, picking the parser from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| BookshelfError::CatalogRead {
                path: path.to_path_buf(),
                source,
            })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let catalog = match extension.as_deref() {
            Some("yaml") | Some("yml") => parse_yaml(&content, path)?,
            Some("json") => parse_json(&content, path)?,
            _ => {
                return Err(BookshelfError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        debug!(
            path = %path.display(),
            books = catalog.len(),
            authors = catalog.authors.len(),
            genres = catalog.genres.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        parse_yaml(content, Path::new(INLINE_SOURCE))
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        parse_json(content, Path::new(INLINE_SOURCE))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|source| BookshelfError::CatalogSerialize { source })
    }
}

fn parse_yaml(content: &str, path: &Path) -> Result<Catalog> {
    let catalog: Catalog =
        serde_yaml_ng::from_str(content).map_err(|source| BookshelfError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}

fn parse_json(content: &str, path: &Path) -> Result<Catalog> {
    let catalog: Catalog =
        serde_json::from_str(content).map_err(|source| BookshelfError::CatalogJson {
            path: path.to_path_buf(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}
