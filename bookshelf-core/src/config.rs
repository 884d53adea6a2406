//! Bookshelf configuration
//!
//! Settings live in `config.yaml` under the platform config directory
//! (e.g. `~/.config/bookshelf/config.yaml` on Linux). Every field is
//! optional; a missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::controller::DEFAULT_PAGE_SIZE;
use crate::error::{BookshelfError, Result};
use crate::theme::Theme;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookshelfConfig {
    /// Books revealed per page
    pub page_size: usize,

    pub theme: Theme,

    /// Catalog file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for BookshelfConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            theme: Theme::default(),
            catalog: None,
        }
    }
}

impl BookshelfConfig {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| BookshelfError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml_ng::from_str(&content).map_err(|source| BookshelfError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        debug!(path = %path.display(), page_size = config.page_size, "Loaded config");
        Ok(config)
    }

    /// Default config file path, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bookshelf")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BookshelfError::InvalidConfig(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BookshelfConfig::load_from_path(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, BookshelfConfig::default());
        assert_eq!(config.page_size, 36);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "theme: night\ncatalog: /tmp/books.yaml\n").unwrap();

        let config = BookshelfConfig::load_from_path(&path).unwrap();
        assert_eq!(config.theme, Theme::Night);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/books.yaml")));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "page_size: 0\n").unwrap();

        let err = BookshelfConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, BookshelfError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_theme_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "theme: dusk\n").unwrap();

        let err = BookshelfConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, BookshelfError::ConfigParse { .. }));
    }
}
