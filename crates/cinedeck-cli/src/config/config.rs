//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinedeck_api::filesearch::DEFAULT_ENDPOINT;
use cinedeck_api::tmdb::DEFAULT_BASE_URL;
use cinedeck_core::{
    DEFAULT_EMBED_BASE_URL, DEFAULT_EXTENSIONS, DEFAULT_IMAGE_BASE_URL, DownloadFilter,
    StaticCredits, ViewOptions,
};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// File-search endpoint settings.
    #[serde(default)]
    pub file_search: FileSearchConfig,
    /// Trailer player settings.
    #[serde(default)]
    pub trailer: TrailerConfig,
    /// Placeholder credits shown on every page.
    #[serde(default)]
    pub credits: StaticCredits,
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL.
    pub base_url: String,
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Image host prefix for backdrops.
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            language: String::from("en-US"),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

/// File-search endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Search endpoint URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Accepted link suffixes.
    pub extensions: Vec<String>,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_ENDPOINT),
            timeout_secs: 15,
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| String::from(e)).collect(),
        }
    }
}

impl FileSearchConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trailer player configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrailerConfig {
    /// Embed host prefix for trailer keys.
    pub embed_base_url: String,
}

impl Default for TrailerConfig {
    fn default() -> Self {
        Self {
            embed_base_url: String::from(DEFAULT_EMBED_BASE_URL),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Returns the view options derived from this config.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            image_base_url: self.tmdb.image_base_url.clone(),
            embed_base_url: self.trailer.embed_base_url.clone(),
            credits: self.credits.clone(),
        }
    }

    /// Returns the download extension filter.
    #[must_use]
    pub fn download_filter(&self) -> DownloadFilter {
        DownloadFilter::new(self.file_search.extensions.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.file_search.base_url, DEFAULT_ENDPOINT);
        assert_eq!(config.file_search.timeout(), Duration::from_secs(15));
        assert_eq!(config.download_filter(), DownloadFilter::default());
        assert_eq!(config.view_options(), ViewOptions::default());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.tmdb.language = String::from("ja-JP");
        config.file_search.extensions = vec![String::from(".mkv")];
        config.credits.top_rated_rank = 1;

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[file_search]\ntimeout_secs = 5\n\n[trailer]\nembed_base_url = \"https://e.test\"\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.file_search.timeout(), Duration::from_secs(5));
        assert_eq!(config.file_search.base_url, DEFAULT_ENDPOINT);
        assert_eq!(config.view_options().embed_base_url, "https://e.test");
        assert_eq!(config.tmdb, TmdbConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\nlanguage = 1").unwrap();

        // Act
        let err = AppConfig::load(&path).unwrap_err();

        // Assert
        assert!(err.to_string().contains("failed to parse"));
    }
}
