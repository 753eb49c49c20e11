use crate::view::{AssetPaths, Notice};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Fixed user-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Reserved category that is always listed but never has items.
    pub placeholder: String,
    pub coming_soon: String,
    pub no_matches: String,
    pub load_failed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            placeholder: "Warehouse exterior (coming soon)".to_string(),
            coming_soon: "Warehouse exterior photos will be added soon.".to_string(),
            no_matches: "No photos match this category or search yet. Try another category or query."
                .to_string(),
            load_failed: "Could not load the gallery data. Check the manifest path.".to_string(),
        }
    }
}

impl Labels {
    pub fn notice(&self, notice: Notice) -> &str {
        match notice {
            Notice::ComingSoon => &self.coming_soon,
            Notice::NoMatches => &self.no_matches,
            Notice::LoadFailed => &self.load_failed,
        }
    }
}

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Gallery configuration, read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Manifest path or `http(s)://` URL.
    pub source: String,
    /// Directory or URL that image paths are resolved against when opening
    /// full-size images. Derived from `source` when unset.
    pub site_root: Option<String>,
    pub thumb_dir: String,
    pub full_dir: String,
    pub log_level: String,
    pub labels: Labels,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let assets = AssetPaths::default();
        Self {
            source: "data/gallery.json".to_string(),
            site_root: None,
            thumb_dir: assets.thumb_dir,
            full_dir: assets.full_dir,
            log_level: "info".to_string(),
            labels: Labels::default(),
        }
    }
}

impl GalleryConfig {
    /// Platform config file location, if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "gallery-explorer", "gallery-explorer")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from an explicit file, or from the platform default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, source: Option<String>, site_root: Option<String>) {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(root) = site_root {
            self.site_root = Some(root);
        }
    }

    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths {
            thumb_dir: self.thumb_dir.clone(),
            full_dir: self.full_dir.clone(),
        }
    }
}
