//! Connection settings for the remote collection.
//!
//! Settings come from `~/.taskpad/config.toml` when it exists and fall back to
//! built-in defaults otherwise. Command-line flags override individual fields
//! after loading.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use url::Url;

use crate::error::{Result, TaskpadError};
use crate::wire::WireSchema;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_COLLECTION: &str = "todos";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub fn get_taskpad_dir() -> std::io::Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Unable to find home directory",
            )
        })
        .map(|home| home.join(".taskpad"))
}

pub fn get_config_file_path() -> std::io::Result<PathBuf> {
    get_taskpad_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: String,
    pub collection: String,
    pub schema: WireSchema,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            schema: WireSchema::default(),
        }
    }
}

/// Per-field overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub collection: Option<String>,
    pub schema: Option<WireSchema>,
}

impl Settings {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = toml::from_str(&content)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(collection) = overrides.collection {
            self.collection = collection;
        }
        if let Some(schema) = overrides.schema {
            self.schema = schema;
        }
        self
    }

    pub fn validate(self) -> Result<Self> {
        Url::parse(&self.base_url).map_err(|e| {
            TaskpadError::config(format!("invalid base_url {:?}: {e}", self.base_url))
        })?;
        let collection = self.collection.trim_matches('/').to_string();
        if collection.is_empty() || collection.contains('/') {
            return Err(TaskpadError::config(format!(
                "collection must be a single path segment, got {:?}",
                self.collection
            )));
        }
        Ok(Self { collection, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.collection, DEFAULT_COLLECTION);
        assert_eq!(settings.schema, WireSchema::NameDone);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "base_url = \"https://app-api-backend.onrender.com\"\ncollection = \"items\"\n",
        );
        let settings = Settings::load(path).unwrap();
        assert_eq!(settings.base_url, "https://app-api-backend.onrender.com");
        assert_eq!(settings.collection, "items");
        assert_eq!(settings.schema, WireSchema::NameDone);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "base_ulr = \"http://x\"\n");
        assert!(matches!(
            Settings::load(path),
            Err(TaskpadError::TomlDe(_))
        ));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let settings = Settings::default().with_overrides(Overrides {
            base_url: Some("http://localhost:9000".to_string()),
            collection: None,
            schema: Some(WireSchema::TitleCompleted),
        });
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.collection, DEFAULT_COLLECTION);
        assert_eq!(settings.schema, WireSchema::TitleCompleted);
    }

    #[test]
    fn validate_normalizes_collection_slashes() {
        let settings = Settings {
            collection: "/todos/".to_string(),
            ..Settings::default()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.collection, "todos");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_url = Settings {
            base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(bad_url.validate(), Err(TaskpadError::Config(_))));

        let nested = Settings {
            collection: "a/b".to_string(),
            ..Settings::default()
        };
        assert!(matches!(nested.validate(), Err(TaskpadError::Config(_))));
    }
}
