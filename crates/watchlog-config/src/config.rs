use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Optional override for the data directory; defaults to the
    /// platform data dir under `PathManager`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON document-collection file
    #[default]
    Json,
    /// Flat CSV table file
    Csv,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Json => write!(f, "json"),
            StorageBackend::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "csv" => Ok(StorageBackend::Csv),
            _ => Err(format!("Invalid storage backend: {}. Use 'json' or 'csv'", s)),
        }
    }
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl TmdbConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: default_tmdb_base_url(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if present, otherwise start from defaults.
    /// A present-but-malformed file is an error, not a silent fallback.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(tmdb) = &self.tmdb {
            if tmdb.api_key.is_empty() || tmdb.api_key == "YOUR_API_KEY" {
                return Err(anyhow::anyhow!(
                    "TMDB section is present but api_key is not configured"
                ));
            }
            if tmdb.base_url.is_empty() {
                return Err(anyhow::anyhow!("TMDB base_url cannot be empty"));
            }
        }
        Ok(())
    }

    /// The TMDB section, required before the first search. The error text
    /// points at the command that fixes it.
    pub fn require_tmdb(&self) -> anyhow::Result<&TmdbConfig> {
        self.tmdb.as_ref().ok_or_else(|| {
            anyhow::anyhow!("TMDB API key not configured. Run 'watchlog config tmdb' first")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_backend() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert!(config.tmdb.is_none());
    }

    #[test]
    fn parses_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [tmdb]
            api_key = "k"

            [storage]
            backend = "csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Csv);
        let tmdb = config.tmdb.unwrap();
        assert_eq!(tmdb.api_key, "k");
        assert_eq!(tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn rejects_placeholder_api_key() {
        let config = Config {
            tmdb: Some(TmdbConfig::new("YOUR_API_KEY".to_string())),
            storage: StorageConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_tmdb_fails_at_first_use() {
        let config = Config::default();
        let err = config.require_tmdb().unwrap_err();
        assert!(err.to_string().contains("watchlog config tmdb"));
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            tmdb: Some(TmdbConfig::new("secret".to_string())),
            storage: StorageConfig {
                backend: StorageBackend::Csv,
                path: None,
            },
        };
        config.save_to_file(&path).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.storage.backend, StorageBackend::Csv);
        assert_eq!(loaded.tmdb.unwrap().api_key, "secret");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Json);
    }
}
