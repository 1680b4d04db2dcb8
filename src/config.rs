use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TomeError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub openlibrary: OpenLibraryConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("TOME_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| TomeError::MissingConfig("config directory not found".to_string()))?
            .join("tome/config.toml");
        Self::load_patch(&path)
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| TomeError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| TomeError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.database {
            self.database.merge(patch);
        }
        if let Some(patch) = patch.download {
            self.download.merge(patch);
        }
        if let Some(patch) = patch.openlibrary {
            self.openlibrary.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("TOME_DATA_DIR") {
            self.data.data_dir = value;
        }
        if let Some(value) = env_string("TOME_OUTPUT_PATH") {
            self.data.output_path = value;
        }
        if let Some(value) = env_string("TOME_DB_PATH") {
            self.database.path = Some(value);
        }
        if let Some(values) = env_list("TOME_DUMP_URLS") {
            self.download.urls = values;
        }
        if let Some(value) = env_usize("TOME_DOWNLOAD_WORKERS")? {
            self.download.workers = value;
        }
        if let Some(value) = env_usize("TOME_CHUNK_SIZE")? {
            self.download.chunk_size = value;
        }
        if let Some(value) = env_string("TOME_OPENLIBRARY_BASE_URL") {
            self.openlibrary.base_url = value;
        }
        if let Some(value) = env_u64("TOME_OPENLIBRARY_TIMEOUT_SECS")? {
            self.openlibrary.timeout_secs = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory for downloaded and decompressed dump files.
    #[serde(default)]
    pub data_dir: String,
    /// Default path for newline-delimited JSON search output.
    #[serde(default)]
    pub output_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            output_path: "output/output.json".to_string(),
        }
    }
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.data_dir {
            self.data_dir = value;
        }
        if let Some(value) = patch.output_path {
            self.output_path = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path. Defaults to `<root>/tome.db` when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl DatabaseConfig {
    fn merge(&mut self, patch: DatabasePatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
    }

    pub fn resolve(&self, root: &Path) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(path),
            None => root.join("tome.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Dump files to download and ingest.
    #[serde(default)]
    pub urls: Vec<String>,
    /// Fixed size of the parallel download pool.
    #[serde(default)]
    pub workers: usize,
    /// Rows per storage batch during dump parsing.
    #[serde(default)]
    pub chunk_size: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            urls: vec!["https://openlibrary.org/data/ol_dump_editions_latest.txt.gz".to_string()],
            workers: 5,
            chunk_size: 100_000,
        }
    }
}

impl DownloadConfig {
    fn merge(&mut self, patch: DownloadPatch) {
        if let Some(values) = patch.urls {
            self.urls = values;
        }
        if let Some(value) = patch.workers {
            self.workers = value;
        }
        if let Some(value) = patch.chunk_size {
            self.chunk_size = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenLibraryConfig {
    /// Base URL for the works detail API.
    #[serde(default)]
    pub base_url: String,
    /// Per-request timeout for detail lookups.
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            timeout_secs: 30,
        }
    }
}

impl OpenLibraryConfig {
    fn merge(&mut self, patch: OpenLibraryPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub database: Option<DatabasePatch>,
    pub download: Option<DownloadPatch>,
    pub openlibrary: Option<OpenLibraryPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub data_dir: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatabasePatch {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DownloadPatch {
    pub urls: Option<Vec<String>>,
    pub workers: Option<usize>,
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OpenLibraryPatch {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| TomeError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| TomeError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(|entry| entry.to_string())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_any_config_file() {
        let config = Config::default();
        assert_eq!(config.data.output_path, "output/output.json");
        assert_eq!(config.download.workers, 5);
        assert_eq!(config.download.chunk_size, 100_000);
        assert_eq!(config.openlibrary.base_url, "https://openlibrary.org");
        assert_eq!(config.download.urls.len(), 1);
    }

    #[test]
    fn patch_merge_overrides_sections() {
        let mut config = Config::default();
        let patch: ConfigPatch = toml::from_str(
            r#"
            [download]
            workers = 2
            chunk_size = 10

            [openlibrary]
            base_url = "http://localhost:9200"
            "#,
        )
        .unwrap();
        config.merge_patch(patch);
        assert_eq!(config.download.workers, 2);
        assert_eq!(config.download.chunk_size, 10);
        assert_eq!(config.openlibrary.base_url, "http://localhost:9200");
        // untouched sections keep their defaults
        assert_eq!(config.data.data_dir, "data");
    }

    #[test]
    fn database_path_resolves_against_root() {
        let config = DatabaseConfig::default();
        let resolved = config.resolve(Path::new("/tmp/tome-root"));
        assert_eq!(resolved, PathBuf::from("/tmp/tome-root/tome.db"));

        let explicit = DatabaseConfig {
            path: Some("/var/lib/tome/books.db".to_string()),
        };
        assert_eq!(
            explicit.resolve(Path::new("/ignored")),
            PathBuf::from("/var/lib/tome/books.db")
        );
    }
}
