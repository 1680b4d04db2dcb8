use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, TomeError};
use crate::storage::Database;

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;

        Ok(Self {
            root,
            config_path,
            config,
            verbosity: cli.verbose,
        })
    }

    /// Open the book catalog database at the configured path.
    pub fn open_db(&self) -> Result<Database> {
        Database::open(self.db_path())
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.database.resolve(&self.root)
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("TOME_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".tome")? {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| TomeError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("tome"))
    }
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".tome") {
        root.join("config.toml")
    } else {
        dirs::config_dir()
            .unwrap_or_else(|| root.to_path_buf())
            .join("tome/config.toml")
    }
}

fn find_upwards(start: &Path, name: &str) -> Result<Option<PathBuf>> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Ok(Some(candidate));
        }
        current = dir.parent();
    }
    Ok(None)
}
