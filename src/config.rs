use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "demo.db";
pub const DEFAULT_BANNER_WIDTH: usize = 50;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct RelmapConfig {
    pub database: Option<String>,
    pub banner_width: Option<usize>,
}

impl RelmapConfig {
    /// Database path: the explicit override, then the config value, then `demo.db`
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn banner_width(&self) -> usize {
        self.banner_width.unwrap_or(DEFAULT_BANNER_WIDTH)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("relmap.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RelmapConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RelmapConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
