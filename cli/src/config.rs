use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Default recipe API base; the free developer tier of TheMealDB.
pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
    pub api_base: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "ratatouille")
            .context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("ratatouille.db");

        let api_base = std::env::var("RATATOUILLE_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Config {
            db_path,
            data_dir,
            api_base,
        })
    }
}
