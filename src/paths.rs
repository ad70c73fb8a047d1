// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

// Allow injecting a base path (from the mobile host app)
static MOBILE_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

pub struct AppPaths;

impl AppPaths {
    /// Initialize the mobile files directory. Must be called once at startup.
    pub fn init_mobile_path(path: String) {
        let _ = MOBILE_DATA_DIR.set(PathBuf::from(path));
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "folium", "folium")
    }

    /// Helper to ensure a directory exists before returning it.
    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    /// Mobile override first, then the test override, then the OS default.
    fn resolve_config_base() -> Option<PathBuf> {
        if let Some(mobile_root) = MOBILE_DATA_DIR.get() {
            return Some(mobile_root.join("config"));
        }

        if let Ok(test_dir) = env::var("FOLIUM_TEST_DIR") {
            return Some(PathBuf::from(test_dir));
        }

        Some(Self::get_proj_dirs()?.config_dir().to_path_buf())
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let path = Self::resolve_config_base()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }
}
