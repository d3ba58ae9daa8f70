use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Override for the on-disk store root. Defaults to the platform app data dir.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Base URL of the snapshot sync service.
    #[serde(default = "default_sync_base_url")]
    pub sync_base_url: String,
}

fn default_sync_base_url() -> String {
    "http://localhost:4000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: None,
            sync_base_url: default_sync_base_url(),
        }
    }
}

/// Platform-specific application data directory.
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/com.restocheck.app");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("com.restocheck.app");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/com.restocheck.app");
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".")
}

fn get_config_path() -> PathBuf {
    let mut dir = app_data_dir();
    dir.push("settings.toml");
    dir
}

fn load_config_internal() -> AppConfig {
    let config_path = get_config_path();

    if let Ok(content) = fs::read_to_string(&config_path) {
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                tracing::info!(path = ?config_path, "Loaded settings.toml");
                return config;
            }
            Err(e) => {
                tracing::warn!(path = ?config_path, error = %e, "Failed to parse settings.toml, using defaults");
            }
        }
    }

    AppConfig::default()
}

lazy_static! {
    static ref APP_CONFIG: AppConfig = load_config_internal();
}

/// Get the cached application configuration (loaded once at startup)
pub fn get_config() -> &'static AppConfig {
    &APP_CONFIG
}
