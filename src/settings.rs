use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{R50Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_percent")]
    pub default_percent: f64,
    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: Vec<String>,
}

fn default_store_path() -> String {
    "~/Documents/budget_notes.txt".to_string()
}

fn default_percent() -> f64 {
    50.0
}

fn default_clipboard_command() -> Vec<String> {
    vec![
        "xclip".to_string(),
        "-selection".to_string(),
        "clipboard".to_string(),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_percent: default_percent(),
            clipboard_command: default_clipboard_command(),
        }
    }
}

impl Settings {
    /// Resolve the notes file, preferring an explicit override.
    pub fn resolve_store_path(&self, file: Option<&str>) -> PathBuf {
        PathBuf::from(shellexpand_path(file.unwrap_or(&self.store_path)))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("r50")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {e}", path.display());
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| R50Error::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
