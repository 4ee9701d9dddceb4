//! Configuration management
//!
//! Everything that survives a restart lives here: a single JSON config file
//! plus a sibling file for the AI recommendation cache. All reads tolerate
//! missing or corrupt data by falling back to defaults; writes are
//! best-effort and never surface errors to the caller.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::models::UiConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub auto_miniplayer: bool,
    #[serde(default)]
    pub ui: UiConfig,
    // Downloads (stored as JSON array of content ids)
    #[serde(default)]
    pub downloads_json: String,
    // Playback progress (stored as JSON map of content id -> seconds)
    #[serde(default)]
    pub progress_json: String,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            auto_miniplayer: true,
            ui: UiConfig::default(),
            downloads_json: String::new(),
            progress_json: String::new(),
        }
    }
}

impl AppConfig {
    fn config_path() -> PathBuf {
        let mut path = config_dir();
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
            }
        }

        Self::default()
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Ok(content) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme != "light"
    }
}

fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("streammore");
    fs::create_dir_all(&path).ok();
    path
}

fn recs_cache_path() -> PathBuf {
    let mut path = config_dir();
    path.push("recs_cache.json");
    path
}

/// Load the persisted recommendation cache (content id -> recommended ids).
pub fn load_recs_cache() -> HashMap<String, Vec<String>> {
    let path = recs_cache_path();

    if path.exists() {
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(cache) = serde_json::from_str(&content) {
                return cache;
            }
        }
    }

    HashMap::new()
}

/// Persist the recommendation cache. Failures are swallowed; the cache is
/// an optimization, never a requirement.
pub fn save_recs_cache(cache: &HashMap<String, Vec<String>>) {
    let path = recs_cache_path();
    if let Ok(content) = serde_json::to_string_pretty(cache) {
        let _ = fs::write(path, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.theme, "dark");
        assert!(config.auto_miniplayer);
        assert!(config.ui.global.show_ai_assistant);
        assert!(config.downloads_json.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_known_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{"theme":"light","ui":{"global":{"show_ai_assistant":false}}}"#)
                .unwrap();
        assert_eq!(config.theme, "light");
        assert!(!config.is_dark());
        assert!(!config.ui.global.show_ai_assistant);
        // Unspecified nested flags still default on
        assert!(config.ui.navigation.show_search);
        assert!(config.auto_miniplayer);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config: AppConfig =
            serde_json::from_str(r#"{"theme":"dark","legacy_setting":42}"#).unwrap();
        assert_eq!(config.theme, "dark");
    }
}
