use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/aura.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub muse: MuseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            muse: MuseConfig::default(),
        }
    }
}

/// Settings for the Muse assistant. The API key deliberately stays out of
/// this file; it is read from the `GEMINI_API_KEY` environment variable only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_stream_replies")]
    pub stream_replies: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            stream_replies: default_stream_replies(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_stream_replies() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.muse.model, "gemini-2.5-flash");
        assert_eq!(
            config.muse.api_base,
            "https://generativelanguage.googleapis.com"
        );
        assert!(config.muse.stream_replies);
        assert_eq!(config.muse.request_timeout_secs, 30);
    }

    #[test]
    fn partial_muse_section_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"muse": {"stream_replies": false}}"#).unwrap();
        assert!(!config.muse.stream_replies);
        assert_eq!(config.muse.model, "gemini-2.5-flash");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config("does/not/exist.json");
        assert_eq!(config.muse.model, MuseConfig::default().model);
    }
}
