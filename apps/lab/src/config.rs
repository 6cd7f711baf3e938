use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "lab.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: Option<PathBuf>,
    pub reveal_delay_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            reveal_delay_ms: 1000,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    catalog_path: Option<PathBuf>,
    reveal_delay_ms: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.catalog_path {
                settings.catalog_path = Some(v);
            }
            if let Some(v) = file_cfg.reveal_delay_ms {
                settings.reveal_delay_ms = v;
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
    }

    if let Some(v) = env("LAB_CATALOG") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__REVEAL_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.reveal_delay_ms = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}
