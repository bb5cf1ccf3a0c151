use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::probe::DEFAULT_TARGET;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub probe: ProbeConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Durable CSV sample log.
    pub log_path: PathBuf,
    pub server_mode: bool,
    /// Redraw cadence of the display. Sampling always runs at one second.
    pub refresh_rate_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_path: PathBuf::from("system_dashboard_log.csv"),
            server_mode: false,
            refresh_rate_ms: 250,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub target: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            target: DEFAULT_TARGET.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub color_support: String,
    pub severity_low: String,
    pub severity_mid: String,
    pub severity_high: String,
    pub border_style: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            color_support: "auto".to_string(),
            severity_low: "#10b981".to_string(),
            severity_mid: "#eab308".to_string(),
            severity_high: "#ef4444".to_string(),
            border_style: "rounded".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub toggle: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            toggle: "s".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub file: PathBuf,
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enabled: true,
            file: default_log_file(),
            level: "info".to_string(),
            json: false,
        }
    }
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sysdash")
        .join("sysdash.log")
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysdash").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Parse a keybind name: a single character, or one of the named keys.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}
