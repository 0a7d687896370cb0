//! TOML-based application configuration.
//!
//! Every timing and scale constant in the system lives here as a named
//! value -- the fixed class size behind the gauge, the poll period, the
//! button reset delay, the auto-loop period, the announcement gap -- so the
//! core stays testable with accelerated clocks instead of baked-in literals.
//!
//! Configuration is stored at `~/.config/classpulse/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Returns `~/.config/classpulse[-dev]/` based on CLASSPULSE_ENV.
///
/// Set CLASSPULSE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CLASSPULSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("classpulse-dev")
    } else {
        base_dir.join("classpulse")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Remote counter service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Gauge scale and polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Class size the gauge is scaled against. A count at or above this
    /// renders a full bar.
    #[serde(default = "default_max_population")]
    pub max_population: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Fixed-width cell count of the rendered bar.
    #[serde(default = "default_bar_width")]
    pub bar_width: u32,
}

/// Signal button behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Delay before a fired button returns to idle.
    #[serde(default = "default_reset_after_ms")]
    pub reset_after_ms: u64,
}

/// Auto-signal loop behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoConfig {
    #[serde(default = "default_auto_interval_ms")]
    pub interval_ms: u64,
}

/// Notification channel behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Gap between successive messages of one announcement set.
    #[serde(default = "default_message_gap_ms")]
    pub message_gap_ms: u64,
}

/// External content panel target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_url")]
    pub url: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/classpulse/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub gauge: GaugeConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub auto: AutoConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://54.180.117.184:8000".into()
}
fn default_max_population() -> u32 {
    37
}
fn default_poll_interval_ms() -> u64 {
    1_000
}
fn default_bar_width() -> u32 {
    20
}
fn default_reset_after_ms() -> u64 {
    10_000
}
fn default_auto_interval_ms() -> u64 {
    30_000
}
fn default_message_gap_ms() -> u64 {
    500
}
fn default_board_url() -> String {
    "https://padlet.com/dlwjdtn410/padlet-p76oleydm4y0573v".into()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            max_population: default_max_population(),
            poll_interval_ms: default_poll_interval_ms(),
            bar_width: default_bar_width(),
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            reset_after_ms: default_reset_after_ms(),
        }
    }
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_auto_interval_ms(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            message_gap_ms: default_message_gap_ms(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            url: default_board_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            gauge: GaugeConfig::default(),
            signal: SignalConfig::default(),
            auto: AutoConfig::default(),
            notify: NotifyConfig::default(),
            board: BoardConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(String::new()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as number"),
                                })?
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or persist and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.gauge.poll_interval_ms)
    }

    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.signal.reset_after_ms)
    }

    pub fn auto_interval(&self) -> Duration {
        Duration::from_millis(self.auto.interval_ms)
    }

    pub fn message_gap(&self) -> Duration {
        Duration::from_millis(self.notify.message_gap_ms)
    }
}
