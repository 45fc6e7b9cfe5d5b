//! Configuration types for the occupancy board

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::io::HttpMethod;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Where the backend lives and how its endpoints are laid out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_status_path")]
    pub status_path: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_emergency_path")]
    pub emergency_path: String,
    #[serde(default = "default_emergency_method")]
    pub emergency_method: HttpMethod,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_path: default_status_path(),
            logs_path: default_logs_path(),
            emergency_path: default_emergency_path(),
            emergency_method: default_emergency_method(),
            timeout: default_timeout(),
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Fixed delay between the end of one cycle and the start of the next
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// How long the loading indicator shows before a changed status is applied
    #[serde(default = "default_render_delay", with = "humantime_serde")]
    pub render_delay: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: default_poll_interval(),
            render_delay: default_render_delay(),
        }
    }
}

/// Window requested from the logs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_days")]
    pub days: u32,
    #[serde(default = "default_begin_hours")]
    pub begin_hours_per_day: u8,
    #[serde(default = "default_end_hours")]
    pub end_hours_per_day: u8,
    #[serde(default = "default_step_hours")]
    pub step_hours: u8,
    #[serde(default)]
    pub style: QueryStyle,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            days: default_log_days(),
            begin_hours_per_day: default_begin_hours(),
            end_hours_per_day: default_end_hours(),
            step_hours: default_step_hours(),
            style: QueryStyle::default(),
        }
    }
}

/// How the log window is encoded in the URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStyle {
    /// `?begin_date=..&end_date=..&...`
    #[default]
    Query,
    /// `<begin>/<end>/<step>`
    Path,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_status_path() -> String {
    "/".to_string()
}

fn default_logs_path() -> String {
    "/logs/".to_string()
}

fn default_emergency_path() -> String {
    "/emergency/".to_string()
}

fn default_emergency_method() -> HttpMethod {
    HttpMethod::Patch
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(5000)
}

fn default_render_delay() -> Duration {
    Duration::from_millis(250)
}

fn default_log_days() -> u32 {
    7
}

fn default_begin_hours() -> u8 {
    9
}

fn default_end_hours() -> u8 {
    19
}

fn default_step_hours() -> u8 {
    1
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BoardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Reject settings the poll loop or log query cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.polling.interval.is_zero() {
            return Err(crate::BoardError::Config(
                "polling.interval must be greater than zero".to_string(),
            ));
        }
        if self.logs.begin_hours_per_day > 23 || self.logs.end_hours_per_day > 23 {
            return Err(crate::BoardError::Config(
                "logs hours per day must be within 0-23".to_string(),
            ));
        }
        if !(1..=24).contains(&self.logs.step_hours) {
            return Err(crate::BoardError::Config(
                "logs.step_hours must be within 1-24".to_string(),
            ));
        }
        Ok(())
    }
}
