// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::item::CalendarListEntry;
use crate::model::normalizer::NormalizeOptions;
use crate::model::parser::parse_time_string;
use anyhow::{Context, Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_calendar() -> String {
    "Calendar Assistant Calendar".to_string()
}
fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_start_time() -> String {
    "15:00".to_string()
}
fn default_duration_mins() -> u32 {
    60
}
fn default_series_days() -> u32 {
    365
}

fn default_title() -> String {
    "Untitled Event".to_string()
}
fn default_description() -> String {
    "Not provided".to_string()
}
fn default_location() -> String {
    "Not specified".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_calendar")]
    pub default_calendar: String,
    #[serde(default = "default_calendar_id")]
    pub default_calendar_id: String,
    #[serde(default)]
    pub calendars: Vec<CalendarListEntry>,

    /// Written verbatim into every event. Unset means the host's IANA zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_label: Option<String>,

    #[serde(default = "default_start_time")]
    pub default_start_time: String, // Format "HH:MM"
    #[serde(default = "default_duration_mins")]
    pub default_duration_mins: u32,
    #[serde(default = "default_series_days")]
    pub default_series_days: u32,

    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default = "default_description")]
    pub default_description: String,
    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_calendar: default_calendar(),
            default_calendar_id: default_calendar_id(),
            calendars: Vec::new(),
            timezone_label: None,
            default_start_time: default_start_time(),
            default_duration_mins: default_duration_mins(),
            default_series_days: default_series_days(),
            default_title: default_title(),
            default_description: default_description(),
            default_location: default_location(),
            default_color: None,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to defaults.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing, either by our
    /// explicit message or by an IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        // Atomic replace via a sibling temp file.
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace config file '{}'", path.display()))?;
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Builds normalizer defaults from this config. Fails on an unreadable start time.
    pub fn normalize_options(&self) -> Result<NormalizeOptions> {
        let default_start_time = parse_time_string(&self.default_start_time).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid default_start_time '{}' (expected HH:MM)",
                self.default_start_time
            )
        })?;
        if self.default_duration_mins == 0 {
            anyhow::bail!("default_duration_mins must be greater than zero");
        }

        Ok(NormalizeOptions {
            default_calendar_id: self.default_calendar_id.clone(),
            timezone_label: self.timezone_label.clone(),
            default_start_time,
            default_duration: Duration::minutes(i64::from(self.default_duration_mins)),
            default_series_span: Duration::days(i64::from(self.default_series_days)),
            default_title: self.default_title.clone(),
            default_description: self.default_description.clone(),
            default_location: self.default_location.clone(),
        })
    }
}
