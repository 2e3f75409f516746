//! Configuration types for slotter

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{SlotterError, SlotterResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotterConfig {
    /// Scheduler configuration
    pub scheduler: SchedulerConfig,
    /// CSV input layout
    pub input: InputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SlotterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> SlotterResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SlotterError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> SlotterResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.scheduler.validate()?;
        config.input.validate(&config.scheduler)?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> SlotterResult<String> {
        toml::to_string_pretty(self).map_err(|e| SlotterError::Serialization(e.to_string()))
    }
}

/// Scheduler configuration shared by every time block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of meeting slots in each time block
    pub slot_count: usize,
    /// Number of request columns per mentor
    pub request_columns: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            slot_count: 9,
            request_columns: 6,
        }
    }
}

impl SchedulerConfig {
    pub fn new(slot_count: usize, request_columns: usize) -> Self {
        Self {
            slot_count,
            request_columns,
        }
    }

    /// Reject capacities that cannot hold any meeting
    pub fn validate(&self) -> SlotterResult<()> {
        if self.slot_count == 0 {
            return Err(SlotterError::Config(
                "slot_count must be at least 1".to_string(),
            ));
        }
        if self.request_columns == 0 {
            return Err(SlotterError::Config(
                "request_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Column layout of the request CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Column holding the mentor name
    pub mentor_column: usize,
    /// Column holding the day
    pub day_column: usize,
    /// Column holding the half-day period (AM/PM)
    pub period_column: usize,
    /// First of the `request_columns` fellow columns
    pub first_request_column: usize,
    /// Day/period value marking an unconfirmed time block
    pub undefined_marker: String,
    /// Whether the first row is a header
    pub has_headers: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mentor_column: 0,
            day_column: 1,
            period_column: 2,
            first_request_column: 3,
            undefined_marker: "Undefined".to_string(),
            has_headers: true,
        }
    }
}

impl InputConfig {
    /// Reject layouts where key columns collide or request columns overlap them
    pub fn validate(&self, scheduler: &SchedulerConfig) -> SlotterResult<()> {
        let keys = [
            ("mentor_column", self.mentor_column),
            ("day_column", self.day_column),
            ("period_column", self.period_column),
        ];

        for (i, (name, column)) in keys.iter().enumerate() {
            if let Some((other, _)) = keys[i + 1..].iter().find(|(_, c)| c == column) {
                return Err(SlotterError::Config(format!(
                    "{} and {} both use column {}",
                    name, other, column
                )));
            }
        }

        let requests = self.first_request_column
            ..self.first_request_column + scheduler.request_columns;
        if let Some((name, column)) = keys.iter().find(|(_, c)| requests.contains(c)) {
            return Err(SlotterError::Config(format!(
                "{} (column {}) overlaps request columns {}..{}",
                name, column, requests.start, requests.end
            )));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
