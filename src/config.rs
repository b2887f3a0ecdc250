//! Planner configuration.
//!
//! Every field has a default, so an empty JSON object is a complete config:
//!
//! ```json
//! {
//!   "owner": "Adam",
//!   "day_start_minute": 480,
//!   "mark_count": 21,
//!   "catalog": [
//!     { "id": 1, "label": "3 hours", "kind": "three_hour" },
//!     { "id": 5, "label": "8 hours", "kind": "eight_hour" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{
    default_catalog, BlockTemplate, GridError, TimeGrid, TimeMark, DEFAULT_DAY_START_MINUTE,
    DEFAULT_MARK_COUNT,
};
use crate::validation::{validate_config, ValidationError};

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings for one planner surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Name used in the meeting summary.
    pub owner: String,
    /// First mark, in minutes since midnight.
    pub day_start_minute: u16,
    /// Number of half-hour marks on the axis.
    pub mark_count: usize,
    /// Draggable templates.
    pub catalog: Vec<BlockTemplate>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            owner: "Adam".to_string(),
            day_start_minute: DEFAULT_DAY_START_MINUTE,
            mark_count: DEFAULT_MARK_COUNT,
            catalog: default_catalog(),
        }
    }
}

impl PlannerConfig {
    /// Loads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(
            path = %path.display(),
            blocks = config.catalog.len(),
            marks = config.mark_count,
            "config loaded"
        );
        Ok(config)
    }

    /// Parses and validates a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Sets the owner name.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// The time axis described by this config.
    pub fn grid(&self) -> Result<TimeGrid, GridError> {
        TimeGrid::new(TimeMark::from_minutes(self.day_start_minute), self.mark_count)
    }
}
