//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FridgeError, FridgeResult};

/// Environment variable holding the prediction API key.
///
/// The key is a secret and is never read from the config file.
pub const PREDICTION_KEY_ENV: &str = "PRED_KEY";

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of frames captured per action phase.
    /// An upload must carry exactly twice this many frames.
    pub frames_per_action: usize,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// External classification service settings.
    pub classifiers: ClassifiersConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
}

/// Settings for the two external classifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiersConfig {
    /// Base URL of the prediction endpoint.
    pub endpoint: String,

    /// Binary item-in-hand classifier (labels: Empty / Non-empty).
    pub occupancy: ClassifierTarget,

    /// Food identity classifier (open label vocabulary).
    pub food: ClassifierTarget,
}

/// Identifies one trained classifier iteration on the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierTarget {
    /// Project GUID on the prediction service.
    pub project_id: String,

    /// Published iteration name to query.
    pub iteration_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "fridgewatch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frames_per_action: 5,
            server: ServerConfig { port: 3000 },
            classifiers: ClassifiersConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ClassifiersConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nvdfridge-prediction.cognitiveservices.azure.com".to_string(),
            occupancy: ClassifierTarget {
                project_id: "38cfb8e8-1637-4159-bd63-a51a33f010dc".to_string(),
                iteration_name: "Iteration1".to_string(),
            },
            food: ClassifierTarget {
                project_id: "9cbf7b7d-2aaf-4bd9-a24e-9ded611d4784".to_string(),
                iteration_name: "Iteration3".to_string(),
            },
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file, falling back to defaults when the file
    /// is absent.
    pub fn load(path: Option<&Path>) -> FridgeResult<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    FridgeError::config(format!("failed to read config at {path:?}: {e}"))
                })?;
                let config: Self = serde_json::from_str(&content).map_err(|e| {
                    FridgeError::config(format!("failed to parse config at {path:?}: {e}"))
                })?;
                config.validate()?;
                Ok(config)
            }
            None => {
                tracing::debug!("No config path given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> FridgeResult<()> {
        if self.frames_per_action == 0 {
            return Err(FridgeError::config("frames_per_action must be positive"));
        }
        if self.classifiers.endpoint.is_empty() {
            return Err(FridgeError::config("classifier endpoint must not be empty"));
        }
        Ok(())
    }

    /// Read the prediction key from the environment.
    pub fn prediction_key() -> FridgeResult<String> {
        std::env::var(PREDICTION_KEY_ENV)
            .map_err(|_| FridgeError::config(format!("{PREDICTION_KEY_ENV} is not set")))
    }
}
