//! TOML configuration for camera, controller and logging.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration:
//!
//! ```toml
//! [logging]
//! filter = "lumen_engine=debug"
//! color = "never"
//!
//! [camera]
//! sensitivity = 4.0
//! max_fov = 70.0
//!
//! [controller]
//! move_speed = 5.0
//! pointer_source = "cursor"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraConfig, CameraConfigError, ControllerConfig};
use crate::logging::LoggingConfig;

/// Terminal coloring for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for env_logger::WriteStyle {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => env_logger::WriteStyle::Auto,
            ColorChoice::Always => env_logger::WriteStyle::Always,
            ColorChoice::Never => env_logger::WriteStyle::Never,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingFileConfig {
    /// `env_logger` filter string. Unset falls back to `RUST_LOG`.
    pub filter: Option<String>,
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub logging: LoggingFileConfig,
    pub camera: CameraConfig,
    pub controller: ControllerConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid camera config")]
    Camera(#[from] CameraConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load(path).with_context(|| format!("loading {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the camera or controller cannot honor, including
    /// `nan` and `inf`, which TOML accepts as floats.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;

        let ctl = &self.controller;
        for (field, value) in [("move_speed", ctl.move_speed), ("zoom_speed", ctl.zoom_speed)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "controller.{field} must be finite and non-negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.logging.filter.clone(),
            write_style: self.logging.color.into(),
        }
    }
}
