//! User settings, read from a JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) yields
//! the hard-coded values the demos were written with.

use std::path::{Path, PathBuf};

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::{camera::Projection, lighting::DirectionalLight};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "glsteps".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    /// RGBA clear color.
    pub clear_color: Vec4,
    pub projection: Projection,
    /// How far in front of the camera the model is placed.
    pub camera_distance: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub light: DirectionalLight,
    /// Load shader sources from this directory instead of the built-in copies.
    pub shader_dir: Option<PathBuf>,
    /// Image used by the textured stages.
    pub texture: Option<PathBuf>,
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            projection: Projection::default(),
            camera_distance: 6.0,
            rotation_speed: 1.0,
            light: DirectionalLight::default(),
            shader_dir: None,
            texture: None,
            log_level: None,
        }
    }
}

impl Settings {
    /// `<config dir>/glsteps/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glsteps").join(SETTINGS_FILE_NAME))
    }

    pub fn from_json(s: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(s).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, path)
    }

    /// Reads the explicitly requested file, otherwise the default file when it
    /// exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Loading settings from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| {
            Err(SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width and height must be positive");
        }
        let fov = self.projection.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return invalid("projection.fov_degrees", "must be between 0 and 180 degrees");
        }
        if !(self.projection.near > 0.0 && self.projection.near < self.projection.far) {
            return invalid("projection", "expected 0 < near < far");
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return invalid("camera_distance", "must be positive and finite");
        }
        if !self.rotation_speed.is_finite() {
            return invalid("rotation_speed", "must be finite");
        }
        let direction = self.light.direction;
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return invalid("light.direction", "must be a finite, non-zero vector");
        }
        Ok(())
    }
}
