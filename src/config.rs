//! Viewport configuration: zoom limits, wheel response and grid style.
//!
//! Defaults come from [`crate::consts`]. Hosts may override them from
//! environment variables ([`ViewportConfig::from_env`]) or deserialize a
//! config block from JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ScaleLimits;
use crate::consts::{GRID_BASE_GAP_PX, MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_INTENSITY};
use crate::sync::GridStyle;

pub const ENV_MIN_SCALE: &str = "VIEWPORT_MIN_SCALE";
pub const ENV_MAX_SCALE: &str = "VIEWPORT_MAX_SCALE";
pub const ENV_WHEEL_INTENSITY: &str = "VIEWPORT_WHEEL_INTENSITY";
pub const ENV_GRID_GAP: &str = "VIEWPORT_GRID_GAP";

/// Error returned when a configuration value is malformed or out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The raw value for `key` could not be parsed as a number.
    #[error("invalid value for {key}: {value:?}")]
    Parse { key: String, value: String },
    /// A field that must be finite and strictly positive is not.
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// The minimum scale exceeds the maximum scale.
    #[error("min_scale {min} exceeds max_scale {max}")]
    InvertedLimits { min: f64, max: f64 },
}

/// Values set explicitly by the host; `None` keeps the base config's value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigOverrides {
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub wheel_intensity: Option<f64>,
    pub grid_gap: Option<f64>,
}

/// Tunables for the viewport controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplier applied to wheel deltas before exponentiation.
    pub wheel_intensity: f64,
    pub grid: GridStyle,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_intensity: WHEEL_ZOOM_INTENSITY,
            grid: GridStyle::default(),
        }
    }
}

impl ViewportConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `VIEWPORT_MIN_SCALE`: default 0.1
    /// - `VIEWPORT_MAX_SCALE`: default 10
    /// - `VIEWPORT_WHEEL_INTENSITY`: default 0.0065
    /// - `VIEWPORT_GRID_GAP`: default 100 (CSS pixels at scale 1)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but unparsable, or the
    /// resulting config fails [`ViewportConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup (environment, test map, ...).
    ///
    /// # Errors
    ///
    /// Same as [`ViewportConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let grid = GridStyle { base_gap: parse_f64(&lookup, ENV_GRID_GAP, GRID_BASE_GAP_PX)?, ..GridStyle::default() };

        let config = Self {
            min_scale: parse_f64(&lookup, ENV_MIN_SCALE, MIN_SCALE)?,
            max_scale: parse_f64(&lookup, ENV_MAX_SCALE, MAX_SCALE)?,
            wheel_intensity: parse_f64(&lookup, ENV_WHEEL_INTENSITY, WHEEL_ZOOM_INTENSITY)?,
            grid,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that limits are positive and ordered and the grid gap is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("min_scale", self.min_scale)?;
        require_positive("max_scale", self.max_scale)?;
        require_positive("wheel_intensity", self.wheel_intensity)?;
        require_positive("grid.base_gap", self.grid.base_gap)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedLimits { min: self.min_scale, max: self.max_scale });
        }
        Ok(())
    }

    /// The configured scale limits, ordered even if the config was never
    /// validated.
    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }

    /// Overlay explicitly set values (e.g. command-line flags) and revalidate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the merged config fails
    /// [`ViewportConfig::validate`].
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(min) = overrides.min_scale {
            self.min_scale = min;
        }
        if let Some(max) = overrides.max_scale {
            self.max_scale = max;
        }
        if let Some(intensity) = overrides.wheel_intensity {
            self.wheel_intensity = intensity;
        }
        if let Some(gap) = overrides.grid_gap {
            self.grid.base_gap = gap;
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Parse { key: key.to_string(), value: raw }),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
