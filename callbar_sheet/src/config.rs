// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for settling, animation and the scrim.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a [`SheetConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A threshold or scale factor was out of range or not finite.
    #[error("{field} is out of range: {value}")]
    InvalidThreshold {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A duration or time window was zero.
    #[error("{field} must be at least 1 ms")]
    InvalidDuration {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The scrim opacity was outside `[0, 1]`.
    #[error("scrim opacity must be within [0, 1], got {0}")]
    InvalidOpacity(f64),
    /// The document could not be parsed.
    #[error("invalid sheet configuration document: {0}")]
    Json(serde_json::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Sheet tunables. Every field has a default, so partial documents are
/// accepted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Release speed, in density-independent units per second, above which
    /// the sheet follows the direction of travel instead of the nearest anchor.
    pub velocity_threshold: f64,
    /// Pixels per density-independent unit.
    pub density: f64,
    /// Fraction of the gap to a neighbouring anchor that must be crossed to
    /// leave the anchor the sheet rests on. `0.5` picks the nearest anchor.
    pub positional_threshold: f64,
    /// Duration of a full-span settle animation.
    pub animation_duration_ms: u64,
    /// Opacity of the scrim when fully shown.
    pub scrim_opacity: f64,
    /// How far back release velocity is estimated from.
    pub velocity_window_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 125.0,
            density: 1.0,
            positional_threshold: 0.5,
            animation_duration_ms: 300,
            scrim_opacity: 0.32,
            velocity_window_ms: 100,
        }
    }
}

impl SheetConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Checks every tunable is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let result = self.check();
        if let Err(err) = &result {
            log::warn!("rejecting sheet configuration: {err}");
        }
        result
    }

    fn check(self) -> Result<Self, ConfigError> {
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "velocity_threshold",
                value: self.velocity_threshold,
            });
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "density",
                value: self.density,
            });
        }
        if !(self.positional_threshold > 0.0 && self.positional_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold {
                field: "positional_threshold",
                value: self.positional_threshold,
            });
        }
        if self.animation_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "animation_duration_ms",
            });
        }
        if self.velocity_window_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "velocity_window_ms",
            });
        }
        if !(0.0..=1.0).contains(&self.scrim_opacity) {
            return Err(ConfigError::InvalidOpacity(self.scrim_opacity));
        }
        Ok(self)
    }

    /// Release speed threshold in pixels per second.
    #[must_use]
    pub fn velocity_threshold_px(&self) -> f64 {
        self.velocity_threshold * self.density
    }
}
