// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration: the polled config store seam and a serde-backed [`Settings`].
//!
//! The coordinator never subscribes to configuration changes. It polls a
//! [`ConfigStore`] on every trigger and every scheduler tick, so toggling multi
//! mode off in the store is picked up (and merged) on the next evaluation.
//!
//! # Loading
//!
//! ```toml
//! multi_container_mode = true
//! auto_hide = true
//! auto_hide_delay_secs = 1.5
//!
//! [container]
//! width = 300.0
//! height = 340.0
//!
//! [motion]
//! conceal_scale = 0.8
//! ```
//!
//! ```rust
//! use dropshelf_coordinator::config::{ConfigStore, Settings};
//!
//! let settings = Settings::from_toml_str("multi_container_mode = true\nauto_hide_delay_secs = 2.0").unwrap();
//! assert!(settings.multi_container_mode_enabled());
//! assert_eq!(settings.auto_hide_delay_seconds(), 2.0);
//! ```
//!
//! # Defaults
//!
//! Every field has a default, so an empty document yields [`Settings::default`].

use std::path::Path;
use std::time::Duration;

use dropshelf_surface::{HidePolicy, Motion};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),
    /// The JSON document could not be parsed.
    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
    /// The settings file could not be read.
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    /// A value parsed but is out of range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Geometry and timing knobs that shape containers and the scheduler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Size of a newly created container. Also the width of a reveal slot.
    pub container_size: Size,
    /// Gap between side-by-side reveal slots.
    pub slot_spacing: f64,
    /// Number of accent colors in the host palette.
    pub palette_size: u8,
    /// Animation timing.
    pub motion: Motion,
    /// Scheduler tick interval.
    pub tick_interval: Duration,
}

impl Default for Layout {
    fn default() -> Self {
        Settings::default().layout()
    }
}

/// Read-only, polled configuration.
pub trait ConfigStore {
    /// Whether multiple containers may coexist.
    fn multi_container_mode_enabled(&self) -> bool;

    /// Whether idle containers hide themselves.
    fn auto_hide_enabled(&self) -> bool;

    /// Auto-hide delay in seconds.
    fn auto_hide_delay_seconds(&self) -> f64;

    /// Geometry and timing. Defaults to [`Layout::default`].
    fn layout(&self) -> Layout {
        Layout::default()
    }

    /// Auto-hide policy derived from the two auto-hide settings. Negative or
    /// non-finite delays are treated as zero.
    fn hide_policy(&self) -> HidePolicy {
        HidePolicy {
            enabled: self.auto_hide_enabled(),
            delay: Duration::try_from_secs_f64(self.auto_hide_delay_seconds())
                .unwrap_or(Duration::ZERO),
        }
    }
}

/// Container dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
    /// Gap between side-by-side reveal slots.
    pub slot_spacing: f64,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 320.0,
            slot_spacing: 16.0,
        }
    }
}

/// Animation timing.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Reveal duration in milliseconds.
    pub reveal_ms: u64,
    /// Conceal duration in milliseconds.
    pub conceal_ms: u64,
    /// Scale reached while concealing.
    pub conceal_scale: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            reveal_ms: 250,
            conceal_ms: 200,
            conceal_scale: 0.85,
        }
    }
}

/// Serde-backed settings implementing [`ConfigStore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Allow several containers at once.
    pub multi_container_mode: bool,
    /// Hide idle containers automatically.
    pub auto_hide: bool,
    /// Auto-hide delay in seconds.
    pub auto_hide_delay_secs: f64,
    /// Scheduler tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Number of accent colors.
    pub palette_size: u8,
    /// Container dimensions.
    pub container: ContainerSettings,
    /// Animation timing.
    pub motion: MotionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            multi_container_mode: false,
            auto_hide: true,
            auto_hide_delay_secs: 1.0,
            tick_interval_ms: 200,
            palette_size: 8,
            container: ContainerSettings::default(),
            motion: MotionSettings::default(),
        }
    }
}

impl Settings {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.auto_hide_delay_secs.is_finite() || self.auto_hide_delay_secs < 0.0 {
            return Err(ConfigError::Invalid {
                field: "auto_hide_delay_secs",
                reason: "must be a finite, non-negative number of seconds",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be positive",
            });
        }
        if self.palette_size == 0 {
            return Err(ConfigError::Invalid {
                field: "palette_size",
                reason: "must be positive",
            });
        }
        if !(self.container.width > 0.0 && self.container.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "container",
                reason: "width and height must be positive",
            });
        }
        if self.container.slot_spacing.is_nan() || self.container.slot_spacing < 0.0 {
            return Err(ConfigError::Invalid {
                field: "container.slot_spacing",
                reason: "must be non-negative",
            });
        }
        Ok(())
    }
}

impl ConfigStore for Settings {
    fn multi_container_mode_enabled(&self) -> bool {
        self.multi_container_mode
    }

    fn auto_hide_enabled(&self) -> bool {
        self.auto_hide
    }

    fn auto_hide_delay_seconds(&self) -> f64 {
        self.auto_hide_delay_secs
    }

    fn layout(&self) -> Layout {
        Layout {
            container_size: Size::new(self.container.width, self.container.height),
            slot_spacing: self.container.slot_spacing,
            palette_size: self.palette_size,
            motion: Motion {
                reveal: Duration::from_millis(self.motion.reveal_ms),
                conceal: Duration::from_millis(self.motion.conceal_ms),
                conceal_scale: self.motion.conceal_scale,
            },
            tick_interval: Duration::from_millis(self.tick_interval_ms),
        }
    }
}
