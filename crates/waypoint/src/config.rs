#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! Every field has a default that matches the stock tooltip geometry, so
//! `TourConfig::default()` needs no tuning.
//!
//! # Environment
//!
//! - `WAYPOINT_TOOLTIP_GAP`: px between anchor edge and tooltip edge (0–200)
//! - `WAYPOINT_TOOLTIP_WIDTH` / `WAYPOINT_TOOLTIP_HEIGHT`: fallback tooltip size (1–4096)
//! - `WAYPOINT_KEEP_IN_VIEWPORT`: `1`/`true` clamps anchored tooltips to the viewport
//! - `WAYPOINT_NOTIFY`: `0`/`false` silences start/end notices
//!
//! With the `config-file` feature the same fields load from TOML or JSON:
//!
//! ```toml
//! gap = 12.0
//! keep_in_viewport = true
//!
//! [tooltip_size]
//! width = 280.0
//! height = 140.0
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;

use waypoint_core::Size;

#[cfg(feature = "config-file")]
use crate::error::ConfigError;

pub const DEFAULT_GAP: f64 = 10.0;
pub const MAX_GAP: f64 = 200.0;
pub const DEFAULT_TOOLTIP_SIZE: Size = Size::new(320.0, 180.0);
pub const MIN_TOOLTIP_EDGE: f64 = 1.0;
pub const MAX_TOOLTIP_EDGE: f64 = 4096.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct TourConfig {
    /// Distance between the anchor edge and the facing tooltip edge.
    pub gap: f64,
    /// Tooltip size assumed until presentation measures the real one.
    pub tooltip_size: Size,
    /// Clamp anchored placements inside the viewport.
    pub keep_in_viewport: bool,
    /// Send start/end notices to the notifier port.
    pub notifications: bool,
    pub started_message: String,
    pub ended_message: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            tooltip_size: DEFAULT_TOOLTIP_SIZE,
            keep_in_viewport: false,
            notifications: true,
            started_message: "Tour started".to_string(),
            ended_message: "Tour ended".to_string(),
        }
    }
}

impl TourConfig {
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_tooltip_size(mut self, size: Size) -> Self {
        self.tooltip_size = size;
        self
    }

    #[must_use]
    pub fn keep_in_viewport(mut self, keep: bool) -> Self {
        self.keep_in_viewport = keep;
        self
    }

    #[must_use]
    pub fn notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    /// Load config from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load config using a custom environment lookup (for tests).
    ///
    /// Unparseable values are ignored; parsed values are clamped.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let number = |key: &str| get_env(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(gap) = number("WAYPOINT_TOOLTIP_GAP") {
            config.gap = gap;
        }
        if let Some(width) = number("WAYPOINT_TOOLTIP_WIDTH") {
            config.tooltip_size.width = width;
        }
        if let Some(height) = number("WAYPOINT_TOOLTIP_HEIGHT") {
            config.tooltip_size.height = height;
        }
        if let Some(flag) = get_env("WAYPOINT_KEEP_IN_VIEWPORT").and_then(|v| parse_flag(&v)) {
            config.keep_in_viewport = flag;
        }
        if let Some(flag) = get_env("WAYPOINT_NOTIFY").and_then(|v| parse_flag(&v)) {
            config.notifications = flag;
        }

        config.validated()
    }

    /// Clamp values to their valid ranges.
    ///
    /// - `gap` to `0..=200` (non-finite becomes the default)
    /// - each tooltip dimension to `1..=4096`
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.gap = if self.gap.is_finite() {
            self.gap.clamp(0.0, MAX_GAP)
        } else {
            DEFAULT_GAP
        };
        self.tooltip_size = self
            .tooltip_size
            .clamped(MIN_TOOLTIP_EDGE, MAX_TOOLTIP_EDGE);
        self
    }

    /// Check every field is in range. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.gap.is_finite() || !(0.0..=MAX_GAP).contains(&self.gap) {
            errors.push(format!("gap must be in [0, {MAX_GAP}], got {}", self.gap));
        }
        for (name, value) in [
            ("tooltip_size.width", self.tooltip_size.width),
            ("tooltip_size.height", self.tooltip_size.height),
        ] {
            if !value.is_finite() || !(MIN_TOOLTIP_EDGE..=MAX_TOOLTIP_EDGE).contains(&value) {
                errors.push(format!(
                    "{name} must be in [{MIN_TOOLTIP_EDGE}, {MAX_TOOLTIP_EDGE}], got {value}"
                ));
            }
        }
        errors
    }

    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-file")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let v = value.trim();
    if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}
