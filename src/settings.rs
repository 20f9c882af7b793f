//! Editor settings.
//!
//! Stored as JSON at `<config dir>/linkboard/settings.json`. Every field has
//! a default, so partial files (and files from older versions) load fine.

use crate::constants::{
    DOUBLE_TAP_WINDOW_MS, DRAG_START_DELAY_MS, DRAG_START_DISTANCE, TAP_MAX_DURATION_MS,
    TAP_MAX_MOVEMENT, WHEEL_ZOOM_SPEED,
};
use crate::measure::EstimatedMeasurer;
use crate::render::OverlayOffsets;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Timing and distance thresholds of the gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub drag_start_distance: f32,
    pub drag_start_delay_ms: u64,
    pub tap_max_duration_ms: u64,
    pub tap_max_movement: f32,
    pub double_tap_window_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            drag_start_distance: DRAG_START_DISTANCE,
            drag_start_delay_ms: DRAG_START_DELAY_MS,
            tap_max_duration_ms: TAP_MAX_DURATION_MS,
            tap_max_movement: TAP_MAX_MOVEMENT,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
        }
    }
}

/// Labels given to freshly created nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub root: String,
    pub new_node: String,
    pub new_child: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            root: "Main Topic".to_string(),
            new_node: "New Topic".to_string(),
            new_child: "New Node".to_string(),
        }
    }
}

/// Metrics for the built-in text measurer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
    /// Width the person-card details text wraps at
    pub details_wrap_width: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            details_wrap_width: 200.0,
        }
    }
}

impl TextMetrics {
    pub fn measurer(&self) -> EstimatedMeasurer {
        EstimatedMeasurer {
            char_width: self.char_width,
            line_height: self.line_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub wheel_zoom_speed: f32,
    pub gestures: GestureSettings,
    pub overlays: OverlayOffsets,
    pub labels: LabelSettings,
    pub text: TextMetrics,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            wheel_zoom_speed: WHEEL_ZOOM_SPEED,
            gestures: GestureSettings::default(),
            overlays: OverlayOffsets::default(),
            labels: LabelSettings::default(),
            text: TextMetrics::default(),
        }
    }
}

/// `<config dir>/linkboard/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linkboard").join("settings.json"))
}

impl EditorSettings {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
        Ok(())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        let path = default_settings_path().context("no config directory on this platform")?;
        self.save_to(&path)
    }
}
