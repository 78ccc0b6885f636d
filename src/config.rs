//! Geometry constants and persisted user settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_KEY: &str = "cp_settings";

/// Pixel constants for plotting, hit-testing and labels. All lengths are at
/// zoom 1 and scale with the viewport zoom when drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    /// Margin kept free on every side when fitting points to the canvas.
    pub padding: f64,
    pub point_radius: f64,
    /// Tolerance for clicks on a point body.
    pub hit_radius: f64,
    pub font_px: f64,
    /// Name label position relative to its point.
    pub label_dx: f64,
    pub label_dy: f64,
    pub line_width: f64,
    pub label_padding: f64,
    /// Perpendicular distance of a distance label from its segment.
    pub distance_label_offset: f64,
    /// Height of an angle label above its vertex.
    pub angle_label_rise: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Movement below which a pointer press still counts as a click.
    pub pan_threshold: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            point_radius: 7.0,
            hit_radius: 15.0,
            font_px: 12.0,
            label_dx: 15.0,
            label_dy: -10.0,
            line_width: 2.0,
            label_padding: 3.0,
            distance_label_offset: 15.0,
            angle_label_rise: 20.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            zoom_min: 0.1,
            zoom_max: 5.0,
            pan_threshold: 5.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("local storage unavailable")]
    NoStorage,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences kept in `localStorage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Suffix appended to distances.
    pub unit: String,
    /// Return to pan 0 / zoom 1 whenever a new point set is plotted.
    pub reset_view_on_plot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: "m".to_string(),
            reset_view_on_plot: false,
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    fn storage() -> Result<web_sys::Storage, SettingsError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or(SettingsError::NoStorage)
    }

    pub fn load() -> Result<Self, SettingsError> {
        let store = Self::storage()?;
        match store
            .get_item(SETTINGS_KEY)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))?
        {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let store = Self::storage()?;
        store
            .set_item(SETTINGS_KEY, &self.to_json()?)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))
    }

    /// Loads settings, falling back to defaults when storage is missing or
    /// holds something unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Self::default()
            }
        }
    }
}
