//! Preview and export settings.
//!
//! Templates persist only the page-facing part of this struct; the editor
//! overlays (`show_crop_guides`, `show_safe_area`) stay local.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub theme: String,
    pub background_color: String,
    pub accent_color: String,
    pub show_hotkeys: bool,
    pub show_stats: bool,
    /// Raster scale factor handed to the screenshot exporter.
    pub export_scale: f64,

    // Editor overlays, never exported
    pub show_crop_guides: bool,
    pub show_safe_area: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            background_color: "#0f172a".into(),
            accent_color: "#facc15".into(),
            show_hotkeys: true,
            show_stats: true,
            export_scale: 2.0,
            show_crop_guides: false,
            show_safe_area: false,
        }
    }
}

impl DisplaySettings {
    /// Export scale clamped to what the screenshot exporter accepts.
    pub fn effective_export_scale(&self) -> f64 {
        if self.export_scale.is_finite() {
            self.export_scale.clamp(0.5, 4.0)
        } else {
            1.0
        }
    }
}
