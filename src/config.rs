//! Tunable settings for a plotting session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::DEFAULT_GRID_DIVISIONS;
use crate::error::ConfigError;
use crate::line::Line;
use crate::view::{ViewLimits, ViewRect};

/// Configuration for a [`Session`](crate::session::Session).
///
/// Missing fields in a JSON file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Rectangle shown at startup and after a view reset.
    pub default_view: ViewRect,
    /// Smallest zoom scale (most zoomed out).
    pub min_scale: f64,
    /// Largest zoom scale (most zoomed in).
    pub max_scale: f64,
    /// Largest allowed distance of the view center from the origin.
    pub max_center: f64,
    /// Grid divisions along the longer side of the view, at most
    /// [`MAX_GRID_DIVISIONS`](crate::axis::MAX_GRID_DIVISIONS).
    pub grid_divisions: u32,
    /// Factor applied by the zoom in/out buttons.
    pub zoom_step: f64,
    /// Factor applied per wheel notch scrolling up.
    pub wheel_zoom_in: f64,
    /// Factor applied per wheel notch scrolling down.
    pub wheel_zoom_out: f64,
    /// Pixel distance a press must travel before it pans.
    pub drag_threshold_px: f32,
    /// Exported image width in pixels.
    pub export_width: u32,
    /// Exported image height in pixels.
    pub export_height: u32,
    /// Lines loaded at startup and after a full reset.
    pub default_lines: [Line; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            default_view: ViewRect::default(),
            min_scale: 0.01,
            max_scale: 200.0,
            max_center: 1e6,
            grid_divisions: DEFAULT_GRID_DIVISIONS,
            zoom_step: 1.2,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            drag_threshold_px: 4.0,
            export_width: 1600,
            export_height: 1600,
            default_lines: [Line::new(2.0, 3.0, 6.0), Line::new(1.0, -1.0, 2.0)],
        }
    }
}

impl PlotConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Zoom and pan bounds for the viewport.
    pub fn limits(&self) -> ViewLimits {
        ViewLimits {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            max_center: self.max_center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PlotConfig::from_json(r#"{ "zoom_step": 1.5, "export_width": 640 }"#).unwrap();
        assert_eq!(config.zoom_step, 1.5);
        assert_eq!(config.export_width, 640);
        assert_eq!(config.export_height, 1600);
        assert_eq!(config.default_view, ViewRect::default());
    }

    #[test]
    fn lines_deserialize_from_coefficients() {
        let config = PlotConfig::from_json(
            r#"{ "default_lines": [{ "a": 1, "b": 1, "c": 8 }, { "a": 2, "b": -1, "c": 1 }] }"#,
        )
        .unwrap();
        assert_eq!(config.default_lines[0], Line::new(1.0, 1.0, 8.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            PlotConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn oversized_grid_is_clamped_when_rendering() {
        let config = PlotConfig::from_json(r#"{ "grid_divisions": 4000000000 }"#).unwrap();
        let session = crate::session::Session::builder().config(config).build();
        assert_eq!(
            session.render_payload().grid.divisions,
            crate::axis::MAX_GRID_DIVISIONS
        );
    }
}
