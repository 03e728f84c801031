//! Snapshots of the session and PNG/JSON export.
//!
//! A [`Snapshot`] is an owned copy of the state a picture needs. Export works
//! from the snapshot only, so edits made while an export runs on a worker
//! thread cannot change the image being written.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::PlotConfig;
use crate::error::ExportError;
use crate::geom::ScreenSize;
use crate::line::Line;
use crate::render::raster::rasterize;
use crate::render::{RenderPayload, build_render_list};
use crate::style::Theme;
use crate::view::Viewport;

/// Largest accepted export side, in pixels.
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// Surface width the default theme sizes are tuned for.
const THEME_REFERENCE_WIDTH: f32 = 800.0;

/// Everything needed to redraw the current picture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Visible rectangle and zoom state.
    pub viewport: Viewport,
    /// First equation.
    pub line1: Line,
    /// Second equation.
    pub line2: Line,
}

/// Output settings for a raster export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Grid divisions along the longer side.
    pub grid_divisions: u32,
    /// Theme before scaling to the output size.
    pub theme: Theme,
}

impl ExportOptions {
    /// Options taken from a session configuration.
    pub fn from_config(config: &PlotConfig, theme: Theme) -> Self {
        Self {
            width: config.export_width,
            height: config.export_height,
            grid_divisions: config.grid_divisions,
            theme,
        }
    }

    /// Override the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn validate(&self) -> Result<(), ExportError> {
        let valid = |side: u32| side > 0 && side <= MAX_EXPORT_SIDE;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&PlotConfig::default(), Theme::default())
    }
}

impl Snapshot {
    /// Both lines, first to second.
    pub fn lines(&self) -> [Line; 2] {
        [self.line1, self.line2]
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot from JSON.
    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the JSON form to a file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Render the snapshot to an image with a solid background.
    ///
    /// Stroke widths and marker sizes scale with the output width.
    pub fn render_image(&self, options: &ExportOptions) -> Result<RgbaImage, ExportError> {
        options.validate()?;
        let screen = ScreenSize::new(options.width as f32, options.height as f32);
        let theme = options
            .theme
            .scaled(options.width as f32 / THEME_REFERENCE_WIDTH);
        let payload = RenderPayload::build(&self.lines(), &self.viewport, options.grid_divisions);
        let list = build_render_list(&payload, screen, &theme);
        Ok(rasterize(&list, options.width, options.height, theme.background))
    }

    /// Render and write a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>, options: &ExportOptions) -> Result<(), ExportError> {
        let path = path.as_ref();
        let image = self.render_image(options)?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!(
            path = %path.display(),
            width = options.width,
            height = options.height,
            "exported image"
        );
        Ok(())
    }

    /// Render and write a PNG on a worker thread.
    ///
    /// The snapshot is moved into the worker; join with [`finish_export`].
    pub fn spawn_png_export(
        self,
        path: PathBuf,
        options: ExportOptions,
    ) -> JoinHandle<Result<(), ExportError>> {
        thread::spawn(move || self.save_png(&path, &options))
    }
}

/// Wait for a worker started by [`Snapshot::spawn_png_export`].
pub fn finish_export(handle: JoinHandle<Result<(), ExportError>>) -> Result<(), ExportError> {
    handle.join().map_err(|_| ExportError::WorkerPanicked)?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            viewport: Viewport::default(),
            line1: Line::new(1.0, 1.0, 8.0),
            line2: Line::new(2.0, -1.0, 1.0),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("linsys-{}-{name}", std::process::id()))
    }

    #[test]
    fn json_restores_snapshot() {
        let original = snapshot();
        let text = original.to_json().unwrap();
        assert!(text.contains("line1"));
        assert_eq!(Snapshot::from_json(&text).unwrap(), original);
    }

    #[test]
    fn image_has_requested_size_and_background() {
        let options = ExportOptions::default().with_size(120, 90);
        let image = snapshot().render_image(&options).unwrap();
        assert_eq!(image.dimensions(), (120, 90));
        // Top-left corner is away from every grid line and label at this size.
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn zero_size_is_rejected() {
        let options = ExportOptions::default().with_size(0, 100);
        assert!(matches!(
            snapshot().render_image(&options),
            Err(ExportError::InvalidSize { width: 0, height: 100 })
        ));
    }

    #[test]
    fn worker_writes_png() {
        let path = temp_path("worker.png");
        let handle = snapshot().spawn_png_export(path.clone(), ExportOptions::default().with_size(64, 64));
        finish_export(handle).unwrap();
        let image = image::open(&path).unwrap();
        assert_eq!((image.width(), image.height()), (64, 64));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_viewport_in_json_is_rejected() {
        let text = snapshot().to_json().unwrap();
        assert!(Snapshot::from_json(&text).is_ok());

        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["viewport"]["rect"]["width"] = serde_json::json!(0.0);
        let err = Snapshot::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
        assert!(err.to_string().contains("positive size"), "{err}");
    }
}
