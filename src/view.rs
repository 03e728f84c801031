//! The visible world rectangle and its pan/zoom state.

use serde::{Deserialize, Serialize};

use crate::error::ViewportError;
use crate::geom::{Point, ScreenPoint, ScreenSize};
use crate::transform::Transform;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies in the range, widened by `tolerance`.
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// An axis-aligned world rectangle given by its lower-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    /// Smallest visible x.
    pub origin_x: f64,
    /// Smallest visible y.
    pub origin_y: f64,
    /// Visible width in world units.
    pub width: f64,
    /// Visible height in world units.
    pub height: f64,
}

impl ViewRect {
    /// Create a rectangle from its lower-left corner and size.
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Positive, finite size and a finite origin.
    pub fn is_valid(&self) -> bool {
        self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Horizontal extent (`left..=right`).
    pub fn x_range(&self) -> Range {
        Range::new(self.origin_x, self.origin_x + self.width)
    }

    /// Vertical extent (`bottom..=top`).
    pub fn y_range(&self) -> Range {
        Range::new(self.origin_y, self.origin_y + self.height)
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin_x + self.width * 0.5,
            self.origin_y + self.height * 0.5,
        )
    }

    /// Check whether a world point lies inside (edges included).
    pub fn contains(&self, point: Point) -> bool {
        self.x_range().contains(point.x, 0.0) && self.y_range().contains(point.y, 0.0)
    }
}

impl Default for ViewRect {
    /// `[-9, 9] x [-9, 9]`: one grid cell per unit with 18 divisions.
    fn default() -> Self {
        Self::new(-9.0, -9.0, 18.0, 18.0)
    }
}

/// Bounds that pan and zoom are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewLimits {
    /// Smallest allowed scale (most zoomed out).
    pub min_scale: f64,
    /// Largest allowed scale (most zoomed in).
    pub max_scale: f64,
    /// Largest allowed distance of the view center from the world origin, per axis.
    pub max_center: f64,
}

impl ViewLimits {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let valid = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= 1.0
            && self.max_scale >= 1.0;
        let mut limits = if valid { self } else { defaults };
        if !(self.max_center.is_finite() && self.max_center > 0.0) {
            limits.max_center = defaults.max_center;
        }
        limits
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.01,
            max_scale: 200.0,
            max_center: 1e6,
        }
    }
}

/// The visible world rectangle plus zoom bookkeeping.
///
/// The rectangle already reflects the zoom; `scale` is how far the view is
/// zoomed relative to its home rectangle and is kept inside
/// `[min_scale, max_scale]`. Every mutation keeps width and height positive.
///
/// Deserialization checks the same bounds and rejects states that no
/// sequence of pans and zooms could reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportState")]
pub struct Viewport {
    rect: ViewRect,
    scale: f64,
    home: ViewRect,
    limits: ViewLimits,
}

/// Unchecked serialized form of a [`Viewport`].
#[derive(Deserialize)]
struct ViewportState {
    rect: ViewRect,
    scale: f64,
    home: ViewRect,
    limits: ViewLimits,
}

impl TryFrom<ViewportState> for Viewport {
    type Error = ViewportError;

    fn try_from(state: ViewportState) -> Result<Self, Self::Error> {
        if !state.rect.is_valid() {
            return Err(ViewportError::InvalidRect(state.rect));
        }
        if !state.home.is_valid() {
            return Err(ViewportError::InvalidRect(state.home));
        }
        if state.limits.sanitized() != state.limits {
            return Err(ViewportError::InvalidLimits(state.limits));
        }
        let limits = state.limits;
        if !(state.scale >= limits.min_scale && state.scale <= limits.max_scale) {
            return Err(ViewportError::ScaleOutOfRange {
                scale: state.scale,
                min: limits.min_scale,
                max: limits.max_scale,
            });
        }
        Ok(Self {
            rect: state.rect,
            scale: state.scale,
            home: state.home,
            limits,
        })
    }
}

impl Viewport {
    /// Create a viewport showing `home` at scale 1.
    ///
    /// An invalid home rectangle falls back to [`ViewRect::default`]; scale
    /// limits that do not bracket 1 fall back to [`ViewLimits::default`].
    pub fn new(home: ViewRect, limits: ViewLimits) -> Self {
        let home = if home.is_valid() {
            home
        } else {
            tracing::warn!(?home, "invalid home view rectangle, using default");
            ViewRect::default()
        };
        Self {
            rect: home,
            scale: 1.0,
            home,
            limits: limits.sanitized(),
        }
    }

    /// The current visible rectangle.
    pub fn rect(&self) -> ViewRect {
        self.rect
    }

    /// The rectangle restored by [`Viewport::reset`].
    pub fn home(&self) -> ViewRect {
        self.home
    }

    /// Current zoom scale (1 at home).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Clamp bounds.
    pub fn limits(&self) -> ViewLimits {
        self.limits
    }

    /// Visible x extent.
    pub fn x_range(&self) -> Range {
        self.rect.x_range()
    }

    /// Visible y extent.
    pub fn y_range(&self) -> Range {
        self.rect.y_range()
    }

    /// Check whether a world point is visible.
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// Transform for a surface of the given size. `None` for an empty surface.
    pub fn transform(&self, screen: ScreenSize) -> Option<Transform> {
        Transform::new(self.rect, screen)
    }

    /// Map a world point to screen pixels (world +y is screen up).
    pub fn world_to_screen(&self, point: Point, screen: ScreenSize) -> Option<ScreenPoint> {
        self.transform(screen)?.world_to_screen(point)
    }

    /// Map screen pixels back to a world point.
    pub fn screen_to_world(&self, point: ScreenPoint, screen: ScreenSize) -> Option<Point> {
        self.transform(screen)?.screen_to_world(point)
    }

    /// Zoom by `factor` (> 1 zooms in) keeping the world point under
    /// `anchor` fixed on screen.
    ///
    /// The resulting scale is clamped to the limits, so the applied factor may
    /// be smaller than requested. Returns whether the view changed.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f64, screen: ScreenSize) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let Some(world) = self.screen_to_world(anchor, screen) else {
            return false;
        };

        let target = (self.scale * factor).clamp(self.limits.min_scale, self.limits.max_scale);
        let applied = target / self.scale;
        if (applied - 1.0).abs() <= f64::EPSILON {
            return false;
        }

        self.rect = ViewRect::new(
            world.x - (world.x - self.rect.origin_x) / applied,
            world.y - (world.y - self.rect.origin_y) / applied,
            self.rect.width / applied,
            self.rect.height / applied,
        );
        self.scale = target;
        self.clamp_center();
        tracing::debug!(scale = self.scale, rect = ?self.rect, "zoomed viewport");
        true
    }

    /// Move the view by a screen-space drag delta.
    ///
    /// The content follows the pointer: dragging right reveals world to the
    /// left, dragging down reveals world above. Returns whether the view changed.
    pub fn pan_by(&mut self, dx: f32, dy: f32, screen: ScreenSize) -> bool {
        if !screen.is_valid() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.rect.origin_x -= dx as f64 * self.rect.width / screen.width as f64;
        self.rect.origin_y += dy as f64 * self.rect.height / screen.height as f64;
        self.clamp_center();
        tracing::debug!(rect = ?self.rect, "panned viewport");
        true
    }

    /// Restore the home rectangle and scale 1.
    pub fn reset(&mut self) {
        self.rect = self.home;
        self.scale = 1.0;
    }

    /// Status text such as `View: x:[-9.0, 9.0], y:[-9.0, 9.0]`.
    pub fn describe(&self) -> String {
        let x = self.x_range();
        let y = self.y_range();
        format!(
            "View: x:[{:.1}, {:.1}], y:[{:.1}, {:.1}]",
            x.min, x.max, y.min, y.max
        )
    }

    fn clamp_center(&mut self) {
        let limit = Range::new(-self.limits.max_center, self.limits.max_center);
        let center = self.rect.center();
        let clamped = Point::new(limit.clamp(center.x), limit.clamp(center.y));
        self.rect.origin_x += clamped.x - center.x;
        self.rect.origin_y += clamped.y - center.y;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewRect::default(), ViewLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 800.0,
        height: 600.0,
    };

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{a} != {b}");
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::default();
        let anchor = ScreenPoint::new(200.0, 450.0);
        let before = viewport.screen_to_world(anchor, SCREEN).unwrap();
        assert!(viewport.zoom_at(anchor, 2.0, SCREEN));
        let after = viewport.screen_to_world(anchor, SCREEN).unwrap();
        assert_close(before.x, after.x, 1e-9);
        assert_close(before.y, after.y, 1e-9);
        assert_close(viewport.rect().width, 9.0, 1e-12);
        assert_close(viewport.scale(), 2.0, 1e-12);
    }

    #[test]
    fn zoom_about_center_keeps_center_pixel() {
        let mut viewport = Viewport::default();
        let center = viewport.rect().center();
        let pixel = viewport.world_to_screen(center, SCREEN).unwrap();
        viewport.zoom_at(SCREEN.center(), 2.0, SCREEN);
        let after = viewport.world_to_screen(center, SCREEN).unwrap();
        assert!((pixel.x - after.x).abs() < 1e-3);
        assert!((pixel.y - after.y).abs() < 1e-3);
    }

    #[test]
    fn zoom_then_inverse_zoom_restores_rect() {
        let mut viewport = Viewport::default();
        let original = viewport.rect();
        let anchor = ScreenPoint::new(123.0, 77.0);
        viewport.zoom_at(anchor, 3.5, SCREEN);
        viewport.zoom_at(anchor, 1.0 / 3.5, SCREEN);
        let rect = viewport.rect();
        assert_close(rect.origin_x, original.origin_x, 1e-9);
        assert_close(rect.origin_y, original.origin_y, 1e-9);
        assert_close(rect.width, original.width, 1e-9);
        assert_close(rect.height, original.height, 1e-9);
        assert_close(viewport.scale(), 1.0, 1e-12);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(SCREEN.center(), 1e9, SCREEN);
        assert_close(viewport.scale(), 200.0, 1e-9);
        assert_close(viewport.rect().width, 18.0 / 200.0, 1e-12);
        assert!(!viewport.zoom_at(SCREEN.center(), 2.0, SCREEN));

        viewport.zoom_at(SCREEN.center(), 1e-12, SCREEN);
        assert_close(viewport.scale(), 0.01, 1e-12);
        assert!(viewport.rect().width > 0.0 && viewport.rect().height > 0.0);
    }

    #[test]
    fn invalid_zoom_input_is_ignored() {
        let mut viewport = Viewport::default();
        assert!(!viewport.zoom_at(SCREEN.center(), 0.0, SCREEN));
        assert!(!viewport.zoom_at(SCREEN.center(), -2.0, SCREEN));
        assert!(!viewport.zoom_at(SCREEN.center(), f64::NAN, SCREEN));
        assert!(!viewport.zoom_at(SCREEN.center(), 2.0, ScreenSize::new(0.0, 0.0)));
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn pan_follows_pointer() {
        let mut viewport = Viewport::default();
        let grabbed = viewport
            .screen_to_world(ScreenPoint::new(100.0, 100.0), SCREEN)
            .unwrap();
        viewport.pan_by(40.0, -25.0, SCREEN);
        let now = viewport
            .screen_to_world(ScreenPoint::new(140.0, 75.0), SCREEN)
            .unwrap();
        assert_close(grabbed.x, now.x, 1e-9);
        assert_close(grabbed.y, now.y, 1e-9);
        assert_close(viewport.rect().origin_x, -9.0 - 40.0 * 18.0 / 800.0, 1e-12);
        assert_close(viewport.rect().origin_y, -9.0 - 25.0 * 18.0 / 600.0, 1e-12);
    }

    #[test]
    fn pan_is_clamped() {
        let mut viewport = Viewport::new(
            ViewRect::default(),
            ViewLimits {
                max_center: 100.0,
                ..ViewLimits::default()
            },
        );
        viewport.pan_by(-1e7, 0.0, SCREEN);
        assert_close(viewport.rect().center().x, 100.0, 1e-9);
        assert_close(viewport.rect().width, 18.0, 1e-12);
    }

    #[test]
    fn reset_restores_home() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(ScreenPoint::new(10.0, 10.0), 4.0, SCREEN);
        viewport.pan_by(5.0, 5.0, SCREEN);
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
        assert_eq!(
            viewport.describe(),
            "View: x:[-9.0, 9.0], y:[-9.0, 9.0]"
        );
    }

    #[test]
    fn invalid_construction_falls_back() {
        let viewport = Viewport::new(
            ViewRect::new(0.0, 0.0, -1.0, 5.0),
            ViewLimits {
                min_scale: 5.0,
                max_scale: 2.0,
                max_center: f64::NAN,
            },
        );
        assert_eq!(viewport.rect(), ViewRect::default());
        assert_eq!(viewport.limits(), ViewLimits::default());
    }

    #[test]
    fn deserialize_rejects_unreachable_state() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(ScreenPoint::new(400.0, 300.0), 2.0, SCREEN);
        let json = serde_json::to_value(viewport).unwrap();
        let restored: Viewport = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, viewport);

        let mut bad = json.clone();
        bad["rect"]["width"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<Viewport>(bad).is_err());

        let mut bad = json.clone();
        bad["scale"] = serde_json::json!(1e9);
        assert!(serde_json::from_value::<Viewport>(bad).is_err());

        let mut bad = json;
        bad["limits"]["min_scale"] = serde_json::json!(2.0);
        assert!(serde_json::from_value::<Viewport>(bad).is_err());
    }

    #[test]
    fn viewport_error_names_the_bound() {
        let state = ViewportState {
            rect: ViewRect::default(),
            scale: 0.001,
            home: ViewRect::default(),
            limits: ViewLimits::default(),
        };
        assert_eq!(
            Viewport::try_from(state),
            Err(ViewportError::ScaleOutOfRange {
                scale: 0.001,
                min: 0.01,
                max: 200.0,
            })
        );
    }
}
