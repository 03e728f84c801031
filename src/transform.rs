//! Coordinate transforms between world and screen space.

use crate::geom::{Point, ScreenPoint, ScreenSize};
use crate::view::ViewRect;

/// Linear map from a world rectangle onto a screen surface.
///
/// `[x, x+w] x [y, y+h]` maps to `[0, width] x [0, height]` with the vertical
/// axis inverted, so world +y points up on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rect: ViewRect,
    screen: ScreenSize,
}

impl Transform {
    /// Create a transform. `None` if either the rectangle or the surface is empty.
    pub fn new(rect: ViewRect, screen: ScreenSize) -> Option<Self> {
        if !rect.is_valid() || !screen.is_valid() {
            return None;
        }
        Some(Self { rect, screen })
    }

    /// Access the world rectangle.
    pub fn rect(&self) -> ViewRect {
        self.rect
    }

    /// Access the screen size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// World units per screen pixel, horizontally and vertically.
    pub fn units_per_pixel(&self) -> (f64, f64) {
        (
            self.rect.width / self.screen.width as f64,
            self.rect.height / self.screen.height as f64,
        )
    }

    /// Map a world point into screen space.
    pub fn world_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.rect.origin_x) / self.rect.width;
        let y_norm = (point.y - self.rect.origin_y) / self.rect.height;
        let sx = x_norm * self.screen.width as f64;
        let sy = self.screen.height as f64 - y_norm * self.screen.height as f64;
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map a screen point into world space.
    pub fn screen_to_world(&self, point: ScreenPoint) -> Option<Point> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let x_norm = point.x as f64 / self.screen.width as f64;
        let y_norm = (self.screen.height as f64 - point.y as f64) / self.screen.height as f64;
        Some(Point::new(
            self.rect.origin_x + x_norm * self.rect.width,
            self.rect.origin_y + y_norm * self.rect.height,
        ))
    }
}
