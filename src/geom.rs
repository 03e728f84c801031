//! Geometric primitives shared by the solver, viewport and renderers.
//!
//! [`Point`] is a world-space coordinate (the plane the equations live in).
//! Screen-space types use pixels with the origin in the top-left corner and
//! `y` growing downwards.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X value in world coordinates.
    pub x: f64,
    /// Y value in world coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new world point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another screen point.
    pub fn distance(&self, other: ScreenPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two screen points.
    pub fn midpoint(&self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl ScreenSize {
    /// Create a new screen size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether the surface has positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The center pixel of the surface.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }

    /// The full surface as a rectangle anchored at the origin.
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(self.width, self.height),
        )
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(800.0, 800.0)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_size_validity() {
        assert!(ScreenSize::new(10.0, 10.0).is_valid());
        assert!(!ScreenSize::new(0.0, 10.0).is_valid());
        assert!(!ScreenSize::new(10.0, f32::NAN).is_valid());
    }

    #[test]
    fn rect_contains_edges() {
        let rect = ScreenSize::new(10.0, 20.0).rect();
        assert!(rect.contains(ScreenPoint::new(0.0, 0.0)));
        assert!(rect.contains(ScreenPoint::new(10.0, 20.0)));
        assert!(!rect.contains(ScreenPoint::new(10.5, 5.0)));
    }
}
