//! Interaction helpers for panning and zooming.
//!
//! These helpers turn raw pointer input into viewport deltas and zoom factors
//! so every backend shares the same interaction semantics.

use crate::config::PlotConfig;
use crate::geom::ScreenPoint;

/// Zoom factor for one wheel notch.
///
/// Scrolling up (negative `delta_y`) zooms in.
pub fn wheel_zoom_factor(delta_y: f32, config: &PlotConfig) -> f64 {
    if !delta_y.is_finite() || delta_y == 0.0 {
        1.0
    } else if delta_y < 0.0 {
        config.wheel_zoom_in
    } else {
        config.wheel_zoom_out
    }
}

/// Zoom factor for a two-finger gesture: the ratio of the current to the
/// previous finger distance.
///
/// Returns 1 when either distance is too small to be meaningful.
pub fn pinch_zoom_factor(previous: [ScreenPoint; 2], current: [ScreenPoint; 2]) -> f64 {
    let before = previous[0].distance(previous[1]) as f64;
    let after = current[0].distance(current[1]) as f64;
    if !(before.is_finite() && after.is_finite()) || before < 1.0 || after < 1.0 {
        return 1.0;
    }
    after / before
}

/// Center between two touch points, used as the pinch anchor.
pub fn pinch_center(current: [ScreenPoint; 2]) -> ScreenPoint {
    current[0].midpoint(current[1])
}

/// Tracks a single pointer drag and reports incremental deltas.
///
/// Movement below `threshold` pixels from the press position is not reported,
/// so a plain click never nudges the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    start: ScreenPoint,
    last: ScreenPoint,
    active: bool,
    threshold: f32,
}

impl DragTracker {
    /// Start tracking at the press position.
    pub fn begin(start: ScreenPoint, threshold: f32) -> Self {
        Self {
            start,
            last: start,
            active: threshold <= 0.0,
            threshold,
        }
    }

    /// Feed a new pointer position; returns the delta since the last report.
    pub fn update(&mut self, position: ScreenPoint) -> Option<(f32, f32)> {
        if !self.active {
            if position.distance(self.start) < self.threshold {
                return None;
            }
            self.active = true;
        }
        let delta = (position.x - self.last.x, position.y - self.last.y);
        self.last = position;
        if delta.0 == 0.0 && delta.1 == 0.0 {
            None
        } else {
            Some(delta)
        }
    }

    /// Whether the pointer has moved past the threshold.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Finish the drag; returns whether it ever moved past the threshold.
    pub fn end(self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_direction_selects_factor() {
        let config = PlotConfig::default();
        assert_eq!(wheel_zoom_factor(-3.0, &config), 1.1);
        assert_eq!(wheel_zoom_factor(2.0, &config), 0.9);
        assert_eq!(wheel_zoom_factor(0.0, &config), 1.0);
    }

    #[test]
    fn pinch_uses_distance_ratio() {
        let previous = [ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)];
        let current = [ScreenPoint::new(0.0, 0.0), ScreenPoint::new(150.0, 0.0)];
        assert!((pinch_zoom_factor(previous, current) - 1.5).abs() < 1e-9);
        assert_eq!(pinch_center(current), ScreenPoint::new(75.0, 0.0));

        let collapsed = [ScreenPoint::new(5.0, 5.0), ScreenPoint::new(5.0, 5.0)];
        assert_eq!(pinch_zoom_factor(collapsed, current), 1.0);
    }

    #[test]
    fn drag_reports_deltas_after_threshold() {
        let mut drag = DragTracker::begin(ScreenPoint::new(10.0, 10.0), 4.0);
        assert_eq!(drag.update(ScreenPoint::new(12.0, 10.0)), None);
        assert!(!drag.is_active());
        assert_eq!(drag.update(ScreenPoint::new(16.0, 10.0)), Some((6.0, 0.0)));
        assert_eq!(drag.update(ScreenPoint::new(16.0, 7.0)), Some((0.0, -3.0)));
        assert_eq!(drag.update(ScreenPoint::new(16.0, 7.0)), None);
        assert!(drag.end());
    }

    #[test]
    fn click_without_motion_is_not_a_drag() {
        let mut drag = DragTracker::begin(ScreenPoint::new(0.0, 0.0), 4.0);
        drag.update(ScreenPoint::new(1.0, 1.0));
        assert!(!drag.end());
    }
}
