//! Grid layout and tick label formatting.

use crate::view::{Range, ViewRect};

/// Number of grid divisions along the longer side of the view.
pub const DEFAULT_GRID_DIVISIONS: u32 = 18;

/// Upper bound on grid divisions; larger requests are clamped.
pub const MAX_GRID_DIVISIONS: u32 = 1000;

/// Grid description: the visible rectangle subdivided into equal steps.
///
/// The step is the longer side divided by `divisions`, and grid lines sit on
/// integer multiples of the step so the axes (`x = 0`, `y = 0`) are always
/// grid lines when visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Visible world rectangle.
    pub rect: ViewRect,
    /// Divisions along the longer side.
    pub divisions: u32,
}

/// A single grid line at a world coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// World coordinate of the line (x for vertical lines, y for horizontal).
    pub value: f64,
    /// Whether this line is the coordinate axis itself.
    pub is_axis: bool,
}

impl GridSpec {
    /// Create a grid spec with divisions clamped to `1..=MAX_GRID_DIVISIONS`.
    pub fn new(rect: ViewRect, divisions: u32) -> Self {
        Self {
            rect,
            divisions: divisions.clamp(1, MAX_GRID_DIVISIONS),
        }
    }

    /// World distance between neighboring grid lines.
    pub fn step(&self) -> f64 {
        self.rect.width.max(self.rect.height) / self.divisions as f64
    }

    /// Vertical grid lines (constant x), left to right.
    pub fn vertical_lines(&self) -> Vec<GridLine> {
        grid_lines(self.rect.x_range(), self.step())
    }

    /// Horizontal grid lines (constant y), bottom to top.
    pub fn horizontal_lines(&self) -> Vec<GridLine> {
        grid_lines(self.rect.y_range(), self.step())
    }

    /// Label for a grid value, with precision derived from the step.
    pub fn label(&self, value: f64) -> String {
        format_tick(value, self.step())
    }
}

fn grid_lines(range: Range, step: f64) -> Vec<GridLine> {
    if !range.is_valid() || !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step).floor() as i64;
    (first..=last)
        .map(|index| GridLine {
            value: index as f64 * step,
            is_axis: index == 0,
        })
        .collect()
}

/// Format a tick value with enough decimals to tell neighbors apart,
/// trimming trailing zeros.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (2 - step.log10().floor() as i32).clamp(0, 10) as usize
    } else {
        2
    };
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" { "0".to_string() } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_unit_steps() {
        let grid = GridSpec::new(ViewRect::default(), DEFAULT_GRID_DIVISIONS);
        assert_eq!(grid.step(), 1.0);
        let lines = grid.vertical_lines();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines.first().map(|l| l.value), Some(-9.0));
        assert_eq!(lines.iter().filter(|l| l.is_axis).count(), 1);
    }

    #[test]
    fn step_follows_longer_side() {
        let grid = GridSpec::new(ViewRect::new(0.5, 0.5, 36.0, 9.0), 18);
        assert_eq!(grid.step(), 2.0);
        let horizontal = grid.horizontal_lines();
        assert_eq!(
            horizontal.iter().map(|l| l.value).collect::<Vec<_>>(),
            vec![2.0, 4.0, 6.0, 8.0]
        );
        assert!(horizontal.iter().all(|l| !l.is_axis));
    }

    #[test]
    fn tick_labels_trim_zeros() {
        assert_eq!(format_tick(3.0, 1.0), "3");
        assert_eq!(format_tick(0.15, 0.05), "0.15");
        assert_eq!(format_tick(-0.0001, 1.0), "0");
        assert_eq!(format_tick(3.3333333, 1.1111), "3.33");
        assert_eq!(format_tick(200.0, 20.0), "200");
    }

    #[test]
    fn divisions_are_clamped() {
        let grid = GridSpec::new(ViewRect::default(), 50_000_000);
        assert_eq!(grid.divisions, MAX_GRID_DIVISIONS);
        assert!(grid.vertical_lines().len() <= MAX_GRID_DIVISIONS as usize + 1);
        assert_eq!(GridSpec::new(ViewRect::default(), 0).divisions, 1);
    }
}
