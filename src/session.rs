//! Session state: the two equations, the viewport and the drawing surface.
//!
//! A [`Session`] is owned by the caller and mutated only through its methods
//! (or [`Session::dispatch`](crate::event)). Every mutation runs to completion
//! before the next one; derived values (intersection, segments, render
//! payload) are recomputed on demand and never cached.

use rand::Rng;

use crate::config::PlotConfig;
use crate::error::Error;
use crate::export::{ExportOptions, Snapshot};
use crate::geom::{ScreenPoint, ScreenSize};
use crate::interaction::{pinch_center, pinch_zoom_factor, wheel_zoom_factor};
use crate::line::{Coefficient, Line, LineId};
use crate::parse::{format_line, parse_line};
use crate::render::{RenderList, RenderPayload, build_render_list};
use crate::solver::{Intersection, solution_steps, solve};
use crate::style::Theme;
use crate::view::Viewport;

/// Half-steps per unit used by [`Session::randomize`].
const RANDOM_STEPS_PER_UNIT: i32 = 2;
/// Largest absolute coefficient produced by [`Session::randomize`].
const RANDOM_LIMIT: i32 = 10;

/// Interactive state for one pair of equations.
#[derive(Debug, Clone)]
pub struct Session {
    lines: [Line; 2],
    viewport: Viewport,
    screen: ScreenSize,
    theme: Theme,
    config: PlotConfig,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Access the configuration.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Access the theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Access one line.
    pub fn line(&self, id: LineId) -> Line {
        self.lines[id.index()]
    }

    /// Both lines, first to second.
    pub fn lines(&self) -> [Line; 2] {
        self.lines
    }

    /// Access the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current drawing surface size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Replace one coefficient of a line.
    ///
    /// Non-finite values are rejected and the previous line stays in effect.
    pub fn set_coefficient(
        &mut self,
        id: LineId,
        coefficient: Coefficient,
        value: f64,
    ) -> Result<Line, Error> {
        if !value.is_finite() {
            tracing::warn!(line = id.number(), %coefficient, value, "rejected coefficient");
            return Err(Error::NonFiniteCoefficient { coefficient, value });
        }
        let line = self.line(id).with_coefficient(coefficient, value);
        self.replace(id, line);
        Ok(line)
    }

    /// Replace a line from equation text.
    ///
    /// Empty text selects `x + y = 0`. Malformed text is rejected and the
    /// previous line stays in effect.
    pub fn set_from_text(&mut self, id: LineId, text: &str) -> Result<Line, Error> {
        match parse_line(text) {
            Ok(line) => {
                self.replace(id, line);
                Ok(line)
            }
            Err(err) => {
                tracing::warn!(line = id.number(), text, error = %err, "rejected equation text");
                Err(err.into())
            }
        }
    }

    /// Canonical text for a line, suitable for the text field.
    pub fn display_text(&self, id: LineId) -> String {
        format_line(&self.line(id))
    }

    /// Exchange the two lines.
    pub fn swap_lines(&mut self) {
        self.lines.swap(0, 1);
        tracing::debug!(lines = ?self.lines, "swapped lines");
    }

    /// Restore the home view.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        tracing::debug!("reset view");
    }

    /// Restore the configured default lines and the home view.
    pub fn reset_all(&mut self) {
        self.reset_all_with(self.config.default_lines);
    }

    /// Restore the home view and load the given lines.
    pub fn reset_all_with(&mut self, defaults: [Line; 2]) {
        self.lines = defaults;
        self.viewport.reset();
        tracing::debug!(lines = ?self.lines, "reset lines and view");
    }

    /// Replace both lines with random non-degenerate coefficients in
    /// `[-10, 10]`, in steps of 0.5.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for id in LineId::BOTH {
            let line = loop {
                let mut draw = || {
                    let steps = RANDOM_LIMIT * RANDOM_STEPS_PER_UNIT;
                    rng.gen_range(-steps..=steps) as f64 / RANDOM_STEPS_PER_UNIT as f64
                };
                let line = Line::new(draw(), draw(), draw());
                if !line.is_degenerate() {
                    break line;
                }
            };
            self.replace(id, line);
        }
    }

    /// Classify the lines and compute their intersection.
    pub fn solve(&self) -> Intersection {
        solve(&self.lines[0], &self.lines[1])
    }

    /// Step-by-step derivation of the current solution.
    pub fn solution_steps(&self) -> Vec<String> {
        solution_steps(&self.lines[0], &self.lines[1])
    }

    /// Status text: the classification and the rounded point.
    pub fn status(&self) -> String {
        let intersection = self.solve();
        format!("{}: {}", intersection.summary(), intersection.describe())
    }

    /// Describe the current frame in world coordinates.
    pub fn render_payload(&self) -> RenderPayload {
        RenderPayload::build(&self.lines, &self.viewport, self.config.grid_divisions)
    }

    /// Screen-space draw commands for the current frame.
    pub fn render_list(&self) -> RenderList {
        build_render_list(&self.render_payload(), self.screen, &self.theme)
    }

    /// Owned copy of the state an export needs.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            viewport: self.viewport,
            line1: self.lines[0],
            line2: self.lines[1],
        }
    }

    /// Export settings from the configuration and the current theme.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::from_config(&self.config, self.theme.clone())
    }

    /// Zoom keeping the world point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f64) -> bool {
        self.viewport.zoom_at(anchor, factor, self.screen)
    }

    /// Zoom in one step about the center of the surface.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.screen.center(), self.config.zoom_step)
    }

    /// Zoom out one step about the center of the surface.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.screen.center(), 1.0 / self.config.zoom_step)
    }

    /// Apply one wheel notch at the cursor position.
    pub fn wheel(&mut self, position: ScreenPoint, delta_y: f32) -> bool {
        let factor = wheel_zoom_factor(delta_y, &self.config);
        self.zoom_at(position, factor)
    }

    /// Apply a two-finger gesture update.
    pub fn pinch(&mut self, previous: [ScreenPoint; 2], current: [ScreenPoint; 2]) -> bool {
        let factor = pinch_zoom_factor(previous, current);
        self.zoom_at(pinch_center(current), factor)
    }

    /// Pan by a screen-space drag delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        self.viewport.pan_by(dx, dy, self.screen)
    }

    /// Record a new surface size. Empty sizes are ignored.
    pub fn resize(&mut self, screen: ScreenSize) -> bool {
        if !screen.is_valid() || screen == self.screen {
            return false;
        }
        self.screen = screen;
        true
    }

    fn replace(&mut self, id: LineId, line: Line) {
        self.lines[id.index()] = line;
        tracing::debug!(line = id.number(), equation = %line, "updated line");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a session before construction.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    config: PlotConfig,
    theme: Theme,
    screen: ScreenSize,
    lines: Option<[Line; 2]>,
}

impl SessionBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the initial surface size.
    pub fn screen(mut self, screen: ScreenSize) -> Self {
        self.screen = screen;
        self
    }

    /// Start with these lines instead of the configured defaults.
    pub fn lines(mut self, lines: [Line; 2]) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Build the session.
    pub fn build(self) -> Session {
        let screen = if self.screen.is_valid() {
            self.screen
        } else {
            ScreenSize::default()
        };
        Session {
            lines: self.lines.unwrap_or(self.config.default_lines),
            viewport: Viewport::new(self.config.default_view, self.config.limits()),
            screen,
            theme: self.theme,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::geom::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn starts_with_default_lines() {
        let session = Session::new();
        assert_eq!(session.display_text(LineId::First), "2x + 3y = 6");
        assert_eq!(session.display_text(LineId::Second), "x - y = 2");
        assert_eq!(session.viewport(), &Viewport::default());
    }

    #[test]
    fn coefficient_edits_resolve() {
        let mut session = Session::new();
        session.set_from_text(LineId::First, "x+y=8").unwrap();
        session.set_coefficient(LineId::Second, Coefficient::A, 2.0).unwrap();
        session.set_coefficient(LineId::Second, Coefficient::C, 1.0).unwrap();
        assert_eq!(session.line(LineId::Second), Line::new(2.0, -1.0, 1.0));
        assert_eq!(session.solve(), Intersection::Unique(Point::new(3.0, 5.0)));
        assert_eq!(session.status(), "Unique Solution: (3, 5)");
    }

    #[test]
    fn rejected_edits_keep_previous_line() {
        let mut session = Session::new();
        let before = session.line(LineId::First);
        let err = session.set_from_text(LineId::First, "2x+3y").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingEquals)));
        assert!(session.set_coefficient(LineId::First, Coefficient::B, f64::NAN).is_err());
        assert_eq!(session.line(LineId::First), before);
    }

    #[test]
    fn empty_text_selects_default_line() {
        let mut session = Session::new();
        session.set_from_text(LineId::Second, "  ").unwrap();
        assert_eq!(session.line(LineId::Second), Line::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn swap_and_reset() {
        let mut session = Session::new();
        let [first, second] = session.lines();
        session.swap_lines();
        assert_eq!(session.lines(), [second, first]);

        session.zoom_in();
        session.pan_by(30.0, 10.0);
        session.set_from_text(LineId::First, "y=4").unwrap();
        session.reset_view();
        assert_eq!(session.viewport(), &Viewport::default());
        assert_eq!(session.line(LineId::First), Line::new(0.0, 1.0, 4.0));

        session.zoom_out();
        session.reset_all();
        assert_eq!(session.lines(), PlotConfig::default().default_lines);
        assert_eq!(session.viewport(), &Viewport::default());
    }

    #[test]
    fn zoom_buttons_use_configured_step() {
        let mut session = Session::new();
        assert!(session.zoom_in());
        assert!((session.viewport().scale() - 1.2).abs() < 1e-12);
        assert!(session.zoom_out());
        assert!((session.viewport().scale() - 1.0).abs() < 1e-12);
        assert!(session.wheel(ScreenPoint::new(10.0, 10.0), -1.0));
        assert!((session.viewport().scale() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn randomize_produces_half_steps() {
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(7);
        session.randomize(&mut rng);
        for line in session.lines() {
            assert!(!line.is_degenerate());
            for value in [line.a(), line.b(), line.c()] {
                assert!((-10.0..=10.0).contains(&value));
                assert_eq!((value * 2.0).fract(), 0.0);
            }
        }
    }

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let mut session = Session::new();
        let snapshot = session.export_snapshot();
        session.set_from_text(LineId::First, "x=1").unwrap();
        session.zoom_in();
        assert_eq!(snapshot.line1, Line::new(2.0, 3.0, 6.0));
        assert_eq!(snapshot.viewport, Viewport::default());
    }

    #[test]
    fn resize_ignores_empty_surface() {
        let mut session = Session::new();
        assert!(!session.resize(ScreenSize::new(0.0, 300.0)));
        assert!(session.resize(ScreenSize::new(640.0, 480.0)));
        assert_eq!(session.screen(), ScreenSize::new(640.0, 480.0));
    }
}
