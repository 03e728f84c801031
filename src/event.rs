//! Logical actions and their dispatch onto a [`Session`].
//!
//! Front ends translate their own input events (widget callbacks, pointer
//! gestures, CLI flags) into [`Action`]s; [`Session::dispatch`] applies one
//! action to completion and reports what the front end has to do next.

use rand::Rng;

use crate::error::Error;
use crate::export::Snapshot;
use crate::geom::{ScreenPoint, ScreenSize};
use crate::line::{Coefficient, LineId};
use crate::session::Session;

/// A user-level command.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A numeric field changed.
    SetCoefficient {
        line: LineId,
        coefficient: Coefficient,
        value: f64,
    },
    /// An equation text field changed.
    SetText { line: LineId, text: String },
    /// Drag by a screen-space delta.
    Pan { dx: f32, dy: f32 },
    /// One wheel notch at the cursor.
    Wheel { position: ScreenPoint, delta_y: f32 },
    /// Two-finger gesture update.
    Pinch {
        previous: [ScreenPoint; 2],
        current: [ScreenPoint; 2],
    },
    /// Zoom button in.
    ZoomIn,
    /// Zoom button out.
    ZoomOut,
    /// The drawing surface changed size.
    Resize(ScreenSize),
    /// Restore the home view.
    ResetView,
    /// Restore default lines and the home view.
    ResetAll,
    /// Exchange the two lines.
    Swap,
    /// Random coefficients for both lines.
    Randomize,
    /// Capture the state for an image export.
    Export,
}

/// What a front end must do after an action.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// Only the view changed: redraw with the current lines.
    Redraw,
    /// A line changed: refresh text fields, solution and drawing.
    Resolve,
    /// The edit was rejected; the previous state is still in effect.
    Rejected(Error),
    /// State captured for export.
    Export(Snapshot),
}

impl Outcome {
    /// Whether the frame must be redrawn.
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Self::Redraw | Self::Resolve)
    }

    fn view(changed: bool) -> Self {
        if changed { Self::Redraw } else { Self::Unchanged }
    }
}

impl Session {
    /// Apply one action using the thread-local random generator.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        self.dispatch_with(action, &mut rand::thread_rng())
    }

    /// Apply one action with an explicit random generator.
    pub fn dispatch_with<R: Rng>(&mut self, action: Action, rng: &mut R) -> Outcome {
        match action {
            Action::SetCoefficient {
                line,
                coefficient,
                value,
            } => match self.set_coefficient(line, coefficient, value) {
                Ok(_) => Outcome::Resolve,
                Err(err) => Outcome::Rejected(err),
            },
            Action::SetText { line, text } => match self.set_from_text(line, &text) {
                Ok(_) => Outcome::Resolve,
                Err(err) => Outcome::Rejected(err),
            },
            Action::Pan { dx, dy } => Outcome::view(self.pan_by(dx, dy)),
            Action::Wheel { position, delta_y } => Outcome::view(self.wheel(position, delta_y)),
            Action::Pinch { previous, current } => Outcome::view(self.pinch(previous, current)),
            Action::ZoomIn => Outcome::view(self.zoom_in()),
            Action::ZoomOut => Outcome::view(self.zoom_out()),
            Action::Resize(screen) => Outcome::view(self.resize(screen)),
            Action::ResetView => {
                self.reset_view();
                Outcome::Redraw
            }
            Action::ResetAll => {
                self.reset_all();
                Outcome::Resolve
            }
            Action::Swap => {
                self.swap_lines();
                Outcome::Resolve
            }
            Action::Randomize => {
                self.randomize(rng);
                Outcome::Resolve
            }
            Action::Export => Outcome::Export(self.export_snapshot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::error::ParseError;
    use crate::line::Line;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn line_edits_resolve() {
        let mut session = Session::new();
        let outcome = session.dispatch(Action::SetText {
            line: LineId::First,
            text: "x + y = 8".to_string(),
        });
        assert!(matches!(outcome, Outcome::Resolve));
        let outcome = session.dispatch(Action::SetCoefficient {
            line: LineId::Second,
            coefficient: Coefficient::B,
            value: 4.0,
        });
        assert!(matches!(outcome, Outcome::Resolve));
        assert_eq!(session.line(LineId::Second), Line::new(1.0, 4.0, 2.0));
    }

    #[test]
    fn bad_text_is_rejected() {
        let mut session = Session::new();
        let before = session.lines();
        let outcome = session.dispatch(Action::SetText {
            line: LineId::Second,
            text: "x==2".to_string(),
        });
        assert!(matches!(
            outcome,
            Outcome::Rejected(Error::Parse(ParseError::MultipleEquals))
        ));
        assert!(!outcome.needs_redraw());
        assert_eq!(session.lines(), before);
    }

    #[test]
    fn view_actions_only_redraw() {
        let mut session = Session::new();
        let lines = session.lines();
        assert!(matches!(
            session.dispatch(Action::Pan { dx: 10.0, dy: 0.0 }),
            Outcome::Redraw
        ));
        assert!(matches!(
            session.dispatch(Action::Wheel {
                position: ScreenPoint::new(100.0, 100.0),
                delta_y: 1.0,
            }),
            Outcome::Redraw
        ));
        assert!(matches!(
            session.dispatch(Action::Pan { dx: 0.0, dy: 0.0 }),
            Outcome::Unchanged
        ));
        assert!(matches!(session.dispatch(Action::ResetView), Outcome::Redraw));
        assert_eq!(session.lines(), lines);
    }

    #[test]
    fn zoom_at_limit_is_unchanged() {
        let mut session = Session::new();
        for _ in 0..200 {
            session.dispatch(Action::ZoomIn);
        }
        assert!(matches!(session.dispatch(Action::ZoomIn), Outcome::Unchanged));
        assert!((session.viewport().scale() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn export_captures_snapshot() {
        let mut session = Session::new();
        let Outcome::Export(snapshot) = session.dispatch(Action::Export) else {
            panic!("expected a snapshot");
        };
        session.dispatch(Action::Swap);
        assert_eq!(snapshot.lines(), PlotConfig::default().default_lines);
        assert_ne!(session.lines(), snapshot.lines());
    }

    #[test]
    fn randomize_is_reproducible_with_seed() {
        let mut first = Session::new();
        let mut second = Session::new();
        first.dispatch_with(Action::Randomize, &mut StdRng::seed_from_u64(42));
        second.dispatch_with(Action::Randomize, &mut StdRng::seed_from_u64(42));
        assert_eq!(first.lines(), second.lines());
    }
}
