//! The line model: one linear equation `Ax + By = C`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Numerical tolerance shared by every component.
///
/// Coefficients, determinants and cross products below this magnitude are
/// treated as zero.
pub const EPSILON: f64 = 1e-10;

/// An immutable linear equation `a*x + b*y = c`.
///
/// Edits never mutate a line in place; they produce a new value that replaces
/// the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Create a line from its coefficients.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Coefficient of `x`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Coefficient of `y`.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Right-hand side constant.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Read a coefficient by name.
    pub fn coefficient(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::A => self.a,
            Coefficient::B => self.b,
            Coefficient::C => self.c,
        }
    }

    /// Return a copy of this line with one coefficient replaced.
    pub fn with_coefficient(&self, coefficient: Coefficient, value: f64) -> Self {
        let mut next = *self;
        match coefficient {
            Coefficient::A => next.a = value,
            Coefficient::B => next.b = value,
            Coefficient::C => next.c = value,
        }
        next
    }

    /// A line without direction: both `a` and `b` are within [`EPSILON`] of zero.
    ///
    /// Degenerate lines are kept in the model but are never drawn.
    pub fn is_degenerate(&self) -> bool {
        self.a.abs() < EPSILON && self.b.abs() < EPSILON
    }

    /// Check whether all coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }

    /// Solve for `y` at a given `x`. `None` for near-vertical lines.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        if self.b.abs() <= EPSILON {
            return None;
        }
        Some((self.c - self.a * x) / self.b)
    }

    /// Solve for `x` at a given `y`. `None` for near-horizontal lines.
    pub fn x_at(&self, y: f64) -> Option<f64> {
        if self.a.abs() <= EPSILON {
            return None;
        }
        Some((self.c - self.b * y) / self.a)
    }

    /// Signed residual `a*x + b*y - c` at a point.
    pub fn residual(&self, point: Point) -> f64 {
        self.a * point.x + self.b * point.y - self.c
    }
}

impl Default for Line {
    /// The line `x + y = 0`, used when an equation field is cleared.
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::parse::format_line(self))
    }
}

/// One of the three coefficients of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coefficient {
    /// Coefficient of `x`.
    A,
    /// Coefficient of `y`.
    B,
    /// Right-hand side.
    C,
}

impl Coefficient {
    /// All coefficients in display order.
    pub const ALL: [Coefficient; 3] = [Coefficient::A, Coefficient::B, Coefficient::C];
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        };
        f.write_str(name)
    }
}

/// Which of the two lines in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineId {
    /// The first equation.
    First,
    /// The second equation.
    Second,
}

impl LineId {
    /// Both lines in order.
    pub const BOTH: [LineId; 2] = [LineId::First, LineId::Second];

    /// Index into a two-element array.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// One-based number used in labels.
    pub fn number(self) -> usize {
        self.index() + 1
    }
}
