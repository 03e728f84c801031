//! Intersection of two lines by Cramer's rule.
//!
//! Classification order is fixed: the determinant is checked first, and only
//! a (near-)zero determinant leads to the proportionality test that separates
//! coincident lines from parallel ones.

use serde::Serialize;

use crate::geom::Point;
use crate::line::{EPSILON, Line};
use crate::parse::{format_line, format_number};

/// Number of decimals kept when an intersection is shown to the user.
pub const DISPLAY_DECIMALS: i32 = 4;

/// Relationship between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intersection {
    /// The lines cross at exactly one point.
    Unique(Point),
    /// Same direction, no shared point.
    Parallel,
    /// The same line: infinitely many shared points.
    Coincident,
}

impl Intersection {
    /// The intersection point, if unique.
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::Unique(point) => Some(*point),
            Self::Parallel | Self::Coincident => None,
        }
    }

    /// Copy with the point rounded to [`DISPLAY_DECIMALS`].
    ///
    /// Keep the unrounded value when chaining further computation.
    pub fn rounded(&self) -> Self {
        match self {
            Self::Unique(point) => Self::Unique(Point::new(
                round_to(point.x, DISPLAY_DECIMALS),
                round_to(point.y, DISPLAY_DECIMALS),
            )),
            other => *other,
        }
    }

    /// Short status line.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Unique(_) => "Unique Solution",
            Self::Parallel => "No Solution (Parallel Lines)",
            Self::Coincident => "Infinite Solutions (Coincident Lines)",
        }
    }

    /// The rounded point as `(x, y)`, or a notice when there is none.
    pub fn describe(&self) -> String {
        match self.rounded() {
            Self::Unique(point) => format!(
                "({}, {})",
                format_number(point.x),
                format_number(point.y)
            ),
            Self::Parallel | Self::Coincident => "No single intersection".to_string(),
        }
    }
}

/// `a1*b2 - a2*b1`; zero iff the lines share a direction.
pub fn determinant(first: &Line, second: &Line) -> f64 {
    first.a() * second.b() - second.a() * first.b()
}

/// Classify two lines and compute their intersection when unique.
pub fn solve(first: &Line, second: &Line) -> Intersection {
    let (a1, b1, c1) = (first.a(), first.b(), first.c());
    let (a2, b2, c2) = (second.a(), second.b(), second.c());

    let det = a1 * b2 - a2 * b1;
    if det.abs() < EPSILON {
        let proportional =
            (a1 * c2 - a2 * c1).abs() < EPSILON && (b1 * c2 - b2 * c1).abs() < EPSILON;
        return if proportional {
            Intersection::Coincident
        } else {
            Intersection::Parallel
        };
    }

    let x = (c1 * b2 - c2 * b1) / det;
    let y = (a1 * c2 - a2 * c1) / det;
    Intersection::Unique(Point::new(x, y))
}

/// Magnitude above which an `f64` has no fractional digits left to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Round to a fixed number of decimals; `-0` becomes `0`.
///
/// Values too large to carry the requested decimals are returned unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = value * factor;
    if value.abs() >= ROUNDING_LIMIT || !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Human-readable derivation of the solution, one entry per step.
pub fn solution_steps(first: &Line, second: &Line) -> Vec<String> {
    let (a1, b1, c1) = (first.a(), first.b(), first.c());
    let (a2, b2, c2) = (second.a(), second.b(), second.c());
    let n = format_number;
    let det = determinant(first, second);

    let mut steps = vec![
        format!(
            "The equations are: {} and {}",
            format_line(first),
            format_line(second)
        ),
        format!(
            "Determinant: D = a1*b2 - a2*b1 = ({})({}) - ({})({}) = {}",
            n(a1),
            n(b2),
            n(a2),
            n(b1),
            n(round_to(det, DISPLAY_DECIMALS))
        ),
    ];

    match solve(first, second) {
        Intersection::Parallel => {
            steps.push("Since D = 0, the lines are parallel and do not intersect.".to_string());
        }
        Intersection::Coincident => {
            steps.push(
                "Since D = 0 and the equations are proportional, the lines are coincident \
                 (infinite solutions)."
                    .to_string(),
            );
        }
        Intersection::Unique(point) => {
            let x_num = c1 * b2 - c2 * b1;
            let y_num = a1 * c2 - a2 * c1;
            let x = round_to(point.x, DISPLAY_DECIMALS);
            let y = round_to(point.y, DISPLAY_DECIMALS);
            steps.push("Since D != 0, the lines intersect at a unique point.".to_string());
            steps.push(format!(
                "x = (c1*b2 - c2*b1) / D = ({}*{} - {}*{}) / {} = {} / {} = {}",
                n(c1),
                n(b2),
                n(c2),
                n(b1),
                n(det),
                n(x_num),
                n(det),
                n(x)
            ));
            steps.push(format!(
                "y = (a1*c2 - a2*c1) / D = ({}*{} - {}*{}) / {} = {} / {} = {}",
                n(a1),
                n(c2),
                n(a2),
                n(c1),
                n(det),
                n(y_num),
                n(det),
                n(y)
            ));
            steps.push(format!("The lines intersect at ({}, {})", n(x), n(y)));
        }
    }

    steps
}
