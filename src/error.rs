//! Error types.
//!
//! Only recoverable conditions are represented here. Degenerate lines,
//! singular systems and out-of-range zooms are ordinary states (see
//! [`crate::clip`], [`crate::solver`] and [`crate::view`]).

use thiserror::Error;

use crate::line::Coefficient;
use crate::view::{ViewLimits, ViewRect};

/// Which side of the `=` sign a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left of `=`.
    Left,
    /// Right of `=`.
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Malformed equation text. The previously held line stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("equation has no `=` sign")]
    MissingEquals,
    #[error("equation has more than one `=` sign")]
    MultipleEquals,
    #[error("the {side} side of the equation is empty")]
    EmptySide { side: Side },
    /// `index` counts characters of the original input, whitespace included.
    #[error("unexpected character `{ch}` at position {index}")]
    UnexpectedChar { ch: char, index: usize },
    #[error("`{text}` is not a valid number")]
    InvalidNumber { text: String },
    #[error("coefficients must be finite")]
    NonFinite,
}

/// A serialized viewport that violates its own bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("view rectangle {0:?} must have a finite origin and positive size")]
    InvalidRect(ViewRect),
    #[error("view limits {0:?} must have 0 < min_scale <= 1 <= max_scale and a positive max_center")]
    InvalidLimits(ViewLimits),
    #[error("scale {scale} is outside [{min}, {max}]")]
    ScaleOutOfRange { scale: f64, min: f64, max: f64 },
}

/// Failure while producing an exported image or snapshot file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export worker panicked")]
    WorkerPanicked,
}

/// Failure while loading a [`PlotConfig`](crate::config::PlotConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("coefficient {coefficient} must be finite, got {value}")]
    NonFiniteCoefficient { coefficient: Coefficient, value: f64 },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_render_readably() {
        let err = ParseError::EmptySide { side: Side::Right };
        assert_eq!(err.to_string(), "the right side of the equation is empty");
        let err = Error::from(ParseError::UnexpectedChar { ch: 'z', index: 3 });
        assert_eq!(err.to_string(), "unexpected character `z` at position 3");
    }
}
