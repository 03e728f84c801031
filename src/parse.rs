//! Equation text parsing and canonical formatting.
//!
//! Accepted input is a linear equation in `x` and `y` with exactly one `=`.
//! Each side is a sum of terms `[+|-][number][x|y]`; an empty or sign-only
//! coefficient means 1. This covers the coefficient form (`2x+3y=6`,
//! `x-y=2`), slope-intercept form (`y=2x+1`) and vertical lines (`x=4`).
//! Whitespace is ignored and variable letters are case-insensitive.
//!
//! [`format_line`] is the inverse: `parse_line(&format_line(&l))` yields `l`.

use std::str::FromStr;

use crate::error::{ParseError, Side};
use crate::line::Line;

/// Parse equation text into a [`Line`].
///
/// Empty (or all-whitespace) input yields [`Line::default`] instead of an
/// error, so clearing a text field resets the equation.
pub fn parse_line(input: &str) -> Result<Line, ParseError> {
    let mut normalized = String::with_capacity(input.len());
    // Character position in `input` for every byte of `normalized`.
    let mut positions = Vec::with_capacity(input.len());
    for (position, ch) in input.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        normalized.push(ch);
        positions.extend(std::iter::repeat(position).take(ch.len_utf8()));
    }

    if normalized.is_empty() {
        return Ok(Line::default());
    }

    let mut sides = normalized.split('=');
    let (Some(left), Some(right)) = (sides.next(), sides.next()) else {
        return Err(ParseError::MissingEquals);
    };
    if sides.next().is_some() {
        return Err(ParseError::MultipleEquals);
    }

    let to_input = |err: ParseError| match err {
        ParseError::UnexpectedChar { ch, index } => ParseError::UnexpectedChar {
            ch,
            index: positions.get(index).copied().unwrap_or(index),
        },
        other => other,
    };
    let lhs = parse_side(left, Side::Left, 0).map_err(to_input)?;
    let rhs = parse_side(right, Side::Right, left.len() + 1).map_err(to_input)?;

    let line = Line::new(lhs.x - rhs.x, lhs.y - rhs.y, rhs.constant - lhs.constant);
    if !line.is_finite() {
        return Err(ParseError::NonFinite);
    }
    Ok(line)
}

/// Format a line in canonical display form, e.g. `2x + 3y = 6` or `x - y = 2`.
///
/// Unit coefficients are implicit, zero terms are omitted, and a line with no
/// variable terms renders its left side as the literal `0`.
pub fn format_line(line: &Line) -> String {
    let mut out = String::new();
    let (a, b) = (line.a(), line.b());

    if a != 0.0 {
        if a == -1.0 {
            out.push('-');
        } else if a != 1.0 {
            out.push_str(&format_number(a));
        }
        out.push('x');
    }

    if b != 0.0 {
        match (b < 0.0, out.is_empty()) {
            (true, true) => out.push('-'),
            (true, false) => out.push_str(" - "),
            (false, false) => out.push_str(" + "),
            (false, true) => {}
        }
        if b.abs() != 1.0 {
            out.push_str(&format_number(b.abs()));
        }
        out.push('y');
    }

    if out.is_empty() {
        out.push('0');
    }

    out.push_str(" = ");
    out.push_str(&format_number(line.c()));
    out
}

/// Shortest exact decimal rendering of a coefficient; `-0` prints as `0`.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

/// Accumulated coefficients of one side of an equation.
#[derive(Debug, Default, Clone, Copy)]
struct Linear {
    x: f64,
    y: f64,
    constant: f64,
}

fn parse_side(text: &str, side: Side, offset: usize) -> Result<Linear, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptySide { side });
    }

    let bytes = text.as_bytes();
    let mut acc = Linear::default();
    let mut i = 0;

    while i < bytes.len() {
        let term_start = i;

        let mut sign = 1.0;
        match bytes[i] {
            b'+' => i += 1,
            b'-' => {
                sign = -1.0;
                i += 1;
            }
            _ if term_start > 0 => {
                return Err(unexpected(text, i, offset));
            }
            _ => {}
        }

        let number_start = i;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        let number = &text[number_start..i];

        let variable = match bytes.get(i) {
            Some(b'x') => {
                i += 1;
                Some(b'x')
            }
            Some(b'y') => {
                i += 1;
                Some(b'y')
            }
            _ => None,
        };

        if number.is_empty() && variable.is_none() {
            return match bytes.get(i) {
                Some(_) => Err(unexpected(text, i, offset)),
                None => Err(ParseError::InvalidNumber {
                    text: text[term_start..].to_string(),
                }),
            };
        }

        let magnitude = if number.is_empty() {
            1.0
        } else {
            number
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber {
                    text: number.to_string(),
                })?
        };
        let value = sign * magnitude;

        match variable {
            Some(b'x') => acc.x += value,
            Some(_) => acc.y += value,
            None => acc.constant += value,
        }

        if let Some(&next) = bytes.get(i) {
            if next != b'+' && next != b'-' {
                return Err(unexpected(text, i, offset));
            }
        }
    }

    Ok(acc)
}

fn unexpected(text: &str, index: usize, offset: usize) -> ParseError {
    let ch = text[index..].chars().next().unwrap_or('?');
    ParseError::UnexpectedChar {
        ch,
        index: offset + index,
    }
}
