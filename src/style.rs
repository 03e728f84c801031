//! Visual theme for the graph.

use crate::render::{Color, LineStyle, MarkerStyle, TextStyle};

/// Colors and sizes used when turning a render payload into draw commands.
///
/// Sizes are in logical pixels for a surface of roughly 800 px; use
/// [`Theme::scaled`] when drawing to a much larger surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Surface fill.
    pub background: Color,
    /// Regular grid lines.
    pub grid: LineStyle,
    /// The x and y axes.
    pub axis: LineStyle,
    /// Grid value labels.
    pub tick_label: TextStyle,
    /// The `(0,0)` label.
    pub origin_label: TextStyle,
    /// Stroke colors for the first and second line.
    pub lines: [Color; 2],
    /// Stroke width for both lines.
    pub line_width: f32,
    /// Endpoint markers on each line (fill is replaced by the line color).
    pub endpoint: MarkerStyle,
    /// Endpoint coordinate labels (color is replaced by the line color).
    pub endpoint_label: TextStyle,
    /// Equation labels (color is replaced by the line color).
    pub equation_label: TextStyle,
    /// Intersection marker.
    pub intersection: MarkerStyle,
    /// Intersection label.
    pub intersection_label: TextStyle,
}

impl Theme {
    /// Light theme (white background).
    pub fn light() -> Self {
        let intersection = Color::from_rgb8(0x27, 0xae, 0x60);
        Self {
            background: Color::WHITE,
            grid: LineStyle {
                color: Color::from_rgb8(0xe0, 0xe0, 0xe0),
                width: 1.0,
            },
            axis: LineStyle {
                color: Color::from_rgb8(0x88, 0x88, 0x88),
                width: 2.0,
            },
            tick_label: TextStyle {
                color: Color::from_rgb8(0x66, 0x66, 0x66),
                size: 12.0,
                bold: false,
            },
            origin_label: TextStyle {
                color: Color::from_rgb8(0x33, 0x33, 0x33),
                size: 14.0,
                bold: true,
            },
            lines: [
                Color::from_rgb8(0xe7, 0x4c, 0x3c),
                Color::from_rgb8(0x34, 0x98, 0xdb),
            ],
            line_width: 3.0,
            endpoint: MarkerStyle {
                fill: Color::BLACK,
                radius: 6.0,
                outline: Color::WHITE,
                outline_width: 2.0,
            },
            endpoint_label: TextStyle {
                color: Color::BLACK,
                size: 12.0,
                bold: true,
            },
            equation_label: TextStyle {
                color: Color::BLACK,
                size: 14.0,
                bold: true,
            },
            intersection: MarkerStyle {
                fill: intersection,
                radius: 8.0,
                outline: Color::WHITE,
                outline_width: 3.0,
            },
            intersection_label: TextStyle {
                color: intersection,
                size: 14.0,
                bold: true,
            },
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        let background = Color::from_rgb8(0x1e, 0x1f, 0x24);
        let mut theme = Self::light();
        theme.background = background;
        theme.grid.color = Color::from_rgb8(0x33, 0x36, 0x3d);
        theme.axis.color = Color::from_rgb8(0x8a, 0x8f, 0x98);
        theme.tick_label.color = Color::from_rgb8(0x9a, 0x9f, 0xa8);
        theme.origin_label.color = Color::from_rgb8(0xd8, 0xdb, 0xe0);
        theme.endpoint.outline = background;
        theme.intersection.outline = background;
        theme
    }

    /// Copy with every stroke width, marker radius and font size multiplied.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut theme = self.clone();
        if !(factor.is_finite() && factor > 0.0) {
            return theme;
        }
        theme.grid.width *= factor;
        theme.axis.width *= factor;
        theme.line_width *= factor;
        for style in [
            &mut theme.tick_label,
            &mut theme.origin_label,
            &mut theme.endpoint_label,
            &mut theme.equation_label,
            &mut theme.intersection_label,
        ] {
            style.size *= factor;
        }
        for marker in [&mut theme.endpoint, &mut theme.intersection] {
            marker.radius *= factor;
            marker.outline_width *= factor;
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_multiplies_sizes() {
        let theme = Theme::light().scaled(2.0);
        assert_eq!(theme.line_width, 6.0);
        assert_eq!(theme.intersection.radius, 16.0);
        assert_eq!(theme.tick_label.size, 24.0);
        assert_eq!(theme.lines, Theme::light().lines);
        assert_eq!(Theme::light().scaled(f32::NAN), Theme::light());
    }
}
