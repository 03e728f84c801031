//! Render payloads and backend-agnostic draw commands.
//!
//! A [`RenderPayload`] describes, in world coordinates, everything a frame
//! shows: the grid, each line's visible segment and sample points, and the
//! intersection. [`build_render_list`] turns it into screen-space
//! [`RenderCommand`]s for a given surface size and [`Theme`]. Backends (the
//! GPUI view, the PNG rasterizer) only consume the command list.

pub mod raster;

use crate::axis::GridSpec;
use crate::clip::{Segment, clip};
use crate::geom::{Point, ScreenPoint, ScreenRect, ScreenSize};
use crate::line::{Line, LineId};
use crate::parse::format_line;
use crate::solver::{Intersection, solve};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Viewport;

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Channels as 8-bit values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Circular marker with an outline ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Fill color.
    pub fill: Color,
    /// Radius of the filled disc in pixels.
    pub radius: f32,
    /// Outline color.
    pub outline: Color,
    /// Outline width in pixels, drawn outside the disc.
    pub outline_width: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            radius: 4.0,
            outline: Color::WHITE,
            outline_width: 0.0,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::new(0.0, 0.0, 0.0, 0.0),
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Horizontal alignment of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            bold: false,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single draw call in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw circular markers.
    Points {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw text. `position` is on the baseline.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands, in painting order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// One line of a frame: the equation and what of it is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePayload {
    /// Which line this is.
    pub id: LineId,
    /// The equation.
    pub line: Line,
    /// Visible part, absent when the line is degenerate or off-screen.
    pub segment: Option<Segment>,
    /// Labelled points on the line (the segment endpoints).
    pub samples: Vec<Point>,
}

/// Everything a frame draws, in world coordinates.
///
/// Built from scratch for every frame; nothing here is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    /// Grid description.
    pub grid: GridSpec,
    /// The visible rectangle and zoom state.
    pub viewport: Viewport,
    /// Both lines.
    pub lines: [LinePayload; 2],
    /// Relationship between the lines.
    pub intersection: Intersection,
}

impl RenderPayload {
    /// Solve, clip and describe a frame.
    pub fn build(lines: &[Line; 2], viewport: &Viewport, grid_divisions: u32) -> Self {
        let describe = |id: LineId| {
            let line = lines[id.index()];
            let segment = clip(&line, viewport);
            LinePayload {
                id,
                line,
                segment,
                samples: segment
                    .map(|segment| segment.endpoints().to_vec())
                    .unwrap_or_default(),
            }
        };
        Self {
            grid: GridSpec::new(viewport.rect(), grid_divisions),
            viewport: *viewport,
            lines: [describe(LineId::First), describe(LineId::Second)],
            intersection: solve(&lines[0], &lines[1]),
        }
    }

    /// The intersection point when it is unique and visible.
    pub fn visible_intersection(&self) -> Option<Point> {
        self.intersection
            .point()
            .filter(|point| self.viewport.contains(*point))
    }
}

/// Convert a payload into screen-space draw commands.
///
/// Returns an empty list for an empty surface.
pub fn build_render_list(payload: &RenderPayload, screen: ScreenSize, theme: &Theme) -> RenderList {
    let mut render = RenderList::new();
    let Some(transform) = Transform::new(payload.viewport.rect(), screen) else {
        return render;
    };

    render.push(RenderCommand::Rect {
        rect: screen.rect(),
        style: RectStyle {
            fill: theme.background,
            stroke: theme.background,
            stroke_width: 0.0,
        },
    });

    build_grid(&mut render, payload, &transform, theme);
    for line in &payload.lines {
        build_line(&mut render, line, &transform, theme);
    }
    build_intersection(&mut render, payload, &transform, theme);

    render
}

fn build_grid(render: &mut RenderList, payload: &RenderPayload, transform: &Transform, theme: &Theme) {
    let screen = transform.screen();
    let grid = &payload.grid;
    let mut minor = Vec::new();
    let mut axes = Vec::new();
    let mut labels = Vec::new();

    for line in grid.vertical_lines() {
        let Some(at) = transform.world_to_screen(Point::new(line.value, grid.rect.origin_y)) else {
            continue;
        };
        let segment = LineSegment::new(
            ScreenPoint::new(at.x, 0.0),
            ScreenPoint::new(at.x, screen.height),
        );
        if line.is_axis {
            axes.push(segment);
        } else {
            minor.push(segment);
            labels.push(RenderCommand::Text {
                position: ScreenPoint::new(at.x, screen.height - 5.0),
                text: grid.label(line.value),
                anchor: TextAnchor::Middle,
                style: theme.tick_label,
            });
        }
    }

    for line in grid.horizontal_lines() {
        let Some(at) = transform.world_to_screen(Point::new(grid.rect.origin_x, line.value)) else {
            continue;
        };
        let segment = LineSegment::new(
            ScreenPoint::new(0.0, at.y),
            ScreenPoint::new(screen.width, at.y),
        );
        if line.is_axis {
            axes.push(segment);
        } else {
            minor.push(segment);
            labels.push(RenderCommand::Text {
                position: ScreenPoint::new(5.0, at.y - 5.0),
                text: grid.label(line.value),
                anchor: TextAnchor::Start,
                style: theme.tick_label,
            });
        }
    }

    if !minor.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: minor,
            style: theme.grid,
        });
    }
    if !axes.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: axes,
            style: theme.axis,
        });
    }
    for label in labels {
        render.push(label);
    }

    let origin = Point::new(0.0, 0.0);
    if payload.viewport.contains(origin) {
        if let Some(at) = transform.world_to_screen(origin) {
            render.push(RenderCommand::Text {
                position: ScreenPoint::new(at.x + 8.0, at.y - 8.0),
                text: "(0,0)".to_string(),
                anchor: TextAnchor::Start,
                style: theme.origin_label,
            });
        }
    }
}

fn build_line(render: &mut RenderList, payload: &LinePayload, transform: &Transform, theme: &Theme) {
    let Some(segment) = payload.segment else {
        return;
    };
    let (Some(start), Some(end)) = (
        transform.world_to_screen(segment.start),
        transform.world_to_screen(segment.end),
    ) else {
        return;
    };
    let color = theme.lines[payload.id.index()];

    render.push(RenderCommand::LineSegments {
        segments: vec![LineSegment::new(start, end)],
        style: LineStyle {
            color,
            width: theme.line_width,
        },
    });

    let samples: Vec<(Point, ScreenPoint)> = payload
        .samples
        .iter()
        .filter_map(|point| transform.world_to_screen(*point).map(|at| (*point, at)))
        .collect();

    render.push(RenderCommand::Points {
        points: samples.iter().map(|(_, at)| *at).collect(),
        style: MarkerStyle {
            fill: color,
            ..theme.endpoint
        },
    });

    for (point, at) in &samples {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(at.x + 10.0, at.y - 10.0),
            text: format!("({:.1}, {:.1})", point.x, point.y),
            anchor: TextAnchor::Start,
            style: TextStyle {
                color,
                ..theme.endpoint_label
            },
        });
    }

    let mid = start.midpoint(end);
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(mid.x + 15.0, mid.y - 15.0),
        text: format!("Line {}: {}", payload.id.number(), format_line(&payload.line)),
        anchor: TextAnchor::Start,
        style: TextStyle {
            color,
            ..theme.equation_label
        },
    });
}

fn build_intersection(
    render: &mut RenderList,
    payload: &RenderPayload,
    transform: &Transform,
    theme: &Theme,
) {
    let Some(point) = payload.visible_intersection() else {
        return;
    };
    let Some(at) = transform.world_to_screen(point) else {
        return;
    };
    render.push(RenderCommand::Points {
        points: vec![at],
        style: theme.intersection,
    });
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(at.x + 15.0, at.y - 15.0),
        text: format!("Intersection: ({:.2}, {:.2})", point.x, point.y),
        anchor: TextAnchor::Start,
        style: theme.intersection_label,
    });
}
