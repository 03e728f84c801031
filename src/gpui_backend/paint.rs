use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, FontWeight, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerStyle, RectStyle, RenderCommand, RenderList, TextAnchor,
    TextStyle,
};

/// Paint a render list whose coordinates are relative to `origin`.
pub(crate) fn paint_list(list: &RenderList, origin: ScreenPoint, window: &mut Window, cx: &mut App) {
    for command in list.commands() {
        match command {
            RenderCommand::Rect { rect, style } => {
                paint_rect(window, offset_rect(*rect, origin), *style);
            }
            RenderCommand::LineSegments { segments, style } => {
                paint_lines(window, segments, origin, *style);
            }
            RenderCommand::Points { points, style } => {
                paint_markers(window, points, origin, *style);
            }
            RenderCommand::Text {
                position,
                text,
                anchor,
                style,
            } => {
                paint_text(window, cx, offset(*position, origin), text, *anchor, style);
            }
        }
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], origin: ScreenPoint, style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        let start = offset(segment.start, origin);
        let end = offset(segment.end, origin);
        builder.move_to(point(px(start.x), px(start.y)));
        builder.line_to(point(px(end.x), px(end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_markers(window: &mut Window, points: &[ScreenPoint], origin: ScreenPoint, style: MarkerStyle) {
    let outer = style.radius + style.outline_width.max(0.0);
    for pt in points {
        let center = offset(*pt, origin);
        if style.outline_width > 0.0 {
            paint_disc(window, center, outer, style.outline);
        }
        paint_disc(window, center, style.radius, style.fill);
    }
}

fn paint_disc(window: &mut Window, center: ScreenPoint, radius: f32, color: Color) {
    let radius = radius.max(1.0);
    let bounds = Bounds::from_corners(
        point(px(center.x - radius), px(center.y - radius)),
        point(px(center.x + radius), px(center.y + radius)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    anchor: TextAnchor,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let mut text_font = font(".SystemUIFont");
    if style.bold {
        text_font.weight = FontWeight::BOLD;
    }
    let run = TextRun {
        len: text.len(),
        font: text_font,
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let x = match anchor {
        TextAnchor::Start => position.x,
        TextAnchor::Middle => position.x - f32::from(shaped.width) * 0.5,
    };
    // `position` is the baseline; shaped lines paint from their top edge.
    let y = position.y - f32::from(shaped.ascent);
    let line_height = shaped.ascent + shaped.descent;
    let _ = shaped.paint(point(px(x), px(y)), line_height, window, cx);
}

fn offset(pt: ScreenPoint, origin: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(pt.x + origin.x, pt.y + origin.y)
}

fn offset_rect(rect: ScreenRect, origin: ScreenPoint) -> ScreenRect {
    ScreenRect::new(offset(rect.min, origin), offset(rect.max, origin))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
