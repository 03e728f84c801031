//! Software rasterizer for [`RenderList`]s.
//!
//! Used for PNG export, where no GPU surface is available. Strokes and markers
//! are drawn with coverage-based anti-aliasing and alpha-blended onto the
//! buffer. Text commands are skipped.

use image::{Rgba, RgbaImage};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineSegment, MarkerStyle, RenderCommand, RenderList};

/// Rasterize a render list onto a new image of the given size.
pub fn rasterize(list: &RenderList, width: u32, height: u32, background: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8()));
    for command in list.commands() {
        match command {
            RenderCommand::Rect { rect, style } => {
                fill_rect(&mut image, *rect, style.fill);
            }
            RenderCommand::LineSegments { segments, style } => {
                for segment in segments {
                    stroke_segment(&mut image, segment, style.width, style.color);
                }
            }
            RenderCommand::Points { points, style } => {
                for point in points {
                    draw_marker(&mut image, *point, style);
                }
            }
            RenderCommand::Text { .. } => {}
        }
    }
    image
}

/// Blend `color` into the pixel at `(x, y)` with extra `coverage` in `0..=1`.
fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = (color.a * coverage).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let [r, g, b, a] = color.to_rgba8();
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    let keep = 1.0 - alpha;
    for (channel, source) in pixel.0.iter_mut().zip([r, g, b]) {
        *channel = (*channel as f32 * keep + source as f32 * alpha).round() as u8;
    }
    pixel.0[3] = pixel.0[3].max((a as f32 * coverage).round() as u8);
}

fn fill_rect(image: &mut RgbaImage, rect: ScreenRect, color: Color) {
    if !rect.is_valid() || color.a <= 0.0 {
        return;
    }
    let x0 = rect.min.x.floor().max(0.0) as i64;
    let y0 = rect.min.y.floor().max(0.0) as i64;
    let x1 = (rect.max.x.ceil() as i64).min(image.width() as i64);
    let y1 = (rect.max.y.ceil() as i64).min(image.height() as i64);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(image, x, y, color, 1.0);
        }
    }
}

fn stroke_segment(image: &mut RgbaImage, segment: &LineSegment, width: f32, color: Color) {
    if !(width.is_finite() && width > 0.0) {
        return;
    }
    let half = width * 0.5;
    let (start, end) = (segment.start, segment.end);
    let reach = half + 1.0;
    let x0 = (start.x.min(end.x) - reach).floor().max(0.0) as i64;
    let y0 = (start.y.min(end.y) - reach).floor().max(0.0) as i64;
    let x1 = ((start.x.max(end.x) + reach).ceil() as i64).min(image.width() as i64 - 1);
    let y1 = ((start.y.max(end.y) + reach).ceil() as i64).min(image.height() as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = ScreenPoint::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_segment(center, start, end);
            let coverage = (half + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(image, x, y, color, coverage);
            }
        }
    }
}

fn draw_marker(image: &mut RgbaImage, center: ScreenPoint, style: &MarkerStyle) {
    if style.outline_width > 0.0 {
        fill_disc(image, center, style.radius + style.outline_width, style.outline);
    }
    fill_disc(image, center, style.radius, style.fill);
}

fn fill_disc(image: &mut RgbaImage, center: ScreenPoint, radius: f32, color: Color) {
    if !(radius.is_finite() && radius > 0.0) {
        return;
    }
    let reach = radius + 1.0;
    let x0 = (center.x - reach).floor().max(0.0) as i64;
    let y0 = (center.y - reach).floor().max(0.0) as i64;
    let x1 = ((center.x + reach).ceil() as i64).min(image.width() as i64 - 1);
    let y1 = ((center.y + reach).ceil() as i64).min(image.height() as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let distance = ScreenPoint::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(image, x, y, color, coverage);
            }
        }
    }
}

fn distance_to_segment(point: ScreenPoint, start: ScreenPoint, end: ScreenPoint) -> f32 {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(ScreenPoint::new(start.x + t * dx, start.y + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineStyle;

    #[test]
    fn background_fills_image() {
        let image = rasterize(&RenderList::new(), 4, 3, Color::WHITE);
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|pixel| pixel.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn horizontal_stroke_covers_its_row() {
        let mut list = RenderList::new();
        list.push(RenderCommand::LineSegments {
            segments: vec![LineSegment::new(
                ScreenPoint::new(0.0, 10.5),
                ScreenPoint::new(20.0, 10.5),
            )],
            style: LineStyle {
                color: Color::BLACK,
                width: 1.0,
            },
        });
        let image = rasterize(&list, 20, 20, Color::WHITE);
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(10, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn marker_outline_surrounds_fill() {
        let mut list = RenderList::new();
        list.push(RenderCommand::Points {
            points: vec![ScreenPoint::new(15.0, 15.0)],
            style: MarkerStyle {
                fill: Color::from_rgb8(255, 0, 0),
                radius: 4.0,
                outline: Color::BLACK,
                outline_width: 3.0,
            },
        });
        let image = rasterize(&list, 30, 30, Color::WHITE);
        assert_eq!(image.get_pixel(15, 15).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(15, 9).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(15, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn offscreen_geometry_is_ignored() {
        let mut list = RenderList::new();
        list.push(RenderCommand::Points {
            points: vec![ScreenPoint::new(-100.0, -100.0)],
            style: MarkerStyle::default(),
        });
        let image = rasterize(&list, 5, 5, Color::WHITE);
        assert!(image.pixels().all(|pixel| pixel.0 == [255, 255, 255, 255]));
    }
}
