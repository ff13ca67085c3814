use super::shapes::{dash_segments, EllipsePatch, LineStyle, MarkerShape, QuiverArrow};
use crate::domain::{PlotError, RenderResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;

const ELLIPSE_SEGMENTS: usize = 180;
const ARROW_HEAD_LENGTH: f64 = 4.5;
const ARROW_HEAD_WIDTH: f64 = 3.0;

pub(crate) fn render_error<E: Display>(error: E) -> PlotError {
    PlotError::render("RENDER.SVG_BACKEND", format!("SVG drawing failed: {}", error))
}

/// Maps one panel's data coordinates onto a pixel rectangle. Either axis can
/// run backwards (e.g. `y_range = (1.0, 0.0)` puts 1 at the bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Data x at the left and right edges.
    pub x_range: (f64, f64),
    /// Data y at the bottom and top edges.
    pub y_range: (f64, f64),
}

impl PanelFrame {
    pub fn to_pixel_f64(&self, x: f64, y: f64) -> (f64, f64) {
        let fx = (x - self.x_range.0) / (self.x_range.1 - self.x_range.0);
        let fy = (y - self.y_range.0) / (self.y_range.1 - self.y_range.0);
        (self.left + fx * self.width, self.top + (1.0 - fy) * self.height)
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (i32, i32) {
        let (px, py) = self.to_pixel_f64(x, y);
        (px.round() as i32, py.round() as i32)
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn contains_pixel(&self, (px, py): (f64, f64)) -> bool {
        px >= self.left && px <= self.right() && py >= self.top && py <= self.bottom()
    }
}

pub(crate) fn font(size: u32) -> TextStyle<'static> {
    ("sans-serif", size).into_font().into()
}

pub(crate) fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    position: (f64, f64),
    size: u32,
) -> RenderResult<()> {
    area.draw(&Text::new(
        text.to_string(),
        (position.0.round() as i32, position.1.round() as i32),
        font(size),
    ))
    .map_err(render_error)
}

pub(crate) fn draw_polyline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    line: LineStyle,
    style: ShapeStyle,
) -> RenderResult<()> {
    let pieces = match line.dash_pattern() {
        None => vec![points.to_vec()],
        Some((on, off)) => dash_segments(points, on, off),
    };
    for piece in pieces {
        let pixels = piece
            .iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect::<Vec<_>>();
        area.draw(&PathElement::new(pixels, style))
            .map_err(render_error)?;
    }
    Ok(())
}

pub(crate) fn draw_frame_border<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
) -> RenderResult<()> {
    let corners = [
        (frame.left, frame.top),
        (frame.right(), frame.top),
        (frame.right(), frame.bottom()),
        (frame.left, frame.bottom()),
        (frame.left, frame.top),
    ];
    draw_polyline(area, &corners, LineStyle::Solid, BLACK.stroke_width(1))
}

pub(crate) fn draw_ellipse<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    patch: &EllipsePatch,
) -> RenderResult<()> {
    let outline = patch
        .outline(ELLIPSE_SEGMENTS)
        .into_iter()
        .map(|[x, y]| frame.to_pixel_f64(x, y))
        .collect::<Vec<_>>();
    draw_polyline(area, &outline, patch.style, BLACK.stroke_width(1))
}

pub(crate) fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    center: (f64, f64),
    shape: MarkerShape,
    color: RGBColor,
) -> RenderResult<()> {
    let (cx, cy) = (center.0.round() as i32, center.1.round() as i32);
    let stroke = color.stroke_width(1);
    match shape {
        MarkerShape::Dot => area
            .draw(&Circle::new((cx, cy), 2, color.filled()))
            .map_err(render_error),
        MarkerShape::Cross => {
            area.draw(&PathElement::new(vec![(cx - 3, cy - 3), (cx + 3, cy + 3)], stroke))
                .map_err(render_error)?;
            area.draw(&PathElement::new(vec![(cx - 3, cy + 3), (cx + 3, cy - 3)], stroke))
                .map_err(render_error)
        }
        MarkerShape::Plus => {
            area.draw(&PathElement::new(vec![(cx - 4, cy), (cx + 4, cy)], stroke))
                .map_err(render_error)?;
            area.draw(&PathElement::new(vec![(cx, cy - 4), (cx, cy + 4)], stroke))
                .map_err(render_error)
        }
    }
}

/// Draws an arrow whose offsets are scaled by the frame width; offset y
/// points up on screen.
pub(crate) fn draw_quiver_arrow<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    arrow: &QuiverArrow,
    shaft_width: f64,
    color: RGBColor,
) -> RenderResult<()> {
    let (ax, ay) = frame.to_pixel_f64(arrow.anchor[0], arrow.anchor[1]);
    let screen = |offset: [f64; 2]| (ax + offset[0] * frame.width, ay - offset[1] * frame.width);
    let tail = screen(arrow.tail_offset);
    let head = screen(arrow.head_offset);

    let (dx, dy) = (head.0 - tail.0, head.1 - tail.1);
    let length = dx.hypot(dy);
    if length < 0.5 {
        return Ok(());
    }
    let (ux, uy) = (dx / length, dy / length);
    let head_length = ARROW_HEAD_LENGTH.min(0.5 * length);
    let base = (head.0 - ux * head_length, head.1 - uy * head_length);

    let stroke = color.stroke_width(shaft_width.round().max(1.0) as u32);
    area.draw(&PathElement::new(
        vec![
            (tail.0.round() as i32, tail.1.round() as i32),
            (base.0.round() as i32, base.1.round() as i32),
        ],
        stroke,
    ))
    .map_err(render_error)?;

    let half = ARROW_HEAD_WIDTH.max(shaft_width);
    let head_points = vec![
        (head.0.round() as i32, head.1.round() as i32),
        (
            (base.0 - uy * half).round() as i32,
            (base.1 + ux * half).round() as i32,
        ),
        (
            (base.0 + uy * half).round() as i32,
            (base.1 - ux * half).round() as i32,
        ),
    ];
    area.draw(&Polygon::new(head_points, color.filled()))
        .map_err(render_error)
}

pub(crate) fn fill_cell<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    top_left: (f64, f64),
    bottom_right: (f64, f64),
    color: RGBColor,
) -> RenderResult<()> {
    area.draw(&Rectangle::new(
        [
            (top_left.0.floor() as i32, top_left.1.floor() as i32),
            (bottom_right.0.ceil() as i32, bottom_right.1.ceil() as i32),
        ],
        color.filled(),
    ))
    .map_err(render_error)
}
