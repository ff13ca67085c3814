//! Backend-independent geometry for the figure elements.

use crate::domain::ConfidenceEllipse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// `(on, off)` pattern in pixels; `None` draws a continuous line.
    pub const fn dash_pattern(self) -> Option<(f64, f64)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((7.0, 4.0)),
            Self::Dotted => Some((1.5, 3.0)),
        }
    }

    pub const fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => Self::Solid,
            1 => Self::Dashed,
            _ => Self::Dotted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Dot,
    Cross,
    Plus,
}

impl MarkerShape {
    pub const fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => Self::Dot,
            1 => Self::Cross,
            _ => Self::Plus,
        }
    }
}

/// Unfilled ellipse as handed to the renderer: full extents and a rotation
/// in degrees, counter-clockwise in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePatch {
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub angle_degrees: f64,
    pub style: LineStyle,
}

impl EllipsePatch {
    pub fn from_ellipse(ellipse: &ConfidenceEllipse, style: LineStyle) -> Self {
        Self {
            center: [ellipse.center_x, ellipse.center_y],
            width: 2.0 * ellipse.semi_major,
            height: 2.0 * ellipse.semi_minor,
            angle_degrees: ellipse.rotation.to_degrees(),
            style,
        }
    }

    /// Closed outline in data coordinates; the first point is repeated last.
    pub fn outline(&self, segments: usize) -> Vec<[f64; 2]> {
        let segments = segments.max(4);
        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();
        let (a, b) = (0.5 * self.width, 0.5 * self.height);
        (0..=segments)
            .map(|index| {
                let t = std::f64::consts::TAU * (index % segments) as f64 / segments as f64;
                let (px, py) = (a * t.cos(), b * t.sin());
                [
                    self.center[0] + px * cos - py * sin,
                    self.center[1] + px * sin + py * cos,
                ]
            })
            .collect()
    }
}

/// One quiver arrow anchored at a data point. Offsets are in panel-width
/// units with y pointing up on screen, independent of axis orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuiverArrow {
    pub anchor: [f64; 2],
    pub tail_offset: [f64; 2],
    pub head_offset: [f64; 2],
    pub tension: bool,
}

/// The two arrows drawn for one principal pair: `lambda * direction` and its
/// negation. Tension pivots on the tail so the pair points outward;
/// compression pivots on the tip so the pair points inward.
pub fn principal_arrows(
    anchor: [f64; 2],
    direction: [f64; 2],
    lambda: f64,
    scale: f64,
) -> [QuiverArrow; 2] {
    let scaled = [
        direction[0] * lambda / scale,
        direction[1] * lambda / scale,
    ];
    let pivot_tail = lambda >= 0.0;
    let tension = lambda > 0.0;

    [scaled, [-scaled[0], -scaled[1]]].map(|vector| {
        if pivot_tail {
            QuiverArrow {
                anchor,
                tail_offset: [0.0, 0.0],
                head_offset: vector,
                tension,
            }
        } else {
            QuiverArrow {
                anchor,
                tail_offset: [-vector[0], -vector[1]],
                head_offset: [0.0, 0.0],
                tension,
            }
        }
    })
}

/// Splits a polyline into the visible pieces of an `(on, off)` dash pattern.
pub fn dash_segments(points: &[(f64, f64)], on: f64, off: f64) -> Vec<Vec<(f64, f64)>> {
    let mut pieces = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return pieces;
    }

    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut remaining = on;

    for pair in points.windows(2) {
        let (mut x0, mut y0) = pair[0];
        let (x1, y1) = pair[1];
        let mut length = (x1 - x0).hypot(y1 - y0);

        while length > remaining {
            let t = remaining / length;
            let split = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            if drawing {
                current.push(split);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![split];
            }
            length -= remaining;
            (x0, y0) = split;
            drawing = !drawing;
            remaining = if drawing { on } else { off };
        }

        remaining -= length;
        if drawing {
            current.push((x1, y1));
        }
    }

    if drawing && current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::{dash_segments, principal_arrows, EllipsePatch, LineStyle, MarkerShape};
    use crate::domain::ConfidenceEllipse;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn ellipse_patch_passes_through_full_extents_and_degrees() {
        let ellipse = ConfidenceEllipse {
            center_x: 0.4,
            center_y: 0.6,
            semi_major: 0.2,
            semi_minor: 0.05,
            rotation: FRAC_PI_4,
        };
        let patch = EllipsePatch::from_ellipse(&ellipse, LineStyle::Dashed);

        assert_eq!(patch.center, [0.4, 0.6]);
        assert_eq!(patch.width, 0.4);
        assert_eq!(patch.height, 0.1);
        assert!((patch.angle_degrees - 45.0).abs() < 1.0e-12);
        assert_eq!(patch.style, LineStyle::Dashed);
    }

    #[test]
    fn outline_is_closed_and_rotated() {
        let patch = EllipsePatch {
            center: [1.0, 2.0],
            width: 4.0,
            height: 2.0,
            angle_degrees: 90.0,
            style: LineStyle::Solid,
        };
        let outline = patch.outline(8);

        assert_eq!(outline.len(), 9);
        assert_eq!(outline[0], outline[8]);
        // The major axis end is rotated from +x onto +y.
        assert!((outline[0][0] - 1.0).abs() < 1.0e-12);
        assert!((outline[0][1] - 4.0).abs() < 1.0e-12);
    }

    #[test]
    fn tension_arrows_pivot_on_tail() {
        let arrows = principal_arrows([0.5, 0.5], [1.0, 0.0], 0.26, 1.3);
        for arrow in &arrows {
            assert_eq!(arrow.tail_offset, [0.0, 0.0]);
            assert!(arrow.tension);
        }
        assert!((arrows[0].head_offset[0] - 0.2).abs() < 1.0e-12);
        assert!((arrows[1].head_offset[0] + 0.2).abs() < 1.0e-12);
    }

    #[test]
    fn compression_arrows_pivot_on_tip_and_point_inward() {
        let arrows = principal_arrows([0.5, 0.5], [0.0, 1.0], -0.13, 1.3);
        for arrow in &arrows {
            assert_eq!(arrow.head_offset, [0.0, 0.0]);
            assert!(!arrow.tension);
        }
        // Tails sit outside the anchor on both sides.
        assert!((arrows[0].tail_offset[1] - 0.1).abs() < 1.0e-12);
        assert!((arrows[1].tail_offset[1] + 0.1).abs() < 1.0e-12);
    }

    #[test]
    fn zero_magnitude_counts_as_compression_color_with_tail_pivot() {
        let arrows = principal_arrows([0.0, 0.0], [1.0, 0.0], 0.0, 1.0);
        assert!(!arrows[0].tension);
        assert_eq!(arrows[0].tail_offset, [0.0, 0.0]);
    }

    #[test]
    fn dashes_cover_expected_fraction_of_line() {
        let pieces = dash_segments(&[(0.0, 0.0), (22.0, 0.0)], 7.0, 4.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], vec![(0.0, 0.0), (7.0, 0.0)]);
        assert_eq!(pieces[1], vec![(11.0, 0.0), (18.0, 0.0)]);
    }

    #[test]
    fn dashes_continue_across_polyline_corners() {
        let pieces = dash_segments(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)], 7.0, 100.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0], vec![(0.0, 0.0), (5.0, 0.0), (5.0, 2.0)]);
    }

    #[test]
    fn styles_and_markers_cycle_in_site_order() {
        assert_eq!(LineStyle::cycle(0), LineStyle::Solid);
        assert_eq!(LineStyle::cycle(1), LineStyle::Dashed);
        assert_eq!(LineStyle::cycle(5), LineStyle::Dotted);
        assert_eq!(MarkerShape::cycle(2), MarkerShape::Plus);
        assert_eq!(LineStyle::Solid.dash_pattern(), None);
    }
}
