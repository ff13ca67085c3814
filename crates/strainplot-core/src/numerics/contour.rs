//! Marching-squares iso-lines over a row-major grid of samples.

/// One straight piece of an iso-line, as two `[x, y]` points.
pub type IsoSegment = [[f64; 2]; 2];

// Cell edges: 0 top (c0-c1), 1 right (c1-c2), 2 bottom (c2-c3), 3 left (c3-c0).
const EDGE_CORNERS: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// Segments where the piecewise-linear surface through `values` crosses
/// `level`. `values[row][col]` sits at `(xs[col], ys[row])`; cells with a
/// non-finite corner are skipped. Saddle cells are resolved by the mean of
/// their four corners.
pub fn iso_segments(values: &[Vec<f64>], xs: &[f64], ys: &[f64], level: f64) -> Vec<IsoSegment> {
    let mut segments = Vec::new();
    let rows = values.len().min(ys.len());

    for row in 0..rows.saturating_sub(1) {
        let (upper, lower) = (&values[row], &values[row + 1]);
        let cols = xs.len().min(upper.len()).min(lower.len());
        for col in 0..cols.saturating_sub(1) {
            let corners = [
                ([xs[col], ys[row]], upper[col]),
                ([xs[col + 1], ys[row]], upper[col + 1]),
                ([xs[col + 1], ys[row + 1]], lower[col + 1]),
                ([xs[col], ys[row + 1]], lower[col]),
            ];
            if corners.iter().any(|(_, value)| !value.is_finite()) {
                continue;
            }

            let case = corners
                .iter()
                .enumerate()
                .filter(|(_, (_, value))| *value > level)
                .fold(0usize, |case, (index, _)| case | (1 << index));
            let centre_above = corners.iter().map(|(_, value)| value).sum::<f64>() / 4.0 > level;

            for (from, to) in edge_pairs(case, centre_above) {
                segments.push([
                    crossing(&corners, from, level),
                    crossing(&corners, to, level),
                ]);
            }
        }
    }
    segments
}

fn edge_pairs(case: usize, centre_above: bool) -> Vec<(usize, usize)> {
    match case {
        1 | 14 => vec![(3, 0)],
        2 | 13 => vec![(0, 1)],
        3 | 12 => vec![(3, 1)],
        4 | 11 => vec![(1, 2)],
        6 | 9 => vec![(0, 2)],
        7 | 8 => vec![(3, 2)],
        5 if centre_above => vec![(0, 1), (2, 3)],
        5 => vec![(3, 0), (1, 2)],
        10 if centre_above => vec![(3, 0), (1, 2)],
        10 => vec![(0, 1), (2, 3)],
        _ => Vec::new(),
    }
}

fn crossing(corners: &[([f64; 2], f64); 4], edge: usize, level: f64) -> [f64; 2] {
    let (a, b) = EDGE_CORNERS[edge];
    let ((pa, va), (pb, vb)) = (corners[a], corners[b]);
    let t = (level - va) / (vb - va);
    [pa[0] + (pb[0] - pa[0]) * t, pa[1] + (pb[1] - pa[1]) * t]
}

#[cfg(test)]
mod tests {
    use super::iso_segments;

    #[test]
    fn ramp_along_x_gives_one_vertical_segment_per_cell_row() {
        let values = vec![vec![0.0, 1.0, 2.0]; 3];
        let coords = [0.0, 1.0, 2.0];
        let segments = iso_segments(&values, &coords, &coords, 0.5);

        assert_eq!(segments.len(), 2);
        for [start, end] in segments {
            assert_eq!(start[0], 0.5);
            assert_eq!(end[0], 0.5);
            assert_eq!((start[1] - end[1]).abs(), 1.0);
        }
    }

    #[test]
    fn saddle_cell_yields_two_segments() {
        let values = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let coords = [0.0, 1.0];
        assert_eq!(iso_segments(&values, &coords, &coords, 0.5).len(), 2);
        assert_eq!(iso_segments(&values, &coords, &coords, 0.4).len(), 2);
    }

    #[test]
    fn levels_outside_the_data_or_flat_cells_give_nothing() {
        let values = vec![vec![3.01; 4]; 4];
        let coords = [0.0, 0.25, 0.5, 0.75];
        assert!(iso_segments(&values, &coords, &coords, 3.0).is_empty());
        assert!(iso_segments(&values, &coords, &coords, 3.05).is_empty());
        assert!(iso_segments(&values, &coords, &coords, 3.01).is_empty());
    }

    #[test]
    fn cells_touching_nan_are_skipped() {
        let values = vec![vec![0.0, 1.0, f64::NAN], vec![0.0, 1.0, 2.0]];
        let coords = [0.0, 1.0, 2.0];
        let segments = iso_segments(&values, &coords, &coords, 0.5);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0][0][0], 0.5);
    }
}
