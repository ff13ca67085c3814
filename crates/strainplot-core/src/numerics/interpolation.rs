/// `count` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|index| start + step * index as f64).collect()
        }
    }
}

/// Resamples a row-major grid onto `rows * factor` by `cols * factor` points
/// spanning the same extent, with bilinear interpolation between nodes.
pub fn upsample_bilinear<const C: usize>(grid: &[[f64; C]], factor: usize) -> Vec<Vec<f64>> {
    let rows = grid.len();
    if rows == 0 || C == 0 || factor == 0 {
        return Vec::new();
    }

    let out_rows = rows * factor;
    let out_cols = C * factor;
    let row_positions = linspace(0.0, (rows - 1) as f64, out_rows);
    let col_positions = linspace(0.0, (C - 1) as f64, out_cols);

    row_positions
        .iter()
        .map(|&row_position| {
            let (r0, r1, rt) = bracket(row_position, rows);
            col_positions
                .iter()
                .map(|&col_position| {
                    let (c0, c1, ct) = bracket(col_position, C);
                    let top = lerp(grid[r0][c0], grid[r0][c1], ct);
                    let bottom = lerp(grid[r1][c0], grid[r1][c1], ct);
                    lerp(top, bottom, rt)
                })
                .collect()
        })
        .collect()
}

fn bracket(position: f64, len: usize) -> (usize, usize, f64) {
    if len == 1 {
        return (0, 0, 0.0);
    }
    let lower = (position.floor() as usize).min(len - 2);
    (lower, lower + 1, position - lower as f64)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::{linspace, upsample_bilinear};

    #[test]
    fn linspace_includes_both_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn upsampling_preserves_corner_nodes() {
        let grid = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let dense = upsample_bilinear(&grid, 4);

        assert_eq!(dense.len(), 8);
        assert_eq!(dense[0].len(), 12);
        assert_eq!(dense[0][0], 1.0);
        assert_eq!(dense[0][11], 3.0);
        assert_eq!(dense[7][0], 4.0);
        assert_eq!(dense[7][11], 6.0);
    }

    #[test]
    fn upsampling_is_linear_along_a_plane() {
        let grid = [[0.0, 1.0], [10.0, 11.0]];
        let dense = upsample_bilinear(&grid, 3);
        for row in &dense {
            for pair in row.windows(2) {
                assert!(pair[1] >= pair[0]);
            }
        }
        let middle = dense[2][2];
        assert!((middle - (10.0 * 0.4 + 0.4)).abs() < 1.0e-12);
    }
}
