use crate::common::{SCALAR_GRID_HEADER, STIMULUS_HEADER, TENSOR_GRID_HEADER};
use crate::domain::AverageGrid;

/// Renders an [`AverageGrid`] in the format read by
/// [`super::parse_average_grid`]. Floats use the shortest representation that
/// parses back to the same bits.
pub fn write_average_grid(grid: &AverageGrid) -> String {
    let mut out = String::new();

    out.push_str(SCALAR_GRID_HEADER);
    out.push('\n');
    for row in grid.scalar.rows() {
        let fields = row.iter().map(f64::to_string).collect::<Vec<_>>();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out.push_str(TENSOR_GRID_HEADER);
    out.push('\n');
    for row in grid.strain.rows() {
        let cells = row
            .iter()
            .map(|cell| {
                let values = cell.to_values().map(|value| value.to_string());
                format!("({})", values.join(";"))
            })
            .collect::<Vec<_>>();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out.push_str(STIMULUS_HEADER);
    out.push('\n');
    for [u, v] in &grid.stimuli {
        out.push_str(&format!("{},{}\n", u, v));
    }

    out
}
