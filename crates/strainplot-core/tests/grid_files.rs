use strainplot_core::common::{SCALAR_GRID_HEADER, STIMULUS_HEADER, TENSOR_GRID_HEADER};
use strainplot_core::domain::{
    AverageGrid, PlotErrorCategory, PrincipalStrain, ScalarGrid, TensorGrid, GRID_COLUMNS,
    GRID_ROWS,
};
use strainplot_core::modules::{read_average_grid, write_average_grid, write_average_grid_file};
use std::fs;
use tempfile::TempDir;

fn varied_grid() -> AverageGrid {
    let mut scalar = [[0.0; GRID_COLUMNS]; GRID_ROWS];
    let mut cells = [[PrincipalStrain::default(); GRID_COLUMNS]; GRID_ROWS];
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLUMNS {
            let index = (row * GRID_COLUMNS + col) as f64;
            scalar[row][col] = 3.0 + index / 1024.0;
            let angle = index * 0.1;
            cells[row][col] = PrincipalStrain::from_values([
                angle.cos(),
                angle.sin(),
                -angle.sin(),
                angle.cos(),
                0.01 * (index - 20.0),
                -1.0e-3 * index,
            ]);
        }
    }
    AverageGrid {
        scalar: ScalarGrid::new(scalar),
        strain: TensorGrid::new(cells),
        stimuli: vec![[0.125, 0.5], [0.875, 0.25], [0.5, 1.0]],
    }
}

#[test]
fn grid_file_survives_write_and_read() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("nested/avg-grid-T6.csv");
    let grid = varied_grid();

    write_average_grid_file(&path, &grid).expect("grid should be written");
    let loaded = read_average_grid(&path).expect("grid should be read back");
    assert_eq!(loaded, grid);
}

#[test]
fn written_file_has_three_blocks_in_order() {
    let text = write_average_grid(&varied_grid());
    let lines = text.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], SCALAR_GRID_HEADER);
    assert_eq!(lines[1 + GRID_ROWS], TENSOR_GRID_HEADER);
    assert_eq!(lines[2 + 2 * GRID_ROWS], STIMULUS_HEADER);
    assert_eq!(lines.len(), 3 + 2 * GRID_ROWS + 3);
    assert_eq!(lines[1].split(',').count(), GRID_COLUMNS);
    assert!(lines[2 + GRID_ROWS].starts_with('('));
}

#[test]
fn truncated_file_reports_malformed_file_with_path() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("avg-grid-G2.csv");
    let text = write_average_grid(&varied_grid());
    let truncated = text.lines().take(5).collect::<Vec<_>>().join("\n");
    fs::write(&path, truncated).expect("fixture should be written");

    let error = read_average_grid(&path).expect_err("truncated grid should fail");
    assert_eq!(error.category(), PlotErrorCategory::MalformedFileError);
    assert_eq!(error.exit_code(), 3);
    assert!(error.message().contains("avg-grid-G2.csv"));
}

#[test]
fn missing_file_reports_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let error = read_average_grid(&temp.path().join("absent.csv"))
        .expect_err("missing grid should fail");
    assert_eq!(error.category(), PlotErrorCategory::IoSystemError);
    assert_eq!(error.placeholder(), "IO.INPUT_READ");
}
