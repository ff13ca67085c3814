mod parser;
mod writer;

pub use parser::parse_average_grid;
pub use writer::write_average_grid;

use crate::domain::{AverageGrid, PlotError, PlotResult};
use crate::modules::serialization::{read_text_input, write_text_artifact};
use std::path::Path;

pub fn read_average_grid(path: &Path) -> PlotResult<AverageGrid> {
    let source = read_text_input(path, "average grid")?;
    parse_average_grid(&source).map_err(|error| {
        PlotError::new(
            error.category(),
            error.placeholder(),
            format!("{} in '{}'", error.message(), path.display()),
        )
    })
}

pub fn write_average_grid_file(path: &Path, grid: &AverageGrid) -> PlotResult<()> {
    write_text_artifact(path, &write_average_grid(grid)).map_err(|source| {
        PlotError::io_system(
            "IO.GRID_WRITE",
            format!("failed to write average grid '{}': {}", path.display(), source),
        )
    })
}
