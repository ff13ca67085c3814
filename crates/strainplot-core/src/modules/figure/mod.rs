mod grids;
mod scatter;
mod testfun;

pub use grids::{GridFigure, GridPanel};
pub use scatter::{ScatterFigure, ScatterPanel, SiteLayer};
pub use testfun::{TestFieldFigure, TestFieldFigureOptions};

use super::serialization::write_text_artifact;
use super::traits::FigureRenderer;
use crate::domain::{PlotError, PlotResult};
use std::path::Path;
use tracing::info;

pub(crate) const AXIS_LABEL_X: &str = "ξ¹";
pub(crate) const AXIS_LABEL_Y: &str = "ξ²";

/// Renders `figure` and writes it to `path`, creating parent directories.
pub fn write_figure(figure: &dyn FigureRenderer, path: &Path) -> PlotResult<()> {
    let svg = figure.render_svg()?;
    write_text_artifact(path, &svg).map_err(|source| {
        PlotError::io_system(
            "IO.FIGURE_WRITE",
            format!(
                "failed to write {} figure '{}': {}",
                figure.kind(),
                path.display(),
                source
            ),
        )
    })?;
    info!(figure = %figure.kind(), path = %path.display(), bytes = svg.len(), "wrote figure");
    Ok(())
}
