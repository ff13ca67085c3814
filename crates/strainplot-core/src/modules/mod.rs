pub mod ellipse;
pub mod figure;
pub mod grid;
pub mod scatter;
pub mod serialization;
pub mod testfun;

mod traits;

pub use ellipse::{compute_confidence_ellipse, confidence_ellipse_for};
pub use figure::{write_figure, GridFigure, ScatterFigure, TestFieldFigure, TestFieldFigureOptions};
pub use grid::{parse_average_grid, read_average_grid, write_average_grid, write_average_grid_file};
pub use scatter::{parse_scatter_source, read_scatter_file};
pub use testfun::{sample_test_field, SamplingDomain, TestField, TestFieldParams};
pub use traits::FigureRenderer;
