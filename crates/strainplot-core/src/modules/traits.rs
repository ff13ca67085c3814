use crate::domain::{FigureKind, RenderResult};

/// A figure that can be rendered to a standalone SVG document.
pub trait FigureRenderer {
    fn kind(&self) -> FigureKind;

    fn render_svg(&self) -> RenderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::FigureRenderer;
    use crate::domain::{FigureKind, PlotError, PlotErrorCategory, RenderResult};
    use crate::modules::figure::write_figure;
    use tempfile::TempDir;

    struct FailingFigure;

    impl FigureRenderer for FailingFigure {
        fn kind(&self) -> FigureKind {
            FigureKind::Scatter
        }

        fn render_svg(&self) -> RenderResult<String> {
            Err(PlotError::render("RENDER.TEST", "figure rendering failed"))
        }
    }

    #[test]
    fn write_figure_propagates_render_errors_without_writing() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("figure.svg");

        let error = write_figure(&FailingFigure, &path).expect_err("render should fail");
        assert_eq!(error.category(), PlotErrorCategory::RenderError);
        assert_eq!(error.placeholder(), "RENDER.TEST");
        assert!(!path.exists());
    }
}
