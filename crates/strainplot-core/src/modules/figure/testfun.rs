use super::{AXIS_LABEL_X, AXIS_LABEL_Y};
use crate::common::ColormapName;
use crate::domain::{FigureKind, PlotError, PlotResult, RenderResult};
use crate::modules::testfun::{
    sample_test_field, PlacedVectors, SamplingDomain, TestField, TestFieldParams,
};
use crate::modules::traits::FigureRenderer;
use crate::render::canvas::{draw_frame_border, draw_quiver_arrow, draw_text, fill_cell};
use crate::render::{render_svg_string, Colormap, PanelFrame, QuiverArrow};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

const CANVAS: (u32, u32) = (720, 700);
const FRAME_LEFT: f64 = 70.0;
const FRAME_TOP: f64 = 30.0;
const FRAME_SIZE: f64 = 600.0;
const COLOR_CELL_STRIDE: usize = 4;
const SHAFT_FRACTION: f64 = 0.0015;
const FIRST_FAMILY: RGBColor = RGBColor(0x1f, 0x4e, 0xc8);
const SECOND_FAMILY: RGBColor = RGBColor(0x1a, 0x96, 0x3c);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestFieldFigureOptions {
    pub params: TestFieldParams,
    pub domain: SamplingDomain,
    /// Sample stride between displacement arrows; principal vectors use
    /// twice this.
    pub stride: usize,
}

impl Default for TestFieldFigureOptions {
    fn default() -> Self {
        Self {
            params: TestFieldParams::default(),
            domain: SamplingDomain::default(),
            stride: 6,
        }
    }
}

/// Validation plot of the analytic test field.
#[derive(Debug, Clone, PartialEq)]
pub struct TestFieldFigure {
    pub options: TestFieldFigureOptions,
    pub field: TestField,
    pub principal: Vec<PlacedVectors>,
}

impl TestFieldFigure {
    pub fn build(options: TestFieldFigureOptions) -> PlotResult<Self> {
        if options.stride == 0 {
            return Err(PlotError::invalid_input(
                "INPUT.TESTFUN_STRIDE",
                "quiver stride must be at least 1",
            ));
        }
        let field = sample_test_field(options.params, options.domain)?;
        let principal = field.principal_vectors(2 * options.stride);
        debug!(principal = principal.len(), stride = options.stride, "built test field figure");
        Ok(Self {
            options,
            field,
            principal,
        })
    }

    fn frame(&self) -> PanelFrame {
        let domain = self.options.domain;
        PanelFrame {
            left: FRAME_LEFT,
            top: FRAME_TOP,
            width: FRAME_SIZE,
            height: FRAME_SIZE,
            x_range: (domain.start, domain.end),
            y_range: (domain.start, domain.end),
        }
    }

    /// Panel-width units per unit of vector magnitude, so the longest vector
    /// spans `spacing` samples.
    fn autoscale(&self, max_norm: f64, spacing: usize) -> f64 {
        let domain = self.options.domain;
        if max_norm <= 0.0 || !max_norm.is_finite() {
            return 0.0;
        }
        spacing as f64 * domain.step / (domain.end - domain.start) / max_norm
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let frame = self.frame();
        self.draw_potential(area, &frame)?;
        self.draw_displacement(area, &frame)?;
        self.draw_principal(area, &frame)?;
        draw_frame_border(area, &frame)?;

        let domain = self.options.domain;
        for (value, nudge) in [(domain.start, 0.0), (domain.end, -16.0)] {
            let (px, _) = frame.to_pixel_f64(value, domain.start);
            let (_, py) = frame.to_pixel_f64(domain.start, value);
            let text = format!("{}", value);
            draw_text(area, &text, (px + nudge, frame.bottom() + 6.0), 12)?;
            draw_text(area, &text, (frame.left - 30.0, py - 6.0), 12)?;
        }
        draw_text(
            area,
            AXIS_LABEL_X,
            (frame.left + 0.5 * frame.width, frame.bottom() + 28.0),
            16,
        )?;
        draw_text(
            area,
            AXIS_LABEL_Y,
            (frame.left - 50.0, frame.top + 0.5 * frame.height),
            16,
        )
    }

    fn draw_potential<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
    ) -> RenderResult<()> {
        let colormap = Colormap::from_name(ColormapName::PuBuGn);
        let (low, high) = self.field.potential_range();
        let span = COLOR_CELL_STRIDE as f64 * self.options.domain.step;

        for (x, y, sample) in self.field.strided(COLOR_CELL_STRIDE) {
            let color = if high > low {
                colormap.map(sample.potential, low, high)
            } else {
                colormap.at(0.5)
            };
            let x1 = (x + span).min(self.options.domain.end);
            let y1 = (y + span).min(self.options.domain.end);
            fill_cell(area, frame.to_pixel_f64(x, y1), frame.to_pixel_f64(x1, y), color)?;
        }
        Ok(())
    }

    fn draw_displacement<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
    ) -> RenderResult<()> {
        let stride = self.options.stride;
        let max_norm = self
            .field
            .strided(stride)
            .map(|(_, _, sample)| sample.displacement[0].hypot(sample.displacement[1]))
            .fold(0.0, f64::max);
        let factor = self.autoscale(max_norm, stride);
        let shaft = SHAFT_FRACTION * frame.width;

        for (x, y, sample) in self.field.strided(stride) {
            let arrow = QuiverArrow {
                anchor: [x, y],
                tail_offset: [0.0, 0.0],
                head_offset: [
                    sample.displacement[0] * factor,
                    sample.displacement[1] * factor,
                ],
                tension: true,
            };
            draw_quiver_arrow(area, frame, &arrow, shaft, BLACK)?;
        }
        Ok(())
    }

    fn draw_principal<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
    ) -> RenderResult<()> {
        let max_norm = self
            .principal
            .iter()
            .flat_map(|placed| [placed.vectors.first, placed.vectors.second])
            .map(|vector| vector[0].hypot(vector[1]))
            .filter(|norm| norm.is_finite())
            .fold(0.0, f64::max);
        let factor = self.autoscale(max_norm, 2 * self.options.stride);
        let shaft = SHAFT_FRACTION * frame.width;

        for placed in &self.principal {
            for (vector, color) in [
                (placed.vectors.first, FIRST_FAMILY),
                (placed.vectors.second, SECOND_FAMILY),
            ] {
                let arrow = QuiverArrow {
                    anchor: [placed.x, placed.y],
                    tail_offset: [0.0, 0.0],
                    head_offset: [vector[0] * factor, vector[1] * factor],
                    tension: true,
                };
                draw_quiver_arrow(area, frame, &arrow, shaft, color)?;
            }
        }
        Ok(())
    }
}

impl FigureRenderer for TestFieldFigure {
    fn kind(&self) -> FigureKind {
        FigureKind::TestField
    }

    fn render_svg(&self) -> RenderResult<String> {
        render_svg_string(CANVAS, |area| self.draw(area))
    }
}
