use super::{AXIS_LABEL_X, AXIS_LABEL_Y};
use crate::common::{ScatterFigureSettings, GRID_PANEL_ASPECT};
use crate::domain::{
    ConfidenceEllipse, FigureKind, PlotError, PlotResult, RenderResult, SiteSamples,
};
use crate::modules::ellipse::confidence_ellipse_for;
use crate::modules::traits::FigureRenderer;
use crate::render::canvas::{
    draw_ellipse, draw_frame_border, draw_marker, draw_polyline, draw_text,
};
use crate::render::{render_svg_string, EllipsePatch, LineStyle, MarkerShape, PanelFrame};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

const CANVAS: (u32, u32) = (1200, 600);
const PANEL_WIDTH: f64 = 480.0;
const PANEL_LEFT: f64 = 90.0;
const PANEL_GAP: f64 = 70.0;
const PANEL_TOP: f64 = 60.0;
const TICKS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// One site's points, marker and 95% ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayer {
    pub label: String,
    pub points: Vec<[f64; 2]>,
    pub marker: MarkerShape,
    pub ellipse: ConfidenceEllipse,
    pub patch: EllipsePatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub layers: Vec<SiteLayer>,
    pub legend_at_bottom: bool,
}

/// Side-by-side scatter panels of maximum-I1 locations with confidence
/// ellipses, one panel per site family.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub panels: Vec<ScatterPanel>,
}

impl ScatterFigure {
    pub fn build(samples: &SiteSamples, settings: &ScatterFigureSettings) -> PlotResult<Self> {
        let mut panels = Vec::with_capacity(settings.panels.len());
        for (panel_index, sites) in settings.panels.iter().enumerate() {
            let mut layers = Vec::with_capacity(sites.len());
            for (site_index, site) in sites.iter().enumerate() {
                let sample = samples.get(site).ok_or_else(|| {
                    PlotError::invalid_input(
                        "INPUT.SCATTER_SITE",
                        format!(
                            "site '{}' has no rows in the scatter file (found: {})",
                            site,
                            samples.site_labels().collect::<Vec<_>>().join(", ")
                        ),
                    )
                })?;
                let ellipse = confidence_ellipse_for(sample).map_err(|error| {
                    PlotError::new(
                        error.category(),
                        error.placeholder(),
                        format!("site '{}': {}", site, error.message()),
                    )
                })?;
                debug!(site = %site, ?ellipse, "site ellipse");

                layers.push(SiteLayer {
                    label: site.clone(),
                    points: sample
                        .xs
                        .iter()
                        .zip(&sample.ys)
                        .map(|(x, y)| [*x, *y])
                        .collect(),
                    marker: MarkerShape::cycle(site_index),
                    ellipse,
                    patch: EllipsePatch::from_ellipse(&ellipse, LineStyle::cycle(site_index)),
                });
            }
            panels.push(ScatterPanel {
                layers,
                legend_at_bottom: panel_index == 0,
            });
        }
        Ok(Self { panels })
    }

    fn frame(index: usize) -> PanelFrame {
        PanelFrame {
            left: PANEL_LEFT + index as f64 * (PANEL_WIDTH + PANEL_GAP),
            top: PANEL_TOP,
            width: PANEL_WIDTH,
            height: PANEL_WIDTH * GRID_PANEL_ASPECT,
            x_range: (0.0, 1.0),
            y_range: (1.0, 0.0),
        }
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        for (index, panel) in self.panels.iter().enumerate() {
            let frame = Self::frame(index);
            draw_frame_border(area, &frame)?;
            draw_ticks(area, &frame, index == 0)?;

            for layer in &panel.layers {
                for [x, y] in &layer.points {
                    let pixel = frame.to_pixel_f64(*x, *y);
                    if frame.contains_pixel(pixel) {
                        draw_marker(area, pixel, layer.marker, BLACK)?;
                    }
                }
                draw_ellipse(area, &frame, &layer.patch)?;
            }

            draw_legend(area, &frame, panel)?;
            draw_text(
                area,
                AXIS_LABEL_X,
                (frame.left + 0.5 * frame.width, frame.bottom() + 30.0),
                16,
            )?;
            if index == 0 {
                draw_text(
                    area,
                    AXIS_LABEL_Y,
                    (frame.left - 60.0, frame.top + 0.5 * frame.height),
                    16,
                )?;
            }
        }
        Ok(())
    }
}

impl FigureRenderer for ScatterFigure {
    fn kind(&self) -> FigureKind {
        FigureKind::Scatter
    }

    fn render_svg(&self) -> RenderResult<String> {
        render_svg_string(CANVAS, |area| self.draw(area))
    }
}

fn draw_ticks<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    label_y: bool,
) -> RenderResult<()> {
    for tick in TICKS {
        let (px, bottom) = frame.to_pixel_f64(tick, 1.0);
        draw_polyline(
            area,
            &[(px, bottom), (px, bottom - 5.0)],
            LineStyle::Solid,
            BLACK.stroke_width(1),
        )?;
        draw_text(area, &format!("{:.1}", tick), (px - 8.0, bottom + 6.0), 12)?;

        let (left, py) = frame.to_pixel_f64(0.0, tick);
        draw_polyline(
            area,
            &[(left, py), (left + 5.0, py)],
            LineStyle::Solid,
            BLACK.stroke_width(1),
        )?;
        if label_y {
            draw_text(area, &format!("{:.1}", tick), (left - 28.0, py - 6.0), 12)?;
        }
    }
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    panel: &ScatterPanel,
) -> RenderResult<()> {
    let row_height = 18.0;
    let box_height = row_height * panel.layers.len() as f64 + 8.0;
    let box_width = 70.0;
    let left = frame.right() - box_width - 8.0;
    let top = if panel.legend_at_bottom {
        frame.bottom() - box_height - 8.0
    } else {
        frame.top + 8.0
    };

    draw_polyline(
        area,
        &[
            (left, top),
            (left + box_width, top),
            (left + box_width, top + box_height),
            (left, top + box_height),
            (left, top),
        ],
        LineStyle::Solid,
        RGBColor(0xbb, 0xbb, 0xbb).stroke_width(1),
    )?;
    for (row, layer) in panel.layers.iter().enumerate() {
        let y = top + 4.0 + row_height * (row as f64 + 0.5);
        draw_marker(area, (left + 14.0, y), layer.marker, BLACK)?;
        draw_text(area, &layer.label, (left + 28.0, y - 7.0), 13)?;
    }
    Ok(())
}
