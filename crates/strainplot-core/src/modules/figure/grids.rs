use super::{AXIS_LABEL_X, AXIS_LABEL_Y};
use crate::common::{GridFigureSettings, GRID_PANEL_ASPECT};
use crate::domain::{AverageGrid, FigureKind, PlotResult, RenderResult, GRID_COLUMNS, GRID_ROWS};
use crate::modules::grid::read_average_grid;
use crate::modules::serialization::format_tick_label;
use crate::modules::traits::FigureRenderer;
use crate::numerics::{iso_segments, linspace, upsample_bilinear, IsoSegment};
use crate::render::canvas::{
    draw_frame_border, draw_polyline, draw_quiver_arrow, draw_text, fill_cell, render_error,
};
use crate::render::{
    principal_arrows, render_svg_string, Colormap, LineStyle, PanelFrame,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

const UPSAMPLE_FACTOR: usize = 8;
const PANEL_WIDTH: f64 = 220.0;
const PANEL_GAP_X: f64 = 12.0;
const PANEL_GAP_Y: f64 = 56.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const COLORBAR_GAP: f64 = 24.0;
const COLORBAR_WIDTH: f64 = 18.0;
const COLORBAR_LABEL_SPACE: f64 = 60.0;
const COLORBAR_STEPS: usize = 120;
const POKE_BASE_RADIUS: f64 = 4.0;
const DATA_MARGIN: f64 = 0.1;
const TICK_TOLERANCE: f64 = 1.0e-9;
const CONTOUR_LEVELS: usize = 25;
const CONTOUR_ALPHA: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct GridPanel {
    pub site: String,
    pub grid: AverageGrid,
}

/// Per-site panels of the averaged I1 map, poke locations and principal
/// strain quivers, sharing one color bar.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFigure {
    pub settings: GridFigureSettings,
    pub panels: Vec<GridPanel>,
    pub tension_color: RGBColor,
    pub compression_color: RGBColor,
}

impl GridFigure {
    pub fn new(settings: GridFigureSettings, panels: Vec<GridPanel>) -> PlotResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            panels,
            tension_color: BLACK,
            compression_color: BLACK,
        })
    }

    /// Reads one average-grid file per configured site from `dir`.
    pub fn load(dir: &Path, settings: GridFigureSettings) -> PlotResult<Self> {
        settings.validate()?;
        let mut panels = Vec::with_capacity(settings.sites.len());
        for site in &settings.sites {
            let path = dir.join(settings.grid_file_name(site));
            debug!(site = %site, path = %path.display(), "loading average grid");
            panels.push(GridPanel {
                site: site.clone(),
                grid: read_average_grid(&path)?,
            });
        }
        info!(panels = panels.len(), dir = %dir.display(), "loaded average grids");
        Self::new(settings, panels)
    }

    fn panel_height() -> f64 {
        PANEL_WIDTH * GRID_PANEL_ASPECT
    }

    fn canvas_size(&self) -> (u32, u32) {
        let columns = self.settings.columns as f64;
        let rows = self.settings.rows() as f64;
        let width = MARGIN_LEFT
            + columns * PANEL_WIDTH
            + (columns - 1.0) * PANEL_GAP_X
            + COLORBAR_GAP
            + COLORBAR_WIDTH
            + COLORBAR_LABEL_SPACE;
        let height =
            MARGIN_TOP + rows * Self::panel_height() + (rows - 1.0) * PANEL_GAP_Y + MARGIN_BOTTOM;
        (width.ceil() as u32, height.ceil() as u32)
    }

    fn frame(&self, index: usize) -> PanelFrame {
        let columns = self.settings.columns.max(1);
        let (row, col) = (index / columns, index % columns);
        PanelFrame {
            left: MARGIN_LEFT + col as f64 * (PANEL_WIDTH + PANEL_GAP_X),
            top: MARGIN_TOP + row as f64 * (Self::panel_height() + PANEL_GAP_Y),
            width: PANEL_WIDTH,
            height: Self::panel_height(),
            x_range: (-DATA_MARGIN, 1.0 + DATA_MARGIN),
            y_range: (1.0 + DATA_MARGIN, -DATA_MARGIN),
        }
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let colormap = Colormap::from_name(self.settings.colormap);
        let rows = self.settings.rows();
        let columns = self.settings.columns.max(1);

        for (index, panel) in self.panels.iter().enumerate() {
            let frame = self.frame(index);
            let upsampled = upsample_bilinear(panel.grid.scalar.rows(), UPSAMPLE_FACTOR);
            self.draw_intensity(area, &frame, &colormap, &upsampled)?;
            self.draw_contours(area, &frame, &upsampled)?;
            self.draw_pokes(area, &frame, &panel.grid)?;
            self.draw_strain(area, &frame, &panel.grid)?;
            draw_frame_border(area, &frame)?;

            let (title_x, _) = frame.to_pixel_f64(0.5, 0.0);
            draw_text(
                area,
                &panel.site,
                (title_x - 4.0 * panel.site.len() as f64, frame.top - 20.0),
                15,
            )?;

            let (row, col) = (index / columns, index % columns);
            draw_unit_ticks(area, &frame, col == 0, row + 1 == rows)?;
            if col == 0 {
                draw_text(
                    area,
                    AXIS_LABEL_Y,
                    (frame.left - 40.0, frame.top + 0.5 * frame.height),
                    14,
                )?;
            }
            if row + 1 == rows {
                draw_text(
                    area,
                    AXIS_LABEL_X,
                    (frame.left + 0.5 * frame.width, frame.bottom() + 22.0),
                    14,
                )?;
            }
        }

        self.draw_colorbar(area, &colormap)
    }

    fn draw_intensity<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
        colormap: &Colormap,
        upsampled: &[Vec<f64>],
    ) -> RenderResult<()> {
        let out_rows = (GRID_ROWS * UPSAMPLE_FACTOR) as f64;
        let out_cols = (GRID_COLUMNS * UPSAMPLE_FACTOR) as f64;

        for (row, values) in upsampled.iter().enumerate() {
            let y0 = row as f64 / out_rows;
            let y1 = (row + 1) as f64 / out_rows;
            for (col, value) in values.iter().enumerate() {
                let x0 = col as f64 / out_cols;
                let x1 = (col + 1) as f64 / out_cols;
                let color = colormap.map(*value, self.settings.vmin, self.settings.vmax);
                fill_cell(
                    area,
                    frame.to_pixel_f64(x0, y0),
                    frame.to_pixel_f64(x1, y1),
                    color,
                )?;
            }
        }
        Ok(())
    }

    /// Iso-lines of the upsampled I1 map at evenly spaced levels across the
    /// color range, with nodes spanning the unit square.
    fn contour_segments(&self, upsampled: &[Vec<f64>]) -> Vec<IsoSegment> {
        let xs = linspace(0.0, 1.0, GRID_COLUMNS * UPSAMPLE_FACTOR);
        let ys = linspace(0.0, 1.0, GRID_ROWS * UPSAMPLE_FACTOR);
        linspace(self.settings.vmin, self.settings.vmax, CONTOUR_LEVELS)
            .into_iter()
            .flat_map(|level| iso_segments(upsampled, &xs, &ys, level))
            .collect()
    }

    fn draw_contours<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
        upsampled: &[Vec<f64>],
    ) -> RenderResult<()> {
        let style = BLACK.mix(CONTOUR_ALPHA).stroke_width(1);
        for [[x0, y0], [x1, y1]] in self.contour_segments(upsampled) {
            draw_polyline(
                area,
                &[frame.to_pixel_f64(x0, y0), frame.to_pixel_f64(x1, y1)],
                LineStyle::Solid,
                style,
            )?;
        }
        Ok(())
    }

    fn draw_pokes<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
        grid: &AverageGrid,
    ) -> RenderResult<()> {
        let radius = (POKE_BASE_RADIUS * self.settings.poke_radius).round().max(1.0) as u32;
        for [u, v] in &grid.stimuli {
            area.draw(&Circle::new(
                frame.to_pixel(*u, *v),
                radius,
                BLACK.mix(0.5).filled(),
            ))
            .map_err(render_error)?;
        }
        Ok(())
    }

    fn draw_strain<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &PanelFrame,
        grid: &AverageGrid,
    ) -> RenderResult<()> {
        let shaft_width = self.settings.arrow_width * frame.width;
        let row_norm = (GRID_ROWS - 1) as f64;
        let col_norm = (GRID_COLUMNS - 1) as f64;

        for (row, col, cell) in grid.strain.iter_cells() {
            let anchor = [col as f64 / col_norm, row as f64 / row_norm];
            for (direction, lambda) in cell.pairs() {
                for arrow in principal_arrows(anchor, direction, lambda, self.settings.arrow_scale)
                {
                    let color = if arrow.tension {
                        self.tension_color
                    } else {
                        self.compression_color
                    };
                    draw_quiver_arrow(area, frame, &arrow, shaft_width, color)?;
                }
            }
        }
        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        colormap: &Colormap,
    ) -> RenderResult<()> {
        let columns = self.settings.columns.max(1) as f64;
        let rows = self.settings.rows() as f64;
        let left = MARGIN_LEFT + columns * PANEL_WIDTH + (columns - 1.0) * PANEL_GAP_X + COLORBAR_GAP;
        let top = MARGIN_TOP;
        let height = rows * Self::panel_height() + (rows - 1.0) * PANEL_GAP_Y;
        let bottom = top + height;
        let step = height / COLORBAR_STEPS as f64;

        // Slice 0 is the bottom of the bar.
        for slice in 0..COLORBAR_STEPS {
            let t = (slice as f64 + 0.5) / COLORBAR_STEPS as f64;
            let y1 = bottom - slice as f64 * step;
            fill_cell(
                area,
                (left, y1 - step),
                (left + COLORBAR_WIDTH, y1),
                colormap.at(t),
            )?;
        }
        draw_polyline(
            area,
            &[
                (left, top),
                (left + COLORBAR_WIDTH, top),
                (left + COLORBAR_WIDTH, bottom),
                (left, bottom),
                (left, top),
            ],
            LineStyle::Solid,
            BLACK.stroke_width(1),
        )?;

        let (vmin, vmax) = (self.settings.vmin, self.settings.vmax);
        for tick in &self.settings.colorbar_ticks {
            let fraction = (tick - vmin) / (vmax - vmin);
            if !(-TICK_TOLERANCE..=1.0 + TICK_TOLERANCE).contains(&fraction) {
                continue;
            }
            let y = bottom - fraction.clamp(0.0, 1.0) * height;
            let right = left + COLORBAR_WIDTH;
            draw_polyline(
                area,
                &[(right, y), (right + 4.0, y)],
                LineStyle::Solid,
                BLACK.stroke_width(1),
            )?;
            draw_text(area, &format_tick_label(*tick, 2), (right + 7.0, y - 6.0), 12)?;
        }
        Ok(())
    }
}

impl FigureRenderer for GridFigure {
    fn kind(&self) -> FigureKind {
        FigureKind::Grids
    }

    fn render_svg(&self) -> RenderResult<String> {
        render_svg_string(self.canvas_size(), |area| self.draw(area))
    }
}

fn draw_unit_ticks<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    label_y: bool,
    label_x: bool,
) -> RenderResult<()> {
    for tick in [0.0, 1.0] {
        let (px, bottom) = frame.to_pixel_f64(tick, 1.0 + DATA_MARGIN);
        draw_polyline(
            area,
            &[(px, bottom), (px, bottom - 4.0)],
            LineStyle::Solid,
            BLACK.stroke_width(1),
        )?;
        if label_x {
            draw_text(area, &format!("{}", tick), (px - 3.0, bottom + 4.0), 11)?;
        }

        let (left, py) = frame.to_pixel_f64(-DATA_MARGIN, tick);
        draw_polyline(
            area,
            &[(left, py), (left + 4.0, py)],
            LineStyle::Solid,
            BLACK.stroke_width(1),
        )?;
        if label_y {
            draw_text(area, &format!("{}", tick), (left - 12.0, py - 6.0), 11)?;
        }
    }
    Ok(())
}
