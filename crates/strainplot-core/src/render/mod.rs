//! SVG output through the `plotters` SVG backend. Figures are drawn in pixel
//! space; [`PanelFrame`] maps panel data coordinates onto it.

pub mod canvas;
pub mod colormap;
pub mod shapes;

pub use canvas::PanelFrame;
pub use colormap::Colormap;
pub use shapes::{dash_segments, principal_arrows, EllipsePatch, LineStyle, MarkerShape, QuiverArrow};

use crate::domain::RenderResult;
use canvas::render_error;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Runs `draw` against an in-memory SVG canvas of `size` pixels and returns
/// the document.
pub fn render_svg_string<F>(size: (u32, u32), draw: F) -> RenderResult<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> RenderResult<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        draw(&root)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}
