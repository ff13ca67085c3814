//! Sequential colormaps as piecewise-linear ramps through the nine-class
//! ColorBrewer anchors.

use crate::common::ColormapName;
use plotters::style::RGBColor;

const PUBUGN: [(u8, u8, u8); 9] = [
    (0xff, 0xf7, 0xfb),
    (0xec, 0xe2, 0xf0),
    (0xd0, 0xd1, 0xe6),
    (0xa6, 0xbd, 0xdb),
    (0x67, 0xa9, 0xcf),
    (0x36, 0x90, 0xc0),
    (0x02, 0x81, 0x8a),
    (0x01, 0x6c, 0x59),
    (0x01, 0x46, 0x36),
];

const ORANGES: [(u8, u8, u8); 9] = [
    (0xff, 0xf5, 0xeb),
    (0xfe, 0xe6, 0xce),
    (0xfd, 0xd0, 0xa2),
    (0xfd, 0xae, 0x6b),
    (0xfd, 0x8d, 0x3c),
    (0xf1, 0x69, 0x13),
    (0xd9, 0x48, 0x01),
    (0xa6, 0x36, 0x03),
    (0x7f, 0x27, 0x04),
];

#[derive(Debug, Clone, Copy)]
pub struct Colormap {
    anchors: &'static [(u8, u8, u8)],
}

impl Colormap {
    pub const fn from_name(name: ColormapName) -> Self {
        match name {
            ColormapName::PuBuGn => Self { anchors: &PUBUGN },
            ColormapName::Oranges => Self { anchors: &ORANGES },
        }
    }

    /// Color at `t`, clamped into `[0, 1]`. NaN maps to the low end.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.anchors.len() - 1;
        let position = t * last as f64;
        let lower = (position.floor() as usize).min(last - 1);
        let frac = position - lower as f64;

        let (r0, g0, b0) = self.anchors[lower];
        let (r1, g1, b1) = self.anchors[lower + 1];
        RGBColor(
            mix_channel(r0, r1, frac),
            mix_channel(g0, g1, frac),
            mix_channel(b0, b1, frac),
        )
    }

    /// Color for `value` normalized into `[vmin, vmax]`.
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        self.at((value - vmin) / (vmax - vmin))
    }
}

fn mix_channel(a: u8, b: u8, frac: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * frac).round() as u8
}
