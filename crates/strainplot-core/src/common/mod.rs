pub mod config;
pub mod constants;

pub use config::{
    ColormapName, FigureManifest, FigurePreset, GridFigureSettings, ScatterFigureSettings,
};
pub use constants::*;
