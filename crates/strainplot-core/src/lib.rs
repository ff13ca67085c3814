//! Strain and I1 figure toolkit: weighted confidence ellipses, average-grid
//! CSV files, 2x2 principal-vector decomposition and SVG figure builders.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
pub mod render;
