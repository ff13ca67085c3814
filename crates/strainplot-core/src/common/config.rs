//! Figure presets for the two papers and the optional JSON manifest that
//! overrides them.

use super::constants::DEFAULT_GRID_FILE_PATTERN;
use crate::domain::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigurePreset {
    #[default]
    MethodPaper,
    ResultPaper,
}

impl FigurePreset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MethodPaper => "method-paper",
            Self::ResultPaper => "result-paper",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "method-paper" | "method" => Some(Self::MethodPaper),
            "result-paper" | "result" => Some(Self::ResultPaper),
            _ => None,
        }
    }

    pub fn grid_settings(self) -> GridFigureSettings {
        match self {
            Self::MethodPaper => GridFigureSettings {
                sites: site_list(&["T6", "T11", "T16", "G1", "G2", "G3"]),
                columns: 3,
                grid_file_pattern: DEFAULT_GRID_FILE_PATTERN.to_string(),
                vmin: 3.0,
                vmax: 3.05,
                arrow_scale: 1.3,
                arrow_width: 0.005,
                poke_radius: 1.0,
                colormap: ColormapName::PuBuGn,
                colorbar_ticks: vec![3.00, 3.01, 3.02, 3.03, 3.04, 3.05],
                output_path: PathBuf::from("i1-and-strains.svg"),
            },
            Self::ResultPaper => GridFigureSettings {
                sites: site_list(&["T6", "T11", "T16"]),
                columns: 3,
                grid_file_pattern: DEFAULT_GRID_FILE_PATTERN.to_string(),
                vmin: 3.0,
                vmax: 3.02,
                arrow_scale: 0.7,
                arrow_width: 0.005,
                poke_radius: 1.5,
                colormap: ColormapName::Oranges,
                colorbar_ticks: vec![3.00, 3.01, 3.02],
                output_path: PathBuf::from("result-i1-and-strains.svg"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColormapName {
    #[default]
    PuBuGn,
    Oranges,
}

/// Layout and scale settings for the I1 / strain grid figure.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFigureSettings {
    pub sites: Vec<String>,
    pub columns: usize,
    pub grid_file_pattern: String,
    pub vmin: f64,
    pub vmax: f64,
    /// Vector magnitude that spans one panel width.
    pub arrow_scale: f64,
    /// Arrow shaft width as a fraction of the panel width.
    pub arrow_width: f64,
    /// Multiplier on the base poke marker radius.
    pub poke_radius: f64,
    pub colormap: ColormapName,
    pub colorbar_ticks: Vec<f64>,
    pub output_path: PathBuf,
}

impl Default for GridFigureSettings {
    fn default() -> Self {
        FigurePreset::default().grid_settings()
    }
}

impl GridFigureSettings {
    pub fn grid_file_name(&self, site: &str) -> String {
        self.grid_file_pattern.replace("{site}", site)
    }

    pub fn rows(&self) -> usize {
        self.sites.len().div_ceil(self.columns.max(1))
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.sites.is_empty() {
            return Err(PlotError::invalid_input(
                "INPUT.FIGURE_SITES",
                "grid figure requires at least one site",
            ));
        }
        if self.columns == 0 {
            return Err(PlotError::invalid_input(
                "INPUT.FIGURE_COLUMNS",
                "grid figure requires at least one panel column",
            ));
        }
        if !(self.vmin.is_finite() && self.vmax.is_finite() && self.vmax > self.vmin) {
            return Err(PlotError::invalid_input(
                "INPUT.FIGURE_COLOR_RANGE",
                format!(
                    "color range requires finite vmin < vmax, got [{}, {}]",
                    self.vmin, self.vmax
                ),
            ));
        }
        if !(self.arrow_scale.is_finite() && self.arrow_scale > 0.0) {
            return Err(PlotError::invalid_input(
                "INPUT.FIGURE_ARROW_SCALE",
                format!("arrow scale must be positive, got {}", self.arrow_scale),
            ));
        }
        if !self.grid_file_pattern.contains("{site}") {
            return Err(PlotError::invalid_input(
                "INPUT.FIGURE_FILE_PATTERN",
                format!(
                    "grid file pattern '{}' must contain '{{site}}'",
                    self.grid_file_pattern
                ),
            ));
        }
        Ok(())
    }
}

/// Sites shown on each panel of the scatter figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigureSettings {
    pub panels: Vec<Vec<String>>,
    pub output_path: PathBuf,
}

impl Default for ScatterFigureSettings {
    fn default() -> Self {
        Self {
            panels: vec![
                site_list(&["T6", "T11", "T16"]),
                site_list(&["G1", "G2", "G3"]),
            ],
            output_path: PathBuf::from("I1-scatter-confidence-ellipsoids-raw.svg"),
        }
    }
}

/// JSON overrides for a grid figure. Absent fields fall back to the preset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FigureManifest {
    #[serde(default)]
    pub preset: Option<FigurePreset>,
    #[serde(default)]
    pub sites: Option<Vec<String>>,
    #[serde(default)]
    pub columns: Option<usize>,
    #[serde(default)]
    pub grid_file_pattern: Option<String>,
    #[serde(default)]
    pub vmin: Option<f64>,
    #[serde(default)]
    pub vmax: Option<f64>,
    #[serde(default)]
    pub arrow_scale: Option<f64>,
    #[serde(default)]
    pub arrow_width: Option<f64>,
    #[serde(default)]
    pub poke_radius: Option<f64>,
    #[serde(default)]
    pub colormap: Option<ColormapName>,
    #[serde(default)]
    pub colorbar_ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl FigureManifest {
    pub fn load(path: &Path) -> PlotResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            PlotError::io_system(
                "IO.MANIFEST_READ",
                format!("failed to read figure manifest '{}': {}", path.display(), source),
            )
        })?;
        Self::from_json(&content).map_err(|error| {
            PlotError::invalid_input(
                error.placeholder(),
                format!("{} ('{}')", error.message(), path.display()),
            )
        })
    }

    pub fn from_json(content: &str) -> PlotResult<Self> {
        serde_json::from_str(content).map_err(|source| {
            PlotError::invalid_input(
                "INPUT.MANIFEST_PARSE",
                format!("failed to parse figure manifest: {}", source),
            )
        })
    }

    /// Applies the overrides on top of the manifest preset, or `fallback`
    /// when the manifest does not name one.
    pub fn resolve(self, fallback: FigurePreset) -> PlotResult<GridFigureSettings> {
        let mut settings = self.preset.unwrap_or(fallback).grid_settings();
        if let Some(sites) = self.sites {
            settings.sites = sites;
        }
        if let Some(columns) = self.columns {
            settings.columns = columns;
        }
        if let Some(pattern) = self.grid_file_pattern {
            settings.grid_file_pattern = pattern;
        }
        if let Some(vmin) = self.vmin {
            settings.vmin = vmin;
        }
        if let Some(vmax) = self.vmax {
            settings.vmax = vmax;
        }
        if let Some(scale) = self.arrow_scale {
            settings.arrow_scale = scale;
        }
        if let Some(width) = self.arrow_width {
            settings.arrow_width = width;
        }
        if let Some(radius) = self.poke_radius {
            settings.poke_radius = radius;
        }
        if let Some(colormap) = self.colormap {
            settings.colormap = colormap;
        }
        if let Some(ticks) = self.colorbar_ticks {
            settings.colorbar_ticks = ticks;
        }
        if let Some(output_path) = self.output_path {
            settings.output_path = output_path;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn site_list(sites: &[&str]) -> Vec<String> {
    sites.iter().map(|site| site.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{ColormapName, FigureManifest, FigurePreset, GridFigureSettings};
    use crate::domain::PlotErrorCategory;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn presets_match_paper_layouts() {
        let method = FigurePreset::MethodPaper.grid_settings();
        assert_eq!(method.sites.len(), 6);
        assert_eq!(method.rows(), 2);
        assert_eq!(method.vmax, 3.05);
        assert_eq!(method.arrow_scale, 1.3);
        assert_eq!(method.colormap, ColormapName::PuBuGn);

        let result = FigurePreset::ResultPaper.grid_settings();
        assert_eq!(result.sites, vec!["T6", "T11", "T16"]);
        assert_eq!(result.rows(), 1);
        assert_eq!(result.vmax, 3.02);
        assert_eq!(result.arrow_scale, 0.7);
        assert_eq!(result.poke_radius, 1.5);
        assert_eq!(result.colormap, ColormapName::Oranges);
    }

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!(
            FigurePreset::from_name("Result-Paper"),
            Some(FigurePreset::ResultPaper)
        );
        assert_eq!(
            FigurePreset::from_name("method"),
            Some(FigurePreset::MethodPaper)
        );
        assert_eq!(FigurePreset::from_name("poster"), None);
    }

    #[test]
    fn manifest_overrides_apply_on_top_of_named_preset() {
        let manifest = FigureManifest::from_json(
            r#"
            {
              "preset": "result-paper",
              "sites": ["T6"],
              "vmax": 3.1,
              "colormap": "PuBuGn",
              "outputPath": "custom.svg"
            }
            "#,
        )
        .expect("manifest should parse");

        let settings = manifest
            .resolve(FigurePreset::MethodPaper)
            .expect("settings should resolve");
        assert_eq!(settings.sites, vec!["T6"]);
        assert_eq!(settings.vmin, 3.0);
        assert_eq!(settings.vmax, 3.1);
        assert_eq!(settings.arrow_scale, 0.7);
        assert_eq!(settings.colormap, ColormapName::PuBuGn);
        assert_eq!(settings.output_path, PathBuf::from("custom.svg"));
    }

    #[test]
    fn manifest_rejects_inverted_color_range() {
        let manifest = FigureManifest::from_json(r#"{ "vmin": 3.05, "vmax": 3.0 }"#)
            .expect("manifest should parse");
        let error = manifest
            .resolve(FigurePreset::MethodPaper)
            .expect_err("inverted range should fail");
        assert_eq!(error.category(), PlotErrorCategory::InvalidInputError);
        assert_eq!(error.placeholder(), "INPUT.FIGURE_COLOR_RANGE");
    }

    #[test]
    fn manifest_rejects_unknown_fields() {
        let error = FigureManifest::from_json(r#"{ "vmiddle": 3.0 }"#)
            .expect_err("unknown field should fail");
        assert_eq!(error.placeholder(), "INPUT.MANIFEST_PARSE");
    }

    #[test]
    fn manifest_load_reports_missing_file_as_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = FigureManifest::load(&temp.path().join("missing.json"))
            .expect_err("missing manifest should fail");
        assert_eq!(error.category(), PlotErrorCategory::IoSystemError);

        let path = temp.path().join("figure.json");
        fs::write(&path, r#"{ "columns": 2 }"#).expect("manifest should be written");
        let settings = FigureManifest::load(&path)
            .expect("manifest should load")
            .resolve(FigurePreset::MethodPaper)
            .expect("settings should resolve");
        assert_eq!(settings.columns, 2);
        assert_eq!(settings.rows(), 3);
    }

    #[test]
    fn grid_file_names_substitute_site_label() {
        let settings = GridFigureSettings::default();
        assert_eq!(settings.grid_file_name("G2"), "avg-grid-G2.csv");
    }
}
