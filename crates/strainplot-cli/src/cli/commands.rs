use super::CliError;
use super::helpers::*;
use anyhow::Context;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use strainplot_core::common::{FigureManifest, FigurePreset, ScatterFigureSettings};
use strainplot_core::modules::testfun::SamplingDomain;
use strainplot_core::modules::{
    read_average_grid, read_scatter_file, write_average_grid, write_average_grid_file,
    write_figure, GridFigure, ScatterFigure, TestFieldFigure, TestFieldFigureOptions,
};
use tracing::info;

#[derive(clap::Args)]
pub(super) struct ScatterArgs {
    /// Scatter CSV with `site, v, u, w` rows
    #[arg(long)]
    input: PathBuf,

    /// SVG output path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct GridsArgs {
    /// Directory holding one average-grid file per site
    #[arg(long)]
    input_dir: PathBuf,

    /// Layout and color preset
    #[arg(long, default_value = "method-paper", value_parser = parse_preset)]
    preset: FigurePreset,

    /// JSON manifest overriding preset fields
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// SVG output path; defaults to the preset's file name
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct TestfunArgs {
    /// SVG output path
    #[arg(long, default_value = "testfun.svg")]
    output: PathBuf,

    /// Samples between displacement arrows
    #[arg(long, default_value_t = 6)]
    stride: usize,

    /// Sampling step on both axes
    #[arg(long, default_value_t = 0.025)]
    step: f64,
}

#[derive(clap::Args)]
pub(super) struct RoundtripArgs {
    /// Average-grid CSV to parse
    #[arg(long)]
    input: PathBuf,

    /// Where to write the re-emitted grid; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_scatter_command(args: ScatterArgs) -> Result<CommandSummary, CliError> {
    let settings = ScatterFigureSettings::default();
    let output = args.output.unwrap_or_else(|| settings.output_path.clone());

    let samples = read_scatter_file(&args.input).map_err(CliError::Plot)?;
    let figure = ScatterFigure::build(&samples, &settings).map_err(CliError::Plot)?;
    write_figure(&figure, &output).map_err(CliError::Plot)?;

    let mut summary = CommandSummary::new("scatter", Some(output));
    for layer in figure.panels.iter().flat_map(|panel| &panel.layers) {
        let (cx, cy, a, b, theta) = layer.ellipse.as_tuple();
        summary.insert(
            &layer.label,
            json!({
                "points": layer.points.len(),
                "center": [cx, cy],
                "semiAxes": [a, b],
                "rotation": theta,
            }),
        );
    }
    Ok(summary)
}

pub(super) fn run_grids_command(args: GridsArgs) -> Result<CommandSummary, CliError> {
    let settings = match &args.manifest {
        Some(path) => FigureManifest::load(path)
            .and_then(|manifest| manifest.resolve(args.preset))
            .map_err(CliError::Plot)?,
        None => args.preset.grid_settings(),
    };
    let output = args
        .output
        .unwrap_or_else(|| settings.output_path.clone());
    info!(
        preset = args.preset.as_str(),
        sites = settings.sites.len(),
        "rendering grid figure"
    );

    let figure = GridFigure::load(&args.input_dir, settings).map_err(CliError::Plot)?;
    write_figure(&figure, &output).map_err(CliError::Plot)?;

    let mut summary = CommandSummary::new("grids", Some(output));
    summary.insert(
        "sites",
        json!(figure
            .panels
            .iter()
            .map(|panel| panel.site.as_str())
            .collect::<Vec<_>>()),
    );
    Ok(summary)
}

pub(super) fn run_testfun_command(args: TestfunArgs) -> Result<CommandSummary, CliError> {
    let options = TestFieldFigureOptions {
        domain: SamplingDomain {
            step: args.step,
            ..SamplingDomain::default()
        },
        stride: args.stride,
        ..TestFieldFigureOptions::default()
    };
    let figure = TestFieldFigure::build(options).map_err(CliError::Plot)?;
    write_figure(&figure, &args.output).map_err(CliError::Plot)?;

    let (low, high) = figure.field.potential_range();
    let mut summary = CommandSummary::new("testfun", Some(args.output));
    summary.insert("samples", json!(figure.field.xs.len()));
    summary.insert("principalAnchors", json!(figure.principal.len()));
    summary.insert("potentialRange", json!([low, high]));
    Ok(summary)
}

pub(super) fn run_roundtrip_command(args: RoundtripArgs) -> Result<CommandSummary, CliError> {
    let grid = read_average_grid(&args.input).map_err(CliError::Plot)?;

    match args.output {
        Some(output) => {
            write_average_grid_file(&output, &grid).map_err(CliError::Plot)?;
            let mut summary = CommandSummary::new("roundtrip", Some(output));
            summary.insert("stimuli", json!(grid.stimuli.len()));
            Ok(summary)
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(write_average_grid(&grid).as_bytes())
                .context("failed to write average grid to stdout")?;
            Ok(CommandSummary::new("roundtrip", None))
        }
    }
}

fn parse_preset(value: &str) -> Result<FigurePreset, String> {
    FigurePreset::from_name(value).ok_or_else(|| {
        format!(
            "unknown preset '{}'; expected {} or {}",
            value,
            FigurePreset::MethodPaper.as_str(),
            FigurePreset::ResultPaper.as_str()
        )
    })
}
