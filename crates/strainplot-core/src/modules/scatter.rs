//! Reader for the per-site maximum-I1 coordinate file.
//!
//! Columns are stored as `site, v, u, w` but loaded as `(u, v, w)`, so the
//! in-memory x coordinate is the file's third column.

use super::serialization::read_text_input;
use crate::domain::{ParserResult, PlotError, PlotResult, SiteSamples};
use std::path::Path;
use tracing::debug;

const SCATTER_COLUMNS: usize = 4;

pub fn parse_scatter_source(source: &str) -> ParserResult<SiteSamples> {
    let mut samples = SiteSamples::default();

    // The header row is dropped unchecked.
    for (index, line) in source.lines().enumerate().skip(1) {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() != SCATTER_COLUMNS {
            return Err(PlotError::malformed_file(
                "FILE.SCATTER_ROW_SHAPE",
                format!(
                    "scatter row at line {} has {} columns, expected {} (site, v, u, w)",
                    line_number,
                    fields.len(),
                    SCATTER_COLUMNS
                ),
            ));
        }

        let site = fields[0];
        let v = parse_field(fields[1], "v", line_number)?;
        let u = parse_field(fields[2], "u", line_number)?;
        let w = parse_field(fields[3], "w", line_number)?;
        samples.push(site, u, v, w);
    }

    debug!(sites = samples.len(), "parsed scatter coordinates");
    Ok(samples)
}

pub fn read_scatter_file(path: &Path) -> PlotResult<SiteSamples> {
    let source = read_text_input(path, "scatter")?;
    parse_scatter_source(&source).map_err(|error| {
        PlotError::new(
            error.category(),
            error.placeholder(),
            format!("{} in '{}'", error.message(), path.display()),
        )
    })
}

fn parse_field(field: &str, column: &str, line_number: usize) -> ParserResult<f64> {
    field.parse::<f64>().map_err(|_| {
        PlotError::malformed_file(
            "FILE.SCATTER_NUMBER",
            format!(
                "invalid {} value '{}' at line {}",
                column, field, line_number
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_scatter_source, read_scatter_file};
    use crate::common::SCATTER_HEADER;
    use crate::domain::PlotErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rows_are_loaded_as_u_v_w_grouped_by_site() {
        let source = format!(
            "{}\nT6, 0.10, 0.90, 1.5\nG1, 0.20, 0.30, 2.0\nT6, 0.40, 0.60, 0.5\n",
            SCATTER_HEADER
        );
        let samples = parse_scatter_source(&source).expect("scatter file should parse");

        assert_eq!(samples.site_labels().collect::<Vec<_>>(), vec!["T6", "G1"]);
        let t6 = samples.get("T6").expect("T6 should be present");
        assert_eq!(t6.xs, vec![0.90, 0.60]);
        assert_eq!(t6.ys, vec![0.10, 0.40]);
        assert_eq!(t6.weights, vec![1.5, 0.5]);
    }

    #[test]
    fn header_row_is_not_validated() {
        let samples = parse_scatter_source("anything at all\nT11,0.5,0.25,1\n")
            .expect("header should be skipped");
        assert_eq!(samples.get("T11").map(|sample| sample.len()), Some(1));
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let error = parse_scatter_source("site, v, u, w\nT6,0.1,0.2\n")
            .expect_err("short row should fail");
        assert_eq!(error.category(), PlotErrorCategory::MalformedFileError);
        assert_eq!(error.placeholder(), "FILE.SCATTER_ROW_SHAPE");
        assert!(error.message().contains("line 2"));
    }

    #[test]
    fn bad_weight_is_rejected() {
        let error = parse_scatter_source("site, v, u, w\nT6,0.1,0.2,heavy\n")
            .expect_err("bad weight should fail");
        assert_eq!(error.placeholder(), "FILE.SCATTER_NUMBER");
        assert!(error.message().contains("w value 'heavy'"));
    }

    #[test]
    fn file_errors_name_the_path() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("max-I1-coords.csv");
        fs::write(&path, "site, v, u, w\nT6,x,0.2,1\n").expect("fixture should be written");

        let error = read_scatter_file(&path).expect_err("bad row should fail");
        assert!(error.message().contains("max-I1-coords.csv"));
    }
}
