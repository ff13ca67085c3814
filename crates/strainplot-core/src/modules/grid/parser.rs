use crate::common::{SCALAR_GRID_HEADER, STIMULUS_HEADER, TENSOR_GRID_HEADER};
use crate::domain::{
    AverageGrid, GRID_COLUMNS, GRID_ROWS, ParserResult, PlotError, PrincipalStrain, ScalarGrid,
    TENSOR_CELL_VALUES, TensorGrid,
};
use std::iter::Enumerate;
use std::str::Lines;
use tracing::debug;

/// Parses the three-block average-grid format: the I1 scalar grid, the Biot
/// strain principal decomposition grid and the poke locations.
///
/// The reader is strict. Every header must match its literal exactly (after
/// trimming) and every grid row must have exactly eight cells.
pub fn parse_average_grid(source: &str) -> ParserResult<AverageGrid> {
    let mut lines = GridLines::new(source);

    lines.expect_header(SCALAR_GRID_HEADER)?;
    let mut scalar_rows = [[0.0; GRID_COLUMNS]; GRID_ROWS];
    for row in scalar_rows.iter_mut() {
        let (line_number, line) = lines.expect_row("I1 grid")?;
        let fields = split_row(line, line_number, GRID_COLUMNS, "I1 grid")?;
        for (slot, field) in row.iter_mut().zip(fields) {
            *slot = parse_number(field, line_number, "I1 grid")?;
        }
    }
    debug!("parsed {}x{} I1 grid", GRID_ROWS, GRID_COLUMNS);

    lines.expect_header(TENSOR_GRID_HEADER)?;
    let mut tensor_rows = [[PrincipalStrain::default(); GRID_COLUMNS]; GRID_ROWS];
    for row in tensor_rows.iter_mut() {
        let (line_number, line) = lines.expect_row("Biot strain grid")?;
        let cells = split_row(line, line_number, GRID_COLUMNS, "Biot strain grid")?;
        for (slot, cell) in row.iter_mut().zip(cells) {
            *slot = parse_tensor_cell(cell, line_number)?;
        }
    }
    debug!("parsed {}x{} Biot strain grid", GRID_ROWS, GRID_COLUMNS);

    lines.expect_header(STIMULUS_HEADER)?;
    let mut stimuli = Vec::new();
    while let Some((line_number, line)) = lines.next_line() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line, line_number, 2, "poke locations")?;
        stimuli.push([
            parse_number(fields[0], line_number, "poke locations")?,
            parse_number(fields[1], line_number, "poke locations")?,
        ]);
    }
    debug!(count = stimuli.len(), "parsed poke locations");

    Ok(AverageGrid {
        scalar: ScalarGrid::new(scalar_rows),
        strain: TensorGrid::new(tensor_rows),
        stimuli,
    })
}

struct GridLines<'a> {
    lines: Enumerate<Lines<'a>>,
    last_line: usize,
}

impl<'a> GridLines<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            last_line: 0,
        }
    }

    /// Next line with its 1-based line number.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let (index, line) = self.lines.next()?;
        self.last_line = index + 1;
        Some((index + 1, line))
    }

    fn expect_header(&mut self, header: &'static str) -> ParserResult<()> {
        let Some((line_number, line)) = self.next_line() else {
            return Err(PlotError::malformed_file(
                "FILE.GRID_HEADER",
                format!(
                    "missing header '{}' after line {} (end of input)",
                    header, self.last_line
                ),
            ));
        };

        if line.trim() != header {
            return Err(PlotError::malformed_file(
                "FILE.GRID_HEADER",
                format!(
                    "expected header '{}' at line {}, found '{}'",
                    header,
                    line_number,
                    line.trim()
                ),
            ));
        }
        Ok(())
    }

    fn expect_row(&mut self, block: &str) -> ParserResult<(usize, &'a str)> {
        self.next_line().ok_or_else(|| {
            PlotError::malformed_file(
                "FILE.GRID_TRUNCATED",
                format!(
                    "{} ended after line {}; expected {} rows",
                    block, self.last_line, GRID_ROWS
                ),
            )
        })
    }
}

fn split_row<'a>(
    line: &'a str,
    line_number: usize,
    expected: usize,
    block: &str,
) -> ParserResult<Vec<&'a str>> {
    let fields = line.split(',').collect::<Vec<_>>();
    if fields.len() != expected {
        return Err(PlotError::malformed_file(
            "FILE.GRID_ROW_SHAPE",
            format!(
                "{} row at line {} has {} columns, expected {}",
                block,
                line_number,
                fields.len(),
                expected
            ),
        ));
    }
    Ok(fields)
}

fn parse_tensor_cell(cell: &str, line_number: usize) -> ParserResult<PrincipalStrain> {
    let stripped = cell.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')');
    let parts = stripped.split(';').collect::<Vec<_>>();
    if parts.len() != TENSOR_CELL_VALUES {
        return Err(PlotError::malformed_file(
            "FILE.GRID_CELL_SHAPE",
            format!(
                "Biot strain cell '{}' at line {} has {} values, expected {}",
                cell.trim(),
                line_number,
                parts.len(),
                TENSOR_CELL_VALUES
            ),
        ));
    }

    let mut values = [0.0; TENSOR_CELL_VALUES];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = parse_number(part, line_number, "Biot strain grid")?;
    }
    Ok(PrincipalStrain::from_values(values))
}

fn parse_number(field: &str, line_number: usize, block: &str) -> ParserResult<f64> {
    let trimmed = field.trim();
    trimmed.parse::<f64>().map_err(|_| {
        PlotError::malformed_file(
            "FILE.GRID_NUMBER",
            format!(
                "invalid number '{}' in {} at line {}",
                trimmed, block, line_number
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::parse_average_grid;
    use crate::common::{SCALAR_GRID_HEADER, STIMULUS_HEADER, TENSOR_GRID_HEADER};
    use crate::domain::PlotErrorCategory;

    fn scalar_block() -> String {
        let mut block = format!("{}\n", SCALAR_GRID_HEADER);
        for row in 0..7 {
            let values = (0..8)
                .map(|col| format!("3.{:03}", row * 8 + col))
                .collect::<Vec<_>>();
            block.push_str(&values.join(", "));
            block.push('\n');
        }
        block
    }

    fn tensor_block() -> String {
        let mut block = format!("{}\n", TENSOR_GRID_HEADER);
        for _ in 0..7 {
            let cells = vec!["(1.0;0.0;0.0;1.0;0.02;-0.01)"; 8];
            block.push_str(&cells.join(","));
            block.push('\n');
        }
        block
    }

    fn stimulus_block() -> String {
        format!("{}\n0.25, 0.5\n0.75,0.125\n", STIMULUS_HEADER)
    }

    #[test]
    fn parses_well_formed_file() {
        let source = format!("{}{}{}", scalar_block(), tensor_block(), stimulus_block());
        let grid = parse_average_grid(&source).expect("well-formed file should parse");

        assert_eq!(grid.scalar.get(0, 0), 3.0);
        assert_eq!(grid.scalar.get(6, 7), 3.055);
        let cell = grid.strain.get(3, 4);
        assert_eq!(cell.v1, [1.0, 0.0]);
        assert_eq!(cell.v2, [0.0, 1.0]);
        assert_eq!(cell.lambda1, 0.02);
        assert_eq!(cell.lambda2, -0.01);
        assert_eq!(grid.stimuli, vec![[0.25, 0.5], [0.75, 0.125]]);
    }

    #[test]
    fn tensor_cells_accept_unwrapped_and_spaced_values() {
        let mut tensor = format!("{}\n", TENSOR_GRID_HEADER);
        for _ in 0..7 {
            let cells = vec![" ( 0.6; 0.8; -0.8; 0.6; 0.1; 0.2 ) "; 4]
                .into_iter()
                .chain(vec!["0.6;0.8;-0.8;0.6;0.1;0.2"; 4])
                .collect::<Vec<_>>();
            tensor.push_str(&cells.join(","));
            tensor.push('\n');
        }
        let source = format!("{}{}{}", scalar_block(), tensor, stimulus_block());
        let grid = parse_average_grid(&source).expect("loose cell formatting should parse");

        assert_eq!(grid.strain.get(0, 0).v1, [0.6, 0.8]);
        assert_eq!(grid.strain.get(0, 7).lambda2, 0.2);
    }

    #[test]
    fn empty_stimulus_block_and_trailing_blank_lines_are_accepted() {
        let source = format!(
            "{}{}{}\n\n",
            scalar_block(),
            tensor_block(),
            STIMULUS_HEADER
        );
        let grid = parse_average_grid(&source).expect("empty poke list should parse");
        assert!(grid.stimuli.is_empty());
    }

    #[test]
    fn missing_poke_header_is_reported_by_name() {
        let source = format!("{}{}", scalar_block(), tensor_block());
        let error = parse_average_grid(&source).expect_err("missing header should fail");

        assert_eq!(error.category(), PlotErrorCategory::MalformedFileError);
        assert_eq!(error.placeholder(), "FILE.GRID_HEADER");
        assert!(error.message().contains("Poke locations (u,v)"));
    }

    #[test]
    fn poke_rows_without_header_are_rejected() {
        let source = format!("{}{}0.25,0.5\n", scalar_block(), tensor_block());
        let error = parse_average_grid(&source).expect_err("missing header should fail");

        assert!(error.message().contains(STIMULUS_HEADER));
        assert!(error.message().contains("line 17"));
    }

    #[test]
    fn short_scalar_row_is_rejected() {
        let scalar = scalar_block().replacen(", 3.007\n", "\n", 1);
        let source = format!("{}{}{}", scalar, tensor_block(), stimulus_block());
        let error = parse_average_grid(&source).expect_err("short row should fail");

        assert_eq!(error.category(), PlotErrorCategory::MalformedFileError);
        assert_eq!(error.placeholder(), "FILE.GRID_ROW_SHAPE");
        assert!(error.message().contains("line 2"));
        assert!(error.message().contains("has 7 columns"));
    }

    #[test]
    fn wrong_scalar_header_is_rejected() {
        let source = scalar_block().replace("7 rows", "6 rows");
        let error = parse_average_grid(&source).expect_err("wrong header should fail");
        assert_eq!(error.placeholder(), "FILE.GRID_HEADER");
        assert!(error.message().contains("line 1"));
    }

    #[test]
    fn corrected_tensor_header_wording_is_rejected() {
        let tensor = tensor_block().replacen("v1 and v1", "v1 and v2", 1);
        let source = format!("{}{}{}", scalar_block(), tensor, stimulus_block());
        let error = parse_average_grid(&source).expect_err("near-miss header should fail");

        assert_eq!(error.category(), PlotErrorCategory::MalformedFileError);
        assert_eq!(error.placeholder(), "FILE.GRID_HEADER");
        assert!(error.message().contains("line 9"));
    }

    #[test]
    fn tensor_cell_with_five_values_is_rejected() {
        let tensor = tensor_block().replacen(
            "(1.0;0.0;0.0;1.0;0.02;-0.01)",
            "(1.0;0.0;0.0;1.0;0.02)",
            1,
        );
        let source = format!("{}{}{}", scalar_block(), tensor, stimulus_block());
        let error = parse_average_grid(&source).expect_err("short cell should fail");
        assert_eq!(error.placeholder(), "FILE.GRID_CELL_SHAPE");
        assert!(error.message().contains("line 10"));
    }

    #[test]
    fn truncated_tensor_block_is_rejected() {
        let tensor = tensor_block();
        let truncated = tensor.lines().take(4).collect::<Vec<_>>().join("\n");
        let source = format!("{}{}", scalar_block(), truncated);
        let error = parse_average_grid(&source).expect_err("truncated grid should fail");
        assert_eq!(error.placeholder(), "FILE.GRID_TRUNCATED");
    }

    #[test]
    fn non_numeric_poke_coordinate_is_rejected() {
        let source = format!(
            "{}{}{}\n0.5,abc\n",
            scalar_block(),
            tensor_block(),
            STIMULUS_HEADER
        );
        let error = parse_average_grid(&source).expect_err("bad number should fail");
        assert_eq!(error.placeholder(), "FILE.GRID_NUMBER");
        assert!(error.message().contains("'abc'"));
    }

    #[test]
    fn poke_row_with_three_values_is_rejected() {
        let source = format!(
            "{}{}{}\n0.5,0.5,0.5\n",
            scalar_block(),
            tensor_block(),
            STIMULUS_HEADER
        );
        let error = parse_average_grid(&source).expect_err("wide poke row should fail");
        assert_eq!(error.placeholder(), "FILE.GRID_ROW_SHAPE");
    }
}
