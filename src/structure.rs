use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Zero-indexed (row, column) coords for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// The shape of a puzzle: which cells hold letters and which are blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    height: usize,
    width: usize,
    cells: Vec<Vec<bool>>,
}

impl Structure {
    /// Build a structure from a participation matrix. Rows shorter than the widest row are padded
    /// with blocked cells.
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Structure> {
        let height = cells.len();
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::EmptyStructure);
        }

        let cells = cells
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        Ok(Structure { height, width, cells })
    }

    /// Parse structure file contents: one row per line, with `_` or `.` representing letter cells
    /// and any other character (spaces included) representing blocks. An empty line is a row of
    /// blocks.
    pub fn parse(contents: &str) -> Result<Structure> {
        Structure::new(contents.lines().map(|line| parse_row(line.chars())).collect())
    }

    /// Parse an inline template, as written in source: like `parse`, but blank lines before the
    /// first row and after the last are dropped and the rows' common indentation is removed.
    /// Blank lines between rows are still rows of blocks.
    pub fn from_template(template: &str) -> Result<Structure> {
        let lines: Vec<&str> = template.lines().collect();
        let is_blank = |line: &&str| line.trim().is_empty();

        let start = lines.iter().position(|line| !is_blank(line)).unwrap_or(lines.len());
        let end = lines.iter().rposition(|line| !is_blank(line)).map_or(start, |end| end + 1);
        let rows = &lines[start..end];

        let indent = rows
            .iter()
            .filter(|line| !is_blank(line))
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        Structure::new(rows.iter().map(|line| parse_row(line.chars().skip(indent))).collect())
    }

    /// Read and parse a structure file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Structure> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::FileReadingError(err, path.display().to_string()))?;

        Structure::parse(&contents)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Does the cell at `(row, col)` hold a letter? Out-of-bounds cells are treated as blocked.
    pub fn is_open(&self, (row, col): GridCoord) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }
}

fn parse_row(cells: impl Iterator<Item = char>) -> Vec<bool> {
    cells.map(|c| c == '_' || c == '.').collect()
}
