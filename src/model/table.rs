//! Table model structures.

use super::Paragraph;

/// Widest grid a Word table can have; larger `w:gridSpan` values are clamped.
pub const MAX_GRID_COLUMNS: u32 = 63;

/// Vertical merge state of a cell (`w:vMerge`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalMerge {
    /// Not part of a vertical merge
    #[default]
    None,
    /// First cell of a vertically merged region
    Restart,
    /// Continuation of the cell above
    Continue,
}

/// A cell in a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Direct paragraphs of the cell; nested tables are not kept
    pub content: Vec<Paragraph>,

    /// Number of grid columns the cell spans (`w:gridSpan`)
    pub grid_span: u32,

    /// Vertical merge state
    pub v_merge: VerticalMerge,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            grid_span: 1,
            v_merge: VerticalMerge::None,
        }
    }
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with a single paragraph of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
            ..Default::default()
        }
    }

    /// Get the plain text content, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Cells in this row
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells.
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Table rows
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Check if this table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve every row into the text of its grid cells.
    ///
    /// A cell spanning `n` grid columns appears `n` times, with `n` clamped to
    /// [`MAX_GRID_COLUMNS`]. A vertical-merge
    /// continuation cell takes the text found at the same grid offset in the
    /// row above, or an empty string when there is none.
    pub fn grid_rows(&self) -> Vec<Vec<String>> {
        let mut resolved: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut grid = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                if cell.grid_span > MAX_GRID_COLUMNS {
                    log::warn!(
                        "Clamping gridSpan {} to {} columns",
                        cell.grid_span,
                        MAX_GRID_COLUMNS
                    );
                }
                let span = cell.grid_span.clamp(1, MAX_GRID_COLUMNS) as usize;
                let offset = grid.len();

                if cell.v_merge == VerticalMerge::Continue {
                    let above = resolved.last();
                    for k in 0..span {
                        let text = above
                            .and_then(|r| r.get(offset + k))
                            .cloned()
                            .unwrap_or_default();
                        grid.push(text);
                    }
                } else {
                    let text = cell.plain_text();
                    grid.extend(std::iter::repeat_n(text, span));
                }
            }
            resolved.push(grid);
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let cell = Cell {
            content: vec![Paragraph::with_text("first"), Paragraph::with_text("second")],
            ..Default::default()
        };
        assert_eq!(cell.plain_text(), "first\nsecond");
        assert_eq!(Cell::new().plain_text(), "");
    }

    #[test]
    fn test_grid_span_repeats_cell() {
        let table = Table::from_rows(vec![Row::with_cells(vec![
            Cell {
                grid_span: 2,
                ..Cell::with_text("Wide")
            },
            Cell::with_text("C"),
        ])]);
        assert_eq!(table.grid_rows(), vec![vec!["Wide", "Wide", "C"]]);
    }

    #[test]
    fn test_oversized_grid_span_clamped() {
        let table = Table::from_rows(vec![Row::with_cells(vec![Cell {
            grid_span: 4_000_000_000,
            ..Cell::with_text("x")
        }])]);
        let rows = table.grid_rows();
        assert_eq!(rows[0].len(), MAX_GRID_COLUMNS as usize);
        assert!(rows[0].iter().all(|cell| cell == "x"));

        let zero = Table::from_rows(vec![Row::with_cells(vec![Cell {
            grid_span: 0,
            ..Cell::with_text("y")
        }])]);
        assert_eq!(zero.grid_rows(), vec![vec!["y"]]);
    }

    #[test]
    fn test_vertical_merge_continuation() {
        let table = Table::from_rows(vec![
            Row::with_cells(vec![
                Cell {
                    v_merge: VerticalMerge::Restart,
                    ..Cell::with_text("Group")
                },
                Cell::with_text("1"),
            ]),
            Row::with_cells(vec![
                Cell {
                    v_merge: VerticalMerge::Continue,
                    ..Cell::new()
                },
                Cell::with_text("2"),
            ]),
            Row::with_cells(vec![
                Cell {
                    v_merge: VerticalMerge::Continue,
                    ..Cell::new()
                },
                Cell::with_text("3"),
            ]),
        ]);

        assert_eq!(
            table.grid_rows(),
            vec![
                vec!["Group", "1"],
                vec!["Group", "2"],
                vec!["Group", "3"],
            ]
        );
    }

    #[test]
    fn test_continuation_without_row_above() {
        let table = Table::from_rows(vec![Row::with_cells(vec![Cell {
            v_merge: VerticalMerge::Continue,
            ..Cell::new()
        }])]);
        assert_eq!(table.grid_rows(), vec![vec![String::new()]]);
    }
}
