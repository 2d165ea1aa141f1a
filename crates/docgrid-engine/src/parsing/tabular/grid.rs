use std::collections::HashSet;

use crate::models::{GridSpan, ParentRef, TableId};

/// Largest `rowspan` honoured, as in HTML table processing.
pub const MAX_ROWSPAN: usize = 65534;
/// Largest `colspan` honoured, as in HTML table processing.
pub const MAX_COLSPAN: usize = 1000;

/// Row/column geometry of one table while the walk is inside it.
#[derive(Debug)]
pub struct TableGridState {
    pub table: TableId,
    /// Tabular parent to restore when the table is left.
    pub enclosing: ParentRef,
    occupied: HashSet<(usize, usize)>,
    row: usize,
    col: usize,
    next_cell_position: usize,
}

impl TableGridState {
    pub fn new(table: TableId, enclosing: ParentRef) -> Self {
        Self {
            table,
            enclosing,
            occupied: HashSet::new(),
            row: 0,
            col: 0,
            next_cell_position: 0,
        }
    }

    pub fn start_row(&mut self) {
        self.col = 0;
    }

    pub fn end_row(&mut self) {
        self.row += 1;
    }

    pub fn end_cell(&mut self) {
        self.col += 1;
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupied.contains(&(row, col))
    }

    /// Places a cell at the first free column of the current row and marks
    /// its rectangle occupied. Returns the span and the cell's position.
    ///
    /// Spans are clamped to `1..=MAX_ROWSPAN` and `1..=MAX_COLSPAN`. A span that would run into an already
    /// occupied grid cell is clipped short of it, so placed cells never overlap.
    pub fn place_cell(&mut self, rowspan: usize, colspan: usize) -> (GridSpan, usize) {
        while self.is_occupied(self.row, self.col) {
            self.col += 1;
        }
        let (row_start, col_start) = (self.row, self.col);

        let mut row_end = row_start;
        let row_limit = row_start.saturating_add(rowspan.clamp(1, MAX_ROWSPAN));
        while row_end + 1 < row_limit && !self.is_occupied(row_end + 1, col_start) {
            row_end += 1;
        }

        let mut col_end = col_start;
        let col_limit = col_start.saturating_add(colspan.clamp(1, MAX_COLSPAN));
        while col_end + 1 < col_limit
            && (row_start..=row_end).all(|r| !self.is_occupied(r, col_end + 1))
        {
            col_end += 1;
        }

        for r in row_start..=row_end {
            for c in col_start..=col_end {
                self.occupied.insert((r, c));
            }
        }
        // The cursor stays on col_start; leaving the cell advances it and the
        // next placement skips whatever this span covered.
        let position = self.next_cell_position;
        self.next_cell_position += 1;
        (
            GridSpan {
                row_start,
                row_end,
                col_start,
                col_end,
            },
            position,
        )
    }
}
