use serde::Serialize;

use super::StableId;

/// Index of a [`Table`] within its [`ParsedDocument`](super::ParsedDocument).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableId(pub usize);

/// Index of a [`Cell`] within its [`ParsedDocument`](super::ParsedDocument).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CellId(pub usize);

/// Inclusive grid rectangle covered by a cell once row/column spans are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpan {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl GridSpan {
    pub fn overlaps(&self, other: &GridSpan) -> bool {
        self.row_start <= other.row_end
            && other.row_start <= self.row_end
            && self.col_start <= other.col_end
            && other.col_start <= self.col_end
    }
}

/// One `<table>` element, numbered in order of appearance in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub stable_id: StableId,
    pub position: usize,
}

/// One logical table cell after span resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub stable_id: StableId,
    pub table: TableId,
    /// Sequential index among the cells of its table.
    pub position: usize,
    #[serde(flatten)]
    pub span: GridSpan,
}
