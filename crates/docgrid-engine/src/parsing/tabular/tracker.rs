use crate::dom::Element;
use crate::models::{Cell, CellId, ParentRef, StableId, Table, TableId};

use super::grid::{MAX_COLSPAN, MAX_ROWSPAN, TableGridState};

/// Tracks which table or cell the walk is currently inside.
///
/// States are Outside (empty stack), InTable, InRow and InCell; a nested
/// `<table>` pushes an independent [`TableGridState`] and popping it restores
/// the enclosing cell as the current parent. Table indices are unique across
/// the whole document, nested tables included.
#[derive(Debug)]
pub struct TableGridTracker {
    document: String,
    stack: Vec<TableGridState>,
    parent: ParentRef,
    tables: Vec<Table>,
    cells: Vec<Cell>,
}

impl TableGridTracker {
    pub fn new(document: &str) -> Self {
        Self {
            document: document.to_string(),
            stack: vec![],
            parent: ParentRef::Document,
            tables: vec![],
            cells: vec![],
        }
    }

    /// Current tabular parent for any text extracted now.
    pub fn parent(&self) -> ParentRef {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn enter(&mut self, el: &Element) {
        match el.tag.as_str() {
            "table" => {
                let id = TableId(self.tables.len());
                self.tables.push(Table {
                    stable_id: StableId::table(&self.document, id.0),
                    position: id.0,
                });
                log::debug!(
                    "{}: entering table {} at depth {}",
                    self.document,
                    id.0,
                    self.depth() + 1
                );
                self.stack.push(TableGridState::new(id, self.parent));
                self.parent = ParentRef::Table(id);
            }
            "tr" => {
                if let Some(grid) = self.stack.last_mut() {
                    grid.start_row();
                }
            }
            "td" | "th" => {
                let Some(grid) = self.stack.last_mut() else {
                    return;
                };
                let (span, position) =
                    grid.place_cell(
                    span_attr(el, "rowspan", MAX_ROWSPAN),
                    span_attr(el, "colspan", MAX_COLSPAN),
                );
                let id = CellId(self.cells.len());
                self.cells.push(Cell {
                    stable_id: StableId::cell(
                        &self.document,
                        grid.table.0,
                        span.row_start,
                        span.col_start,
                    ),
                    table: grid.table,
                    position,
                    span,
                });
                self.parent = ParentRef::Cell(id);
            }
            _ => {}
        }
    }

    pub fn exit(&mut self, el: &Element) {
        match el.tag.as_str() {
            "table" => {
                if let Some(grid) = self.stack.pop() {
                    self.parent = grid.enclosing;
                }
            }
            "tr" => {
                if let Some(grid) = self.stack.last_mut() {
                    grid.end_row();
                }
            }
            "td" | "th" => {
                if let Some(grid) = self.stack.last_mut() {
                    grid.end_cell();
                    self.parent = ParentRef::Table(grid.table);
                }
            }
            _ => {}
        }
    }

    pub fn finish(self) -> (Vec<Table>, Vec<Cell>) {
        (self.tables, self.cells)
    }
}

/// Leading digits of a span attribute, clamped to `1..=max`. Missing or
/// unparsable values count as 1.
fn span_attr(el: &Element, name: &str, max: usize) -> usize {
    let Some(value) = el.attr(name) else {
        return 1;
    };
    value
        .trim()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0usize, |n, d| {
            n.saturating_mul(10).saturating_add(usize::from(d - b'0'))
        })
        .clamp(1, max)
}
