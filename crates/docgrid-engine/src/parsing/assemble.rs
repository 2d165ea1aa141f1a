use std::collections::HashMap;

use crate::annotate::AnnotatedUnit;
use crate::error::ParseError;
use crate::models::{Cell, ParentRef, Phrase, PhraseBuilder, StableId, Table};

use super::accumulator::Block;

/// Turns reconciled units into [`Phrase`]s, numbering them per parent and
/// across the document.
#[derive(Debug)]
pub struct PhraseAssembler<'a> {
    document: &'a str,
    tables: &'a [Table],
    cells: &'a [Cell],
    positions: HashMap<ParentRef, usize>,
    phrase_num: usize,
}

impl<'a> PhraseAssembler<'a> {
    pub fn new(document: &'a str, tables: &'a [Table], cells: &'a [Cell]) -> Self {
        Self {
            document,
            tables,
            cells,
            positions: HashMap::new(),
            phrase_num: 0,
        }
    }

    pub fn assemble(&mut self, unit: AnnotatedUnit, block: &Block) -> Result<Phrase, ParseError> {
        let parent = block.parent;
        let position = self.positions.get(&parent).copied().unwrap_or(0);

        let mut builder = PhraseBuilder::new(
            StableId::phrase(self.document, self.phrase_num),
            parent,
            position,
            self.phrase_num,
        )
        .lingual(unit);
        if let Some(attrs) = &block.structural {
            builder = builder.structural(attrs.clone());
        }
        builder = match parent {
            ParentRef::Document => builder,
            ParentRef::Table(id) => {
                self.tables.get(id.0).ok_or_else(|| self.unknown(parent))?;
                builder.table(id)
            }
            ParentRef::Cell(id) => {
                let cell = self.cells.get(id.0).ok_or_else(|| self.unknown(parent))?;
                builder.cell(id, cell.table, cell.span)
            }
        };

        self.positions.insert(parent, position + 1);
        self.phrase_num += 1;
        Ok(builder.build())
    }

    fn unknown(&self, parent: ParentRef) -> ParseError {
        ParseError::UnknownParent {
            document: self.document.to_string(),
            parent,
        }
    }
}
