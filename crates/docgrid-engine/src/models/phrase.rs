use serde::Serialize;

use super::{CellId, GridSpan, StableId, TableId};
use crate::annotate::AnnotatedUnit;

/// The structural owner of a block or phrase.
///
/// Exhaustive matching on this enum replaces runtime type checks: a phrase is
/// owned by the document itself, a table, or a cell, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ParentRef {
    Document,
    Table(TableId),
    Cell(CellId),
}

/// Markup context of the element a phrase's text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralAttrs {
    pub xpath: String,
    pub html_tag: String,
    /// Attributes rendered as `key=value`.
    pub html_attrs: Vec<String>,
}

/// Smallest annotated text unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phrase {
    pub stable_id: StableId,
    pub parent: ParentRef,
    /// Sequential index within `parent`.
    pub position: usize,
    /// Sequential index within the whole document.
    pub phrase_num: usize,
    pub text: String,
    pub words: Vec<String>,
    pub lemmas: Vec<String>,
    pub pos_tags: Vec<String>,
    pub ner_tags: Vec<String>,
    /// Byte offset of each word relative to the start of `text`.
    pub char_offsets: Vec<usize>,
    pub dep_parents: Vec<usize>,
    pub dep_labels: Vec<String>,
    pub entity_cids: Vec<String>,
    pub entity_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralAttrs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<GridSpan>,
}

/// Builds a [`Phrase`] one capability at a time.
///
/// Lingual fields come from the annotator, structural fields from the block's
/// markup snapshot and tabular fields from its owning table or cell. Each is
/// optional and set through its own method rather than by key insertion.
#[derive(Debug)]
pub struct PhraseBuilder {
    phrase: Phrase,
}

impl PhraseBuilder {
    pub fn new(stable_id: StableId, parent: ParentRef, position: usize, phrase_num: usize) -> Self {
        Self {
            phrase: Phrase {
                stable_id,
                parent,
                position,
                phrase_num,
                text: String::new(),
                words: Vec::new(),
                lemmas: Vec::new(),
                pos_tags: Vec::new(),
                ner_tags: Vec::new(),
                char_offsets: Vec::new(),
                dep_parents: Vec::new(),
                dep_labels: Vec::new(),
                entity_cids: Vec::new(),
                entity_types: Vec::new(),
                tree: None,
                structural: None,
                table: None,
                cell: None,
                span: None,
            },
        }
    }

    pub fn lingual(mut self, unit: AnnotatedUnit) -> Self {
        let p = &mut self.phrase;
        // No entity linking happens here; every word starts out unlinked.
        p.entity_cids = vec!["O".to_string(); unit.words.len()];
        p.entity_types = vec!["O".to_string(); unit.words.len()];
        p.text = unit.text;
        p.words = unit.words;
        p.lemmas = unit.lemmas;
        p.pos_tags = unit.pos_tags;
        p.ner_tags = unit.ner_tags;
        p.char_offsets = unit.char_offsets;
        p.dep_parents = unit.dep_parents;
        p.dep_labels = unit.dep_labels;
        p.tree = unit.tree;
        self
    }

    pub fn structural(mut self, attrs: StructuralAttrs) -> Self {
        self.phrase.structural = Some(attrs);
        self
    }

    pub fn table(mut self, table: TableId) -> Self {
        self.phrase.table = Some(table);
        self
    }

    /// Attaches a cell together with the table it belongs to and its grid span.
    pub fn cell(mut self, cell: CellId, table: TableId, span: GridSpan) -> Self {
        self.phrase.table = Some(table);
        self.phrase.cell = Some(cell);
        self.phrase.span = Some(span);
        self
    }

    pub fn build(self) -> Phrase {
        self.phrase
    }
}
