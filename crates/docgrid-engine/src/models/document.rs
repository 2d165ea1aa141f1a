use std::collections::BTreeMap;

use serde::Serialize;

use super::{Cell, Phrase, StableId, Table};

/// Root context for one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub name: String,
    pub stable_id: StableId,
    /// Raw markup source.
    pub text: String,
    pub meta: BTreeMap<String, String>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            stable_id: StableId::document(&name),
            name,
            text: text.into(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// A batch-level problem that was absorbed instead of failing the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// Byte range of the batch within the concatenated block buffer.
    pub batch_start: usize,
    pub batch_end: usize,
    pub message: String,
}

/// Everything produced from one document, ready to be handed to storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub document: Document,
    pub tables: Vec<Table>,
    pub cells: Vec<Cell>,
    pub phrases: Vec<Phrase>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

