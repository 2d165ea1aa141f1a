use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The kind of entity a [`StableId`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Document,
    /// Seed id handed out by a linguistic annotator, keyed by character span.
    Sentence,
    Phrase,
    Table,
    Cell,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Document => "document",
            EntityKind::Sentence => "sentence",
            EntityKind::Phrase => "phrase",
            EntityKind::Table => "table",
            EntityKind::Cell => "cell",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = StableIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(EntityKind::Document),
            "sentence" => Ok(EntityKind::Sentence),
            "phrase" => Ok(EntityKind::Phrase),
            "table" => Ok(EntityKind::Table),
            "cell" => Ok(EntityKind::Cell),
            other => Err(StableIdError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StableIdError {
    #[error("stable id has no '::' separator: {0}")]
    MissingSeparator(String),
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),
    #[error("stable id coordinate is not a number: {0}")]
    BadCoordinate(String),
    #[error("stable id needs at least two coordinates: {0}")]
    MissingCoordinates(String),
}

/// Deterministic identifier of an entity inside a document.
///
/// Rendered as `<document>::<kind>:<c0>:<c1>[:<c2>...]`. The value depends only
/// on the document name, the entity kind and its positional coordinates, so
/// reprocessing the same input always reproduces the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StableId {
    document: String,
    kind: EntityKind,
    coords: Vec<usize>,
}

impl StableId {
    pub fn new(document: impl Into<String>, kind: EntityKind, coords: Vec<usize>) -> Self {
        Self {
            document: document.into(),
            kind,
            coords,
        }
    }

    pub fn document(name: &str) -> Self {
        Self::new(name, EntityKind::Document, vec![0, 0])
    }

    pub fn table(document: &str, index: usize) -> Self {
        Self::new(document, EntityKind::Table, vec![index, index])
    }

    /// Cells are keyed by their table's index and their top-left grid corner.
    pub fn cell(document: &str, table: usize, row_start: usize, col_start: usize) -> Self {
        Self::new(document, EntityKind::Cell, vec![table, row_start, col_start])
    }

    pub fn phrase(document: &str, n: usize) -> Self {
        Self::new(document, EntityKind::Phrase, vec![n, n])
    }

    pub fn sentence(document: &str, start: usize, end: usize) -> Self {
        Self::new(document, EntityKind::Sentence, vec![start, end])
    }

    pub fn document_name(&self) -> &str {
        &self.document
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// First coordinate.
    pub fn start(&self) -> usize {
        self.coords.first().copied().unwrap_or_default()
    }

    /// Last coordinate.
    pub fn end(&self) -> usize {
        self.coords.last().copied().unwrap_or_default()
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.document, self.kind)?;
        for c in &self.coords {
            write!(f, ":{c}")?;
        }
        Ok(())
    }
}

impl FromStr for StableId {
    type Err = StableIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Document names may themselves contain "::", the kind part never does.
        let (document, rest) = s
            .rsplit_once("::")
            .ok_or_else(|| StableIdError::MissingSeparator(s.to_string()))?;

        let mut parts = rest.split(':');
        let kind = parts.next().unwrap_or_default().parse::<EntityKind>()?;
        let coords = parts
            .map(|p| {
                p.parse::<usize>()
                    .map_err(|_| StableIdError::BadCoordinate(p.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if coords.len() < 2 {
            return Err(StableIdError::MissingCoordinates(s.to_string()));
        }

        Ok(Self::new(document, kind, coords))
    }
}

impl Serialize for StableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
