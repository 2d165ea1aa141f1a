//! # Linguistic annotators
//!
//! The pipeline hands delimiter-aligned chunks of the block buffer to an
//! [`Annotator`] and gets back [`AnnotatedUnit`]s (sentences or phrases) in
//! chunk order.
//!
//! ## Implementations
//!
//! - **`whitespace`**: [`WhitespaceTokenizer`], one unit per block, split on
//!   whitespace. Used when linguistic analysis is disabled.
//! - **`corenlp`**: [`CoreNlpAnnotator`], a client for a CoreNLP-compatible
//!   annotation server.
//!
//! Both produce the same unit shape, so the batch reconciliation never needs
//! to know which one is in use.

pub mod corenlp;
pub mod whitespace;

pub use corenlp::{CoreNlpAnnotator, CoreNlpOptions, HttpTransport, Transport};
pub use whitespace::WhitespaceTokenizer;

use crate::models::StableId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    #[error("request of {len} bytes exceeds the annotator limit of {limit} bytes")]
    TooLong { len: usize, limit: usize },
    #[error("annotator request timed out")]
    TimedOut,
    #[error("annotator transport error: {0}")]
    Transport(String),
}

/// One annotated unit (a sentence for CoreNLP, a block for the whitespace tokenizer).
///
/// Every token array has one entry per word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedUnit {
    pub stable_id: StableId,
    pub text: String,
    pub words: Vec<String>,
    pub lemmas: Vec<String>,
    pub pos_tags: Vec<String>,
    pub ner_tags: Vec<String>,
    /// Byte offset of each word relative to the start of `text`.
    pub char_offsets: Vec<usize>,
    pub dep_parents: Vec<usize>,
    pub dep_labels: Vec<String>,
    pub tree: Option<String>,
    /// Byte offset of the unit's first character within the chunk.
    pub start: usize,
    /// Byte offset just past the unit's last character within the chunk.
    pub end: usize,
}

/// Result of annotating one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub units: Vec<AnnotatedUnit>,
    /// Set when the response could not be read in full. `units` then holds
    /// whatever was read before the problem.
    pub malformed: Option<String>,
}

impl Annotation {
    pub fn complete(units: Vec<AnnotatedUnit>) -> Self {
        Self {
            units,
            malformed: None,
        }
    }

    pub fn malformed(units: Vec<AnnotatedUnit>, reason: impl Into<String>) -> Self {
        Self {
            units,
            malformed: Some(reason.into()),
        }
    }
}

/// Converts text chunks into annotated units.
///
/// Implementations are shared between worker threads when several documents
/// are parsed at once, hence the `Send + Sync` bound.
pub trait Annotator: Send + Sync {
    /// Annotates `chunk`, a delimiter-terminated run of blocks from `document`.
    fn annotate(&self, document: &str, chunk: &str) -> Result<Annotation, AnnotateError>;
}
