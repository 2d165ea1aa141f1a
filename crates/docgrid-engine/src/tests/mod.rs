//! Shared helpers for unit tests across the crate.

use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::annotate::{AnnotateError, Annotation, Annotator, WhitespaceTokenizer};
use crate::parsing::options::DELIMITER;

pub fn create_test_corpus_dir() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Annotator that always fails with the given error.
pub struct FailingAnnotator(pub AnnotateError);

impl Annotator for FailingAnnotator {
    fn annotate(&self, _document: &str, _chunk: &str) -> Result<Annotation, AnnotateError> {
        Err(self.0.clone())
    }
}

/// Whitespace tokenizer that rejects chunks above a size limit, like a real
/// annotation server would.
pub struct LimitedAnnotator {
    limit: usize,
    inner: WhitespaceTokenizer,
}

impl LimitedAnnotator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            inner: WhitespaceTokenizer::new(DELIMITER),
        }
    }
}

impl Annotator for LimitedAnnotator {
    fn annotate(&self, document: &str, chunk: &str) -> Result<Annotation, AnnotateError> {
        if chunk.len() > self.limit {
            return Err(AnnotateError::TooLong {
                len: chunk.len(),
                limit: self.limit,
            });
        }
        self.inner.annotate(document, chunk)
    }
}

/// Whitespace tokenizer that remembers every chunk it was given.
pub struct RecordingAnnotator {
    inner: WhitespaceTokenizer,
    chunks: Mutex<Vec<String>>,
}

impl Default for RecordingAnnotator {
    fn default() -> Self {
        Self {
            inner: WhitespaceTokenizer::new(DELIMITER),
            chunks: Mutex::new(vec![]),
        }
    }
}

impl RecordingAnnotator {
    pub fn chunks(&self) -> Vec<String> {
        self.chunks.lock().unwrap().clone()
    }
}

impl Annotator for RecordingAnnotator {
    fn annotate(&self, document: &str, chunk: &str) -> Result<Annotation, AnnotateError> {
        self.chunks.lock().unwrap().push(chunk.to_string());
        self.inner.annotate(document, chunk)
    }
}
