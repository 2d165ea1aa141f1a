use super::{AnnotateError, AnnotatedUnit, Annotation, Annotator};
use crate::models::StableId;

/// Trivial annotator that splits blocks on whitespace.
///
/// Each non-blank delimiter-separated piece of the chunk becomes one unit whose
/// text is its words joined by single spaces. Lemmas repeat the words and the
/// tag arrays hold empty strings, so the unit shape matches what a full
/// linguistic annotator returns.
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer {
    delimiter: String,
}

impl WhitespaceTokenizer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl Annotator for WhitespaceTokenizer {
    fn annotate(&self, document: &str, chunk: &str) -> Result<Annotation, AnnotateError> {
        let mut units = Vec::new();
        let mut offset = 0;

        for piece in chunk.split(self.delimiter.as_str()) {
            let piece_start = offset;
            offset += piece.len() + self.delimiter.len();

            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }

            let words: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
            let mut char_offsets = Vec::with_capacity(words.len());
            let mut at = 0;
            for w in &words {
                char_offsets.push(at);
                at += w.len() + 1;
            }

            let leading = piece.len() - piece.trim_start().len();
            let start = piece_start + leading;
            let n = words.len();

            units.push(AnnotatedUnit {
                stable_id: StableId::phrase(document, units.len()),
                text: words.join(" "),
                lemmas: words.clone(),
                pos_tags: vec![String::new(); n],
                ner_tags: vec![String::new(); n],
                char_offsets,
                dep_parents: vec![0; n],
                dep_labels: vec![String::new(); n],
                tree: None,
                start,
                end: start + trimmed.len(),
                words,
            });
        }

        Ok(Annotation::complete(units))
    }
}
