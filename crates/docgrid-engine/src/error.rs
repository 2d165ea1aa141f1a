use crate::annotate::AnnotateError;
use crate::models::ParentRef;

/// Failures that abort the parse of a single document.
///
/// Batch-local problems never show up here; they are recorded as
/// [`ParseWarning`](crate::models::ParseWarning)s on the parsed document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document {document} is too long for the annotator (limit {limit} bytes)")]
    TooLong { document: String, limit: usize },

    #[error("annotator timed out on document {document}")]
    TimedOut { document: String },

    #[error("annotator failed on document {document}: {source}")]
    Annotator {
        document: String,
        source: AnnotateError,
    },

    #[error("phrase parent {parent:?} does not resolve to an entity in document {document}")]
    UnknownParent { document: String, parent: ParentRef },

    #[error("invalid replacement pattern {pattern:?}: {source}")]
    InvalidReplacement {
        pattern: String,
        source: regex::Error,
    },

    #[error("could not read markup of document {document}: {message}")]
    Markup { document: String, message: String },
}

impl ParseError {
    /// Attributes an annotator failure to `document`.
    pub fn from_annotator(document: &str, err: AnnotateError) -> Self {
        match err {
            AnnotateError::TooLong { limit, .. } => ParseError::TooLong {
                document: document.to_string(),
                limit,
            },
            AnnotateError::TimedOut => ParseError::TimedOut {
                document: document.to_string(),
            },
            source @ AnnotateError::Transport(_) => ParseError::Annotator {
                document: document.to_string(),
                source,
            },
        }
    }
}
