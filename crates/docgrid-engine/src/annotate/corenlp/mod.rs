pub mod response;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use response::parse_response;
pub use transport::{HttpTransport, Transport};

use super::{AnnotateError, Annotation, Annotator};

/// Request options for a CoreNLP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreNlpOptions {
    pub annotators: Vec<String>,
    /// Tokenize on whitespace only.
    pub tokenize_whitespace: bool,
    /// Treat every newline as a sentence end.
    pub split_newline: bool,
    /// Request and keep constituency parse trees.
    pub parse_tree: bool,
    pub ptb3_escaping: bool,
    /// Disable the PTB tokenizer's normalisation hacks.
    pub strict_ptb: bool,
    /// Markup-like boundary token the server should split on and discard
    /// (the block delimiter without its angle brackets).
    pub boundary: Option<String>,
    /// Largest chunk, in bytes, the server accepts.
    pub max_chunk_len: usize,
}

impl Default for CoreNlpOptions {
    fn default() -> Self {
        Self {
            annotators: ["tokenize", "ssplit", "pos", "lemma", "depparse", "ner"]
                .map(String::from)
                .to_vec(),
            tokenize_whitespace: false,
            split_newline: false,
            parse_tree: false,
            ptb3_escaping: true,
            strict_ptb: false,
            boundary: None,
            max_chunk_len: 100_000,
        }
    }
}

impl CoreNlpOptions {
    /// The `properties` query value sent with every request.
    pub fn properties(&self) -> String {
        let mut annotators = self.annotators.clone();
        if self.parse_tree && !annotators.iter().any(|a| a == "parse") {
            annotators.push("parse".to_string());
        }

        let mut props = serde_json::Map::new();
        props.insert("annotators".into(), annotators.join(",").into());
        props.insert("outputFormat".into(), "json".into());
        if self.tokenize_whitespace {
            props.insert("tokenize.whitespace".into(), "true".into());
        }
        if self.split_newline {
            props.insert("ssplit.eolonly".into(), "true".into());
        }
        if let Some(boundary) = &self.boundary {
            props.insert(
                "ssplit.htmlBoundariesToDiscard".into(),
                boundary.clone().into(),
            );
        }
        if let Some(opts) = self.tokenize_options() {
            props.insert("tokenize.options".into(), opts.into());
        }
        serde_json::Value::Object(props).to_string()
    }

    fn tokenize_options(&self) -> Option<String> {
        match (self.ptb3_escaping, self.strict_ptb) {
            (_, false) => None,
            (true, true) => Some("ptb3Escaping=true,strictTreebank3=true".to_string()),
            (false, true) => Some(
                [
                    "invertible=true",
                    "normalizeParentheses=false",
                    "normalizeFractions=false",
                    "normalizeOtherBrackets=false",
                    "normalizeCurrency=false",
                    "asciiQuotes=true",
                    "latexQuotes=false",
                    "ptb3Ellipsis=false",
                    "ptb3Dashes=false",
                    "escapeForwardSlashAsterisk=false",
                    "strictTreebank3=true",
                ]
                .join(","),
            ),
        }
    }
}

/// Annotator backed by a CoreNLP-compatible server.
#[derive(Debug)]
pub struct CoreNlpAnnotator<T: Transport> {
    options: CoreNlpOptions,
    properties: String,
    transport: T,
}

impl<T: Transport> CoreNlpAnnotator<T> {
    pub fn new(options: CoreNlpOptions, transport: T) -> Self {
        let properties = options.properties();
        Self {
            options,
            properties,
            transport,
        }
    }
}

impl<T: Transport> Annotator for CoreNlpAnnotator<T> {
    fn annotate(&self, document: &str, chunk: &str) -> Result<Annotation, AnnotateError> {
        let limit = self.options.max_chunk_len;
        if chunk.len() > limit {
            return Err(AnnotateError::TooLong {
                len: chunk.len(),
                limit,
            });
        }
        if chunk.trim().is_empty() {
            log::warn!("empty chunk passed to the annotator for {document}");
            return Ok(Annotation::malformed(vec![], "empty chunk"));
        }

        // Both characters are a single UTF-16 unit, so server offsets stay
        // valid against the original chunk.
        let cleaned = chunk.replace('\u{a0}', " ");
        let body = self.transport.post(&self.properties, &cleaned)?;
        parse_response(document, chunk, &body, self.options.parse_tree, limit)
    }
}
