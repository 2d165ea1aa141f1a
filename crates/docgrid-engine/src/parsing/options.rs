use serde::{Deserialize, Serialize};

/// Separator written after every block in the concatenated buffer.
pub const DELIMITER: &str = "<NB>";

/// Default batch size in bytes when linguistic annotation is enabled.
pub const LINGUAL_BATCH_SIZE: usize = 7000;

/// Default batch size in bytes for the whitespace tokenizer.
pub const PLAIN_BATCH_SIZE: usize = 1_000_000;

/// Markup dialect of the input documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Html,
    Xml,
}

/// One ordered regex rewrite applied to every extracted text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub pattern: String,
    /// Replacement text; `$1`/`${name}` refer to capture groups.
    pub replace: String,
}

impl Replacement {
    pub fn new(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replace: replace.into(),
        }
    }
}

/// Switches and rules that drive the tree walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Record XPath, tag and attributes for every block.
    pub structural: bool,
    /// Tags skipped entirely, children included.
    pub blacklist: Vec<String>,
    /// Inline tags merged into the surrounding text before extraction.
    pub flatten: Vec<String>,
    pub flatten_delim: String,
    /// Whether a linguistic annotator is in use; only affects the default batch size.
    pub lingual: bool,
    pub strip: bool,
    pub replacements: Vec<Replacement>,
    /// Track tables and cells and attach them to phrases.
    pub tabular: bool,
    pub format: SourceFormat,
    /// Maximum batch size in bytes. Derived from `lingual` when unset.
    pub batch_size: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            structural: true,
            blacklist: vec!["style".to_string(), "script".to_string()],
            flatten: vec!["span".to_string(), "br".to_string()],
            flatten_delim: String::new(),
            lingual: true,
            strip: true,
            replacements: vec![Replacement::new(
                "[\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2212}\u{f02d}]",
                "-",
            )],
            tabular: true,
            format: SourceFormat::Html,
            batch_size: None,
        }
    }
}

impl ParserOptions {
    pub fn effective_batch_size(&self) -> usize {
        match self.batch_size {
            Some(size) => size,
            None if self.lingual => LINGUAL_BATCH_SIZE,
            None => PLAIN_BATCH_SIZE,
        }
    }

    pub(crate) fn is_blacklisted(&self, tag: &str) -> bool {
        self.blacklist.iter().any(|t| t == tag)
    }

    pub(crate) fn is_flattened(&self, tag: &str) -> bool {
        self.flatten.iter().any(|t| t == tag)
    }
}
