use regex::Regex;

use crate::error::ParseError;
use crate::parsing::options::Replacement;

/// Strip and rewrite pipeline applied to every text run before it becomes a block.
#[derive(Debug)]
pub struct TextNormalizer {
    strip: bool,
    rules: Vec<(Regex, String)>,
}

impl TextNormalizer {
    pub fn new(strip: bool, replacements: &[Replacement]) -> Result<Self, ParseError> {
        let rules = replacements
            .iter()
            .map(|r| {
                Regex::new(&r.pattern)
                    .map(|re| (re, r.replace.clone()))
                    .map_err(|source| ParseError::InvalidReplacement {
                        pattern: r.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { strip, rules })
    }

    /// Returns the normalized run, or `None` when there is nothing to keep.
    ///
    /// Emptiness is decided before the rewrite rules run. Rules apply one
    /// after another in list order, each seeing the previous rule's output.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let text = if self.strip { raw.trim() } else { raw };
        if text.is_empty() {
            return None;
        }
        let mut out = text.to_string();
        for (re, replace) in &self.rules {
            out = re.replace_all(&out, replace.as_str()).into_owned();
        }
        Some(out)
    }
}
