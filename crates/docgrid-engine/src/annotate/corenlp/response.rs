use serde::Deserialize;

use crate::annotate::{AnnotateError, AnnotatedUnit, Annotation};
use crate::models::StableId;

const TOO_LONG: &str = "Request is too long";
const TIMED_OUT: &str = "CoreNLP request timed out";

/// Penn Treebank escapes the server applies to brackets.
const PTB: [(&str, &str); 6] = [
    ("-LRB-", "("),
    ("-RRB-", ")"),
    ("-LCB-", "{"),
    ("-RCB-", "}"),
    ("-LSB-", "["),
    ("-RSB-", "]"),
];

#[derive(Debug, Deserialize)]
struct Response {
    sentences: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    tokens: Vec<Token>,
    #[serde(rename = "basic-dependencies", default)]
    basic_dependencies: Vec<Dependency>,
    #[serde(default)]
    parse: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Token {
    word: String,
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    ner: String,
    original_text: String,
    #[serde(default)]
    after: String,
    character_offset_begin: usize,
    character_offset_end: usize,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    dep: String,
    governor: usize,
    dependent: usize,
}

/// Reads a CoreNLP JSON response for `chunk` into annotated units.
///
/// Server-side size and time limits surface as errors. Anything else that
/// cannot be read ends the annotation early with a `malformed` note while
/// keeping the sentences read so far.
pub fn parse_response(
    document: &str,
    chunk: &str,
    body: &str,
    parse_tree: bool,
    limit: usize,
) -> Result<Annotation, AnnotateError> {
    let body = body.trim();
    if body.starts_with(TOO_LONG) {
        return Err(AnnotateError::TooLong {
            len: chunk.len(),
            limit,
        });
    }
    if body.starts_with(TIMED_OUT) {
        return Err(AnnotateError::TimedOut);
    }

    let response: Response = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Ok(Annotation::malformed(vec![], format!("unreadable response: {e}"))),
    };

    let offsets = Utf16Offsets::new(chunk);
    let mut units = Vec::with_capacity(response.sentences.len());
    for (i, raw) in response.sentences.into_iter().enumerate() {
        let sentence: Sentence = match serde_json::from_value(raw) {
            Ok(s) => s,
            Err(e) => return Ok(Annotation::malformed(units, format!("sentence {i}: {e}"))),
        };
        match to_unit(document, sentence, &offsets, parse_tree) {
            Ok(Some(unit)) => units.push(unit),
            Ok(None) => {}
            Err(reason) => return Ok(Annotation::malformed(units, format!("sentence {i}: {reason}"))),
        }
    }

    Ok(Annotation::complete(units))
}

fn to_unit(
    document: &str,
    sentence: Sentence,
    offsets: &Utf16Offsets,
    parse_tree: bool,
) -> Result<Option<AnnotatedUnit>, String> {
    let (Some(first), Some(last)) = (sentence.tokens.first(), sentence.tokens.last()) else {
        return Ok(None);
    };

    let start = offsets.byte(first.character_offset_begin)?;
    let end = offsets.byte(last.character_offset_end)?;

    let n = sentence.tokens.len();
    let mut dep_parents = vec![0; n];
    let mut dep_labels = vec![String::new(); n];
    // Dependencies arrive in arbitrary order; `dependent` is the 1-based token index.
    for d in sentence.basic_dependencies {
        if (1..=n).contains(&d.dependent) {
            dep_parents[d.dependent - 1] = d.governor;
            dep_labels[d.dependent - 1] = d.dep;
        }
    }

    let mut text = String::new();
    let mut words = Vec::with_capacity(n);
    let mut lemmas = Vec::with_capacity(n);
    let mut pos_tags = Vec::with_capacity(n);
    let mut ner_tags = Vec::with_capacity(n);
    let mut char_offsets = Vec::with_capacity(n);
    for tok in sentence.tokens {
        let begin = offsets.byte(tok.character_offset_begin)?;
        char_offsets.push(begin.saturating_sub(start));
        text.push_str(&tok.original_text);
        text.push_str(&tok.after);
        words.push(unescape_ptb(tok.word));
        lemmas.push(unescape_ptb(tok.lemma));
        pos_tags.push(tok.pos);
        ner_tags.push(tok.ner);
    }
    text.truncate(text.trim_end().len());

    let tree = sentence
        .parse
        .filter(|_| parse_tree)
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "));

    Ok(Some(AnnotatedUnit {
        stable_id: StableId::sentence(document, start, end),
        text,
        words,
        lemmas,
        pos_tags,
        ner_tags,
        char_offsets,
        dep_parents,
        dep_labels,
        tree,
        start,
        end,
    }))
}

fn unescape_ptb(token: String) -> String {
    PTB.iter()
        .find(|(escaped, _)| *escaped == token)
        .map(|(_, plain)| (*plain).to_string())
        .unwrap_or(token)
}

/// Maps UTF-16 code unit indices (what the server reports) to byte offsets.
struct Utf16Offsets(Vec<usize>);

impl Utf16Offsets {
    fn new(text: &str) -> Self {
        let mut map = Vec::with_capacity(text.len() + 1);
        for (byte, ch) in text.char_indices() {
            for _ in 0..ch.len_utf16() {
                map.push(byte);
            }
        }
        map.push(text.len());
        Self(map)
    }

    fn byte(&self, utf16: usize) -> Result<usize, String> {
        self.0
            .get(utf16)
            .copied()
            .ok_or_else(|| format!("offset {utf16} is outside the chunk"))
    }
}
