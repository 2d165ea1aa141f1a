//! Pipeline tests for the parsing module.
//!
//! Each test parses a small inline document end to end and runs the
//! invariant checker over the result.

mod invariants;

use pretty_assertions::assert_eq;

use crate::annotate::{AnnotateError, WhitespaceTokenizer};
use crate::error::ParseError;
use crate::models::{CellId, Document, GridSpan, ParentRef, ParsedDocument, TableId};
use crate::parsing::DocumentParser;
use crate::parsing::options::{DELIMITER, ParserOptions, SourceFormat};
use crate::tests::{LimitedAnnotator, RecordingAnnotator};

fn parse_with(options: ParserOptions, name: &str, html: &str) -> ParsedDocument {
    let parser = DocumentParser::new(options).unwrap();
    let doc = Document::new(name, html);
    let walked = parser.walk(&doc).unwrap();
    invariants::check_blocks(&walked.buffer, &walked.blocks);

    let parsed = parser
        .parse(doc, &WhitespaceTokenizer::new(DELIMITER))
        .unwrap();
    invariants::check(&parsed);
    parsed
}

fn parse(html: &str) -> ParsedDocument {
    parse_with(ParserOptions::default(), "doc", html)
}

fn span(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> GridSpan {
    GridSpan {
        row_start,
        row_end,
        col_start,
        col_end,
    }
}

#[test]
fn colspan_table_end_to_end() {
    let doc = parse(
        r#"<table>
             <tr><td colspan="2">header</td></tr>
             <tr><td>left</td><td>right</td></tr>
           </table>"#,
    );

    assert_eq!(doc.tables.len(), 1);
    let spans: Vec<_> = doc.cells.iter().map(|c| c.span).collect();
    assert_eq!(spans, vec![span(0, 0, 0, 1), span(1, 1, 0, 0), span(1, 1, 1, 1)]);

    let links: Vec<_> = doc
        .phrases
        .iter()
        .map(|p| (p.text.as_str(), p.table, p.cell, p.span))
        .collect();
    assert_eq!(
        links,
        vec![
            ("header", Some(TableId(0)), Some(CellId(0)), Some(span(0, 0, 0, 1))),
            ("left", Some(TableId(0)), Some(CellId(1)), Some(span(1, 1, 0, 0))),
            ("right", Some(TableId(0)), Some(CellId(2)), Some(span(1, 1, 1, 1))),
        ]
    );
}

#[test]
fn oversized_spans_are_clamped_and_neighbours_unaffected() {
    let huge = Document::new(
        "huge",
        r#"<table><tr><td rowspan="18446744073709551615">tall</td><td colspan="99999999999">wide</td></tr></table>"#,
    );
    let plain = Document::new("plain", "<p>fine</p>");
    let parser = DocumentParser::new(ParserOptions::default()).unwrap();

    let results = parser.parse_many(vec![huge, plain], &WhitespaceTokenizer::new(DELIMITER));

    let huge = results[0].as_ref().unwrap();
    invariants::check(huge);
    let spans: Vec<_> = huge.cells.iter().map(|c| c.span).collect();
    assert_eq!(spans, vec![span(0, 65533, 0, 0), span(0, 0, 1, 1000)]);
    assert_eq!(results[1].as_ref().unwrap().phrases[0].text, "fine");
}

#[test]
fn rowspan_and_colspan_rectangle() {
    let doc = parse(
        r#"<table>
             <tr><td rowspan="2" colspan="3">big</td><td>r0</td></tr>
             <tr><td>r1</td></tr>
           </table>"#,
    );
    let spans: Vec<_> = doc.cells.iter().map(|c| c.span).collect();
    assert_eq!(spans, vec![span(0, 1, 0, 2), span(0, 0, 3, 3), span(1, 1, 3, 3)]);
}

#[test]
fn nested_table_has_its_own_grid() {
    let doc = parse(
        "<table><tr>\
           <td>outer<table><tr><td>inner a</td><td>inner b</td></tr></table>after</td>\
           <td>second</td>\
         </tr></table>",
    );

    assert_eq!(doc.tables.len(), 2);
    let cells: Vec<_> = doc
        .cells
        .iter()
        .map(|c| (c.stable_id.to_string(), c.table, c.position))
        .collect();
    assert_eq!(
        cells,
        vec![
            ("doc::cell:0:0:0".to_string(), TableId(0), 0),
            ("doc::cell:1:0:0".to_string(), TableId(1), 0),
            ("doc::cell:1:0:1".to_string(), TableId(1), 1),
            ("doc::cell:0:0:1".to_string(), TableId(0), 1),
        ]
    );

    let parents: Vec<_> = doc
        .phrases
        .iter()
        .map(|p| (p.text.as_str(), p.parent))
        .collect();
    assert_eq!(
        parents,
        vec![
            ("outer", ParentRef::Cell(CellId(0))),
            ("inner a", ParentRef::Cell(CellId(1))),
            ("inner b", ParentRef::Cell(CellId(2))),
            ("after", ParentRef::Cell(CellId(0))),
            ("second", ParentRef::Cell(CellId(3))),
        ]
    );
}

#[test]
fn style_contributes_no_blocks() {
    let parser = DocumentParser::new(ParserOptions::default()).unwrap();
    let doc = Document::new("doc", "<style>p { color: red }</style><p>body text</p>");
    let walked = parser.walk(&doc).unwrap();
    let texts: Vec<_> = walked.blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["body text"]);
}

#[test]
fn flattened_span_is_one_phrase() {
    let doc = parse("<p>Hello<span>there</span>!</p>");
    assert_eq!(doc.phrases.len(), 1);
    assert_eq!(doc.phrases[0].text, "Hellothere!");
}

#[test]
fn stable_ids_are_deterministic() {
    let html = "<h1>Title</h1><table><tr><td>a</td><td>b</td></tr></table><p>end</p>";
    let ids = |doc: &ParsedDocument| -> Vec<String> {
        doc.tables
            .iter()
            .map(|t| t.stable_id.to_string())
            .chain(doc.cells.iter().map(|c| c.stable_id.to_string()))
            .chain(doc.phrases.iter().map(|p| p.stable_id.to_string()))
            .collect()
    };

    let first = ids(&parse_with(ParserOptions::default(), "report", html));
    let second = ids(&parse_with(ParserOptions::default(), "report", html));
    assert_eq!(first, second);

    insta::assert_snapshot!(first.join("\n"), @r"
    report::table:0:0
    report::cell:0:0:0
    report::cell:0:0:1
    report::phrase:0:0
    report::phrase:1:1
    report::phrase:2:2
    report::phrase:3:3
    ");
}

#[test]
fn xml_documents_use_the_same_pipeline() {
    let options = ParserOptions {
        format: SourceFormat::Xml,
        ..Default::default()
    };
    let doc = parse_with(
        options,
        "article",
        r#"<article><sec id="s1"><title>Intro</title><p>First para.</p></sec>
           <table><tr><td>x</td></tr></table></article>"#,
    );
    let rows: Vec<_> = doc
        .phrases
        .iter()
        .map(|p| (p.text.as_str(), p.structural.as_ref().unwrap().xpath.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Intro", "/article/sec/title"),
            ("First para.", "/article/sec/p"),
            ("x", "/article/table/tr/td"),
        ]
    );
    assert_eq!(doc.cells.len(), 1);
}

#[test]
fn malformed_xml_is_a_markup_error() {
    let parser = DocumentParser::new(ParserOptions {
        format: SourceFormat::Xml,
        ..Default::default()
    })
    .unwrap();
    let err = parser
        .parse(
            Document::new("broken", "<a><b></a>"),
            &WhitespaceTokenizer::new(DELIMITER),
        )
        .unwrap_err();
    assert!(matches!(err, ParseError::Markup { document, .. } if document == "broken"));
}

#[test]
fn oversized_document_fails_as_a_whole() {
    let parser = DocumentParser::new(ParserOptions {
        batch_size: Some(32),
        ..Default::default()
    })
    .unwrap();
    let long = "word ".repeat(20);
    let doc = Document::new("big", format!("<p>short</p><p>{long}</p>"));
    let err = parser.parse(doc, &LimitedAnnotator::new(32)).unwrap_err();
    assert!(matches!(err, ParseError::TooLong { document, limit: 32 } if document == "big"));
}

#[test]
fn batches_end_on_delimiters() {
    let parser = DocumentParser::new(ParserOptions {
        batch_size: Some(40),
        ..Default::default()
    })
    .unwrap();
    let html: String = (0..20).map(|i| format!("<p>paragraph {i}</p>")).collect();
    let doc = Document::new("doc", html);
    let walked = parser.walk(&doc).unwrap();

    let annotator = RecordingAnnotator::default();
    let parsed = parser.parse(doc, &annotator).unwrap();
    invariants::check(&parsed);
    assert_eq!(parsed.phrases.len(), 20);

    let chunks = annotator.chunks();
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.ends_with(DELIMITER)));
    assert_eq!(chunks.concat(), walked.buffer);
}

#[test]
fn parse_many_isolates_failures() {
    let parser = DocumentParser::new(ParserOptions {
        format: SourceFormat::Xml,
        ..Default::default()
    })
    .unwrap();
    let docs = vec![
        Document::new("a", "<d><p>one</p></d>"),
        Document::new("b", "<d><p>two</d>"),
        Document::new("c", "<d><p>three</p></d>"),
    ];
    let results = parser.parse_many(docs, &WhitespaceTokenizer::new(DELIMITER));

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().phrases[0].text, "one");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().document.name, "c");
}

#[test]
fn timeouts_abort_the_document() {
    let parser = DocumentParser::new(ParserOptions::default()).unwrap();
    let err = parser
        .parse(
            Document::new("slow", "<p>x</p>"),
            &crate::tests::FailingAnnotator(AnnotateError::TimedOut),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "annotator timed out on document slow");
}
