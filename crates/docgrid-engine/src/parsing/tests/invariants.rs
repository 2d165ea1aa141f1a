use std::collections::{BTreeMap, HashSet};

use crate::models::{ParentRef, ParsedDocument};
use crate::parsing::accumulator::Block;
use crate::parsing::options::DELIMITER;

/// Validates parser output invariants.
///
/// Asserts that:
/// - Phrase positions are `0..k` within every parent
/// - Phrase numbers are `0..n` across the document
/// - No two cells of a table overlap
/// - Stable identifiers are unique
/// - Phrases link to the table and span of their cell
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(doc: &ParsedDocument) {
    let mut by_parent: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for p in &doc.phrases {
        by_parent
            .entry(format!("{:?}", p.parent))
            .or_default()
            .push(p.position);
    }
    for (parent, mut positions) in by_parent {
        positions.sort_unstable();
        let expected: Vec<usize> = (0..positions.len()).collect();
        assert_eq!(positions, expected, "positions not contiguous for {parent}");
    }

    let nums: Vec<usize> = doc.phrases.iter().map(|p| p.phrase_num).collect();
    let expected: Vec<usize> = (0..doc.phrases.len()).collect();
    assert_eq!(nums, expected, "phrase numbers not sequential");

    for (i, a) in doc.cells.iter().enumerate() {
        for b in &doc.cells[i + 1..] {
            assert!(
                a.table != b.table || !a.span.overlaps(&b.span),
                "cells overlap: {} {:?} and {} {:?}",
                a.stable_id,
                a.span,
                b.stable_id,
                b.span
            );
        }
    }

    let mut seen = HashSet::new();
    let ids = std::iter::once(doc.document.stable_id.to_string())
        .chain(doc.tables.iter().map(|t| t.stable_id.to_string()))
        .chain(doc.cells.iter().map(|c| c.stable_id.to_string()))
        .chain(doc.phrases.iter().map(|p| p.stable_id.to_string()));
    for id in ids {
        assert!(seen.insert(id.clone()), "duplicate stable id {id}");
    }

    for p in &doc.phrases {
        match p.parent {
            ParentRef::Document => {
                assert!(p.table.is_none() && p.cell.is_none(), "{} has tabular links", p.stable_id)
            }
            ParentRef::Table(t) => assert_eq!(p.table, Some(t), "{} table link", p.stable_id),
            ParentRef::Cell(c) => {
                let cell = doc
                    .cells
                    .get(c.0)
                    .unwrap_or_else(|| panic!("{} links to missing cell", p.stable_id));
                assert_eq!(p.cell, Some(c));
                assert_eq!(p.table, Some(cell.table));
                assert_eq!(p.span, Some(cell.span));
            }
        }
    }
}

/// Asserts that blocks tile the buffer exactly, each ending in the delimiter.
pub fn check_blocks(buffer: &str, blocks: &[Block]) {
    let mut at = 0;
    for b in blocks {
        assert_eq!(b.start(), at, "block {:?} does not start where the last ended", b.text);
        assert_eq!(&buffer[at..at + b.text.len()], b.text);
        assert_eq!(&buffer[at + b.text.len()..b.end], DELIMITER);
        at = b.end;
    }
    assert_eq!(at, buffer.len(), "blocks do not cover the whole buffer");
}
