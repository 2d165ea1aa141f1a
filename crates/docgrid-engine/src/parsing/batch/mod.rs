//! Annotator batching: split the block buffer, annotate each batch and trace
//! every returned unit back to the block it came from.

pub mod reconcile;
pub mod splitter;

pub use reconcile::BlockCursor;
pub use splitter::BatchSplitter;

use crate::annotate::{AnnotatedUnit, Annotator};
use crate::error::ParseError;
use crate::models::ParseWarning;

use super::accumulator::Block;

/// An annotated unit together with the index of its originating block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub block: usize,
    pub unit: AnnotatedUnit,
}

/// Annotates `buffer` batch by batch.
///
/// Annotator failures abort the document. A malformed response, or a unit
/// whose end falls outside its batch, drops the rest of that batch with a
/// warning and processing moves on to the next batch.
pub fn annotate_batches(
    document: &str,
    buffer: &str,
    blocks: &[Block],
    annotator: &dyn Annotator,
    max_len: usize,
) -> Result<(Vec<Reconciled>, Vec<ParseWarning>), ParseError> {
    let mut cursor = BlockCursor::new(blocks);
    let mut reconciled = vec![];
    let mut warnings = vec![];

    for range in BatchSplitter::new(blocks, max_len) {
        let chunk = &buffer[range.clone()];
        log::debug!(
            "{document}: annotating batch {}..{} ({} bytes)",
            range.start,
            range.end,
            chunk.len()
        );
        let annotation = annotator
            .annotate(document, chunk)
            .map_err(|e| ParseError::from_annotator(document, e))?;

        let mut warn = |message: String| {
            log::warn!("{document}: batch {}..{}: {message}", range.start, range.end);
            warnings.push(ParseWarning {
                batch_start: range.start,
                batch_end: range.end,
                message,
            });
        };

        for unit in annotation.units {
            let end = range.start + unit.end;
            let located = (end <= range.end).then(|| cursor.locate(end)).flatten();
            let Some(block) = located else {
                warn(format!(
                    "unit ending at offset {end} lies outside the batch; skipping the rest of the batch"
                ));
                break;
            };
            reconciled.push(Reconciled { block, unit });
        }
        if let Some(reason) = annotation.malformed {
            warn(format!("malformed annotator output: {reason}"));
        }
    }

    Ok((reconciled, warnings))
}
