use std::ops::Range;

use crate::parsing::accumulator::Block;

/// Cuts the block buffer into annotator-sized byte ranges.
///
/// Every range ends just past a block's delimiter, so no block is ever split
/// across two annotator calls. A range is the longest run of whole blocks
/// that fits in `max_len`; a single block longer than `max_len` becomes a
/// range of its own and is left for the annotator to reject.
#[derive(Debug)]
pub struct BatchSplitter<'a> {
    blocks: &'a [Block],
    max_len: usize,
    start: usize,
    next_block: usize,
}

impl<'a> BatchSplitter<'a> {
    pub fn new(blocks: &'a [Block], max_len: usize) -> Self {
        Self {
            blocks,
            max_len,
            start: 0,
            next_block: 0,
        }
    }
}

impl Iterator for BatchSplitter<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_block >= self.blocks.len() {
            return None;
        }
        let limit = self.start + self.max_len;
        let fitting = self.blocks[self.next_block..].partition_point(|b| b.end <= limit);
        let last = self.next_block + fitting.saturating_sub(1);

        let range = self.start..self.blocks[last].end;
        self.start = range.end;
        self.next_block = last + 1;
        Some(range)
    }
}
