use crate::parsing::accumulator::Block;

/// Maps buffer offsets back to block indices.
///
/// The cursor only moves forward, so locating every unit of a document costs
/// one pass over the blocks. Offsets must be supplied in document order.
#[derive(Debug)]
pub struct BlockCursor<'a> {
    blocks: &'a [Block],
    idx: usize,
}

impl<'a> BlockCursor<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Self { blocks, idx: 0 }
    }

    /// Index of the block whose span contains `end`, the buffer offset where
    /// an annotated unit stops. `None` once `end` lies past the last block.
    pub fn locate(&mut self, end: usize) -> Option<usize> {
        while self.idx < self.blocks.len() && end > self.blocks[self.idx].end {
            self.idx += 1;
        }
        (self.idx < self.blocks.len()).then_some(self.idx)
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.idx
    }
}
