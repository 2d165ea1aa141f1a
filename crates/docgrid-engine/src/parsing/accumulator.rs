use crate::models::{ParentRef, StructuralAttrs};

/// One extracted text run, before annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    /// Bytes taken up in the buffer: text plus delimiter.
    pub len: usize,
    /// Cumulative buffer offset just past this block's delimiter.
    pub end: usize,
    pub parent: ParentRef,
    pub structural: Option<StructuralAttrs>,
}

impl Block {
    /// Buffer offset of the block's first byte.
    pub fn start(&self) -> usize {
        self.end - self.len
    }
}

/// Concatenates block texts into one delimiter-terminated buffer.
#[derive(Debug)]
pub struct TextBlockAccumulator {
    delimiter: String,
    buffer: String,
    blocks: Vec<Block>,
}

impl TextBlockAccumulator {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            buffer: String::new(),
            blocks: vec![],
        }
    }

    pub fn push(&mut self, text: String, parent: ParentRef, structural: Option<StructuralAttrs>) {
        self.buffer.push_str(&text);
        self.buffer.push_str(&self.delimiter);
        let len = text.len() + self.delimiter.len();
        self.blocks.push(Block {
            text,
            len,
            end: self.buffer.len(),
            parent,
            structural,
        });
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn finish(self) -> (String, Vec<Block>) {
        (self.buffer, self.blocks)
    }
}
