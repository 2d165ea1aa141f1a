pub mod accumulator;
pub mod assemble;
pub mod batch;
pub mod options;
pub mod tabular;
pub mod walker;

use rayon::prelude::*;

use crate::annotate::Annotator;
use crate::dom::{self, Element};
use crate::error::ParseError;
use crate::models::{Document, ParsedDocument};

use assemble::PhraseAssembler;
use batch::annotate_batches;
use options::{ParserOptions, SourceFormat};
use walker::{TextNormalizer, TreeWalker, WalkOutput};

/// Decomposes documents into tables, cells and phrases.
///
/// Holds only read-only configuration, so one parser can serve many worker
/// threads at once.
#[derive(Debug)]
pub struct DocumentParser {
    options: ParserOptions,
    normalizer: TextNormalizer,
}

impl DocumentParser {
    pub fn new(options: ParserOptions) -> Result<Self, ParseError> {
        let normalizer = TextNormalizer::new(options.strip, &options.replacements)?;
        Ok(Self {
            options,
            normalizer,
        })
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Runs the tree walk only: markup to blocks, tables and cells.
    pub fn walk(&self, document: &Document) -> Result<WalkOutput, ParseError> {
        let root = self.markup(document)?;
        let walker = TreeWalker::new(&self.options, &self.normalizer, &document.name);
        Ok(walker.walk(root))
    }

    pub fn parse(
        &self,
        document: Document,
        annotator: &dyn Annotator,
    ) -> Result<ParsedDocument, ParseError> {
        let WalkOutput {
            buffer,
            blocks,
            tables,
            cells,
        } = self.walk(&document)?;
        log::debug!(
            "{}: {} blocks, {} tables, {} cells",
            document.name,
            blocks.len(),
            tables.len(),
            cells.len()
        );

        let (reconciled, warnings) = annotate_batches(
            &document.name,
            &buffer,
            &blocks,
            annotator,
            self.options.effective_batch_size(),
        )?;

        let mut assembler = PhraseAssembler::new(&document.name, &tables, &cells);
        let phrases = reconciled
            .into_iter()
            .map(|r| assembler.assemble(r.unit, &blocks[r.block]))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "parsed {}: {} phrases, {} tables, {} cells",
            document.name,
            phrases.len(),
            tables.len(),
            cells.len()
        );
        Ok(ParsedDocument {
            document,
            tables,
            cells,
            phrases,
            warnings,
        })
    }

    /// Parses documents in parallel. Results come back in input order and one
    /// document's failure does not affect the others.
    pub fn parse_many(
        &self,
        documents: Vec<Document>,
        annotator: &dyn Annotator,
    ) -> Vec<Result<ParsedDocument, ParseError>> {
        documents
            .into_par_iter()
            .map(|doc| self.parse(doc, annotator))
            .collect()
    }

    fn markup(&self, document: &Document) -> Result<Element, ParseError> {
        match self.options.format {
            SourceFormat::Html => Ok(dom::parse_html(&document.text)),
            SourceFormat::Xml => dom::parse_xml(&document.text).map_err(|e| ParseError::Markup {
                document: document.name.clone(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
