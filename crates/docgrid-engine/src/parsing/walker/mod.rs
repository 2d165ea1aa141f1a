//! # Tree walk
//!
//! Depth-first, document-order traversal of an [`Element`] tree that turns
//! every kept `text`/`tail` string into a [`Block`]. For each element:
//!
//! 1. Blacklisted elements are skipped with their whole subtree, tail
//!    included.
//! 2. The [`TableGridTracker`] is told the element was entered.
//! 3. Flattenable children are merged into the surrounding text.
//! 4. The element's own `text` becomes a block owned by the element.
//! 5. Children are visited; after each one, its `tail` becomes a block owned
//!    by this element, with the tabular parent as it stands after the child
//!    was left.
//! 6. The tracker is told the element was left.

pub mod flatten;
pub mod normalize;

use crate::dom::{Element, xpath};
use crate::models::{Cell, ParentRef, StructuralAttrs, Table};

use super::accumulator::{Block, TextBlockAccumulator};
use super::options::{DELIMITER, ParserOptions};
use super::tabular::TableGridTracker;

pub use flatten::flatten_children;
pub use normalize::TextNormalizer;

/// Everything the walk extracted from one document.
#[derive(Debug, Default)]
pub struct WalkOutput {
    pub buffer: String,
    pub blocks: Vec<Block>,
    pub tables: Vec<Table>,
    pub cells: Vec<Cell>,
}

pub struct TreeWalker<'a> {
    options: &'a ParserOptions,
    normalizer: &'a TextNormalizer,
    grid: Option<TableGridTracker>,
    acc: TextBlockAccumulator,
}

impl<'a> TreeWalker<'a> {
    pub fn new(options: &'a ParserOptions, normalizer: &'a TextNormalizer, document: &str) -> Self {
        Self {
            options,
            normalizer,
            grid: options.tabular.then(|| TableGridTracker::new(document)),
            acc: TextBlockAccumulator::new(DELIMITER),
        }
    }

    pub fn walk(mut self, mut root: Element) -> WalkOutput {
        let path = xpath::root(&root);
        self.visit(&mut root, &path);

        let (tables, cells) = self.grid.map(TableGridTracker::finish).unwrap_or_default();
        let (buffer, blocks) = self.acc.finish();
        WalkOutput {
            buffer,
            blocks,
            tables,
            cells,
        }
    }

    fn visit(&mut self, node: &mut Element, path: &str) {
        if self.options.is_blacklisted(&node.tag) {
            return;
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.enter(node);
        }
        if !self.options.flatten.is_empty() {
            flatten_children(node, &self.options.flatten_delim, |tag| {
                self.options.is_flattened(tag)
            });
        }

        let context = self.options.structural.then(|| StructuralAttrs {
            xpath: path.to_string(),
            html_tag: node.tag.clone(),
            html_attrs: node.attr_strings(),
        });

        if let Some(text) = node.text.as_deref() {
            self.emit(text, &context);
        }

        let child_paths = xpath::children(path, &node.children);
        for (child, child_path) in node.children.iter_mut().zip(&child_paths) {
            if self.options.is_blacklisted(&child.tag) {
                continue;
            }
            self.visit(child, child_path);
            if let Some(tail) = child.tail.as_deref() {
                self.emit(tail, &context);
            }
        }

        if let Some(grid) = self.grid.as_mut() {
            grid.exit(node);
        }
    }

    fn emit(&mut self, raw: &str, context: &Option<StructuralAttrs>) {
        let Some(text) = self.normalizer.normalize(raw) else {
            return;
        };
        let parent = self
            .grid
            .as_ref()
            .map_or(ParentRef::Document, TableGridTracker::parent);
        self.acc.push(text, parent, context.clone());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::parse_html;
    use crate::models::{CellId, TableId};

    fn walk_with(options: &ParserOptions, html: &str) -> WalkOutput {
        let normalizer = TextNormalizer::new(options.strip, &options.replacements).unwrap();
        TreeWalker::new(options, &normalizer, "doc").walk(parse_html(html))
    }

    fn walk(html: &str) -> WalkOutput {
        walk_with(&ParserOptions::default(), html)
    }

    fn texts(out: &WalkOutput) -> Vec<&str> {
        out.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    #[test]
    fn text_and_tail_in_document_order() {
        let out = walk("<p>one <b>two</b> three</p><p>four</p>");
        assert_eq!(texts(&out), vec!["one", "two", "three", "four"]);
        assert_eq!(out.buffer, "one<NB>two<NB>three<NB>four<NB>");
    }

    #[test]
    fn tail_uses_parent_structure() {
        let out = walk(r#"<div class="c"><b>bold</b> after</div>"#);
        let b = out.blocks[0].structural.as_ref().unwrap();
        let after = out.blocks[1].structural.as_ref().unwrap();
        assert_eq!(b.xpath, "/html/body/div/b");
        assert_eq!(b.html_tag, "b");
        assert_eq!(after.xpath, "/html/body/div");
        assert_eq!(after.html_tag, "div");
        assert_eq!(after.html_attrs, vec!["class=c"]);
    }

    #[test]
    fn blacklisted_subtree_is_skipped_with_its_tail() {
        let out = walk("<div>before<script>var x = 1;</script>after</div><style>p {}</style>kept");
        assert_eq!(texts(&out), vec!["before"]);
    }

    #[test]
    fn tail_of_non_blacklisted_sibling_is_kept() {
        let out = walk("<div><script>x</script>dropped<b>bold</b>after</div>");
        assert_eq!(texts(&out), vec!["bold", "after"]);
    }

    #[test]
    fn flatten_merges_inline_markup() {
        let out = walk("<p>Hello<span>there</span>!</p>");
        assert_eq!(texts(&out), vec!["Hellothere!"]);

        let spaced = ParserOptions {
            flatten_delim: " ".into(),
            ..Default::default()
        };
        let out = walk_with(&spaced, "<p>Hello<span>there</span>!</p>");
        assert_eq!(texts(&out), vec!["Hello there !"]);
    }

    #[test]
    fn repeated_siblings_get_indexed_xpaths() {
        let out = walk("<p>a</p><p>b</p><div>c</div>");
        let paths: Vec<_> = out
            .blocks
            .iter()
            .map(|b| b.structural.as_ref().unwrap().xpath.as_str())
            .collect();
        assert_eq!(
            paths,
            vec!["/html/body/p[1]", "/html/body/p[2]", "/html/body/div"]
        );
    }

    #[test]
    fn blocks_carry_tabular_parent() {
        let out = walk("<p>intro</p><table><tr><td>a</td></tr></table>outro");
        let parents: Vec<_> = out.blocks.iter().map(|b| b.parent).collect();
        assert_eq!(
            parents,
            vec![
                ParentRef::Document,
                ParentRef::Cell(CellId(0)),
                ParentRef::Document
            ]
        );
        assert_eq!(out.tables.len(), 1);
        assert_eq!(out.cells[0].table, TableId(0));
    }

    #[test]
    fn disabled_capabilities_leave_fields_empty() {
        let opts = ParserOptions {
            structural: false,
            tabular: false,
            ..Default::default()
        };
        let out = walk_with(&opts, "<table><tr><td>a</td></tr></table>");
        assert!(out.tables.is_empty() && out.cells.is_empty());
        assert_eq!(out.blocks[0].parent, ParentRef::Document);
        assert!(out.blocks[0].structural.is_none());
    }
}
