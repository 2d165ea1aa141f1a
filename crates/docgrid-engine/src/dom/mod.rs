//! # Element tree
//!
//! A small owned element tree in the text/tail model: an element's `text` is
//! the character data before its first child element, and each child's
//! `tail` is the character data between that child and the next one.
//! Both markup front-ends produce this shape:
//!
//! - **`html`**: [`parse_html`] via `scraper` (html5ever); never fails,
//!   malformed markup is recovered best-effort.
//! - **`xml`**: [`parse_xml`] via `roxmltree`.
//!
//! Comments, doctypes and processing instructions are dropped; the text on
//! either side of them is merged.

pub mod html;
pub mod xml;
pub mod xpath;

pub use html::parse_html;
pub use xml::parse_xml;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes rendered as `key=value`, in source order.
    pub fn attr_strings(&self) -> Vec<String> {
        self.attrs.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Appends character data at the current end of this element's content:
    /// to `text` while there are no children yet, otherwise to the last child's `tail`.
    pub fn push_character_data(&mut self, data: &str) {
        let slot = match self.children.last_mut() {
            Some(last) => &mut last.tail,
            None => &mut self.text,
        };
        append(slot, data);
    }

    /// Pre-order iterator over this element and all its descendants.
    #[cfg(test)]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub(crate) fn append(slot: &mut Option<String>, data: &str) {
    slot.get_or_insert_with(String::new).push_str(data);
}

#[cfg(test)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

#[cfg(test)]
impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
