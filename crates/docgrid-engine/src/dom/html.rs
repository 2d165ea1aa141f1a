use scraper::{ElementRef, Html};

use super::Element;

/// Parses an HTML document into an [`Element`] tree rooted at `<html>`.
///
/// html5ever recovers from malformed markup (implied `<tbody>`, unclosed
/// cells and so on); the walker only ever sees the recovered tree.
pub fn parse_html(source: &str) -> Element {
    let html = Html::parse_document(source);
    convert(html.root_element())
}

fn convert(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut out = Element::new(value.name());
    out.attrs = value
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            out.children.push(convert(child_el));
        } else if let Some(text) = child.value().as_text() {
            out.push_character_data(text);
        }
    }
    out
}
