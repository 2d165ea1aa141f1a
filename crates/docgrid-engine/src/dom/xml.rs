use super::Element;

/// Parses an XML document into an [`Element`] tree. Tags use local names.
pub fn parse_xml(source: &str) -> Result<Element, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(source, options)?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut out = Element::new(node.tag_name().name());
    out.attrs = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    for child in node.children() {
        if child.is_element() {
            out.children.push(convert(child));
        } else if child.is_text()
            && let Some(text) = child.text()
        {
            out.push_character_data(text);
        }
    }
    out
}
