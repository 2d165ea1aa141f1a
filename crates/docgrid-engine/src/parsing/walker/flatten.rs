use crate::dom::{Element, append};

/// Merges every direct child of `node` accepted by `is_flattened` into the
/// surrounding text and removes it from the tree.
///
/// The child's non-blank text fragments (its own text, its descendants' text
/// and tails, and finally its own tail, in document order) are joined with
/// `delim`, each fragment prefixed by it, and appended to the previous
/// sibling's tail, or to `node.text` for the first child. Children are
/// processed right to left so adjacent flattened siblings chain correctly.
pub fn flatten_children(node: &mut Element, delim: &str, is_flattened: impl Fn(&str) -> bool) {
    for j in (0..node.children.len()).rev() {
        if !is_flattened(&node.children[j].tag) {
            continue;
        }
        let child = node.children.remove(j);
        let mut fragments = vec![String::new()];
        collect_fragments(&child, &mut fragments);
        if let Some(tail) = non_blank(&child.tail) {
            fragments.push(tail.to_string());
        }
        let joined = fragments.join(delim);

        let slot = match j {
            0 => &mut node.text,
            _ => &mut node.children[j - 1].tail,
        };
        append(slot, &joined);
    }
}

fn collect_fragments(el: &Element, out: &mut Vec<String>) {
    if let Some(text) = non_blank(&el.text) {
        out.push(text.to_string());
    }
    for child in &el.children {
        collect_fragments(child, out);
        if let Some(tail) = non_blank(&child.tail) {
            out.push(tail.to_string());
        }
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}
