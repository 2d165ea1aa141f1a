use std::collections::HashMap;

use super::Element;

/// Absolute path of the root element, e.g. `/html`.
pub fn root(el: &Element) -> String {
    format!("/{}", el.tag)
}

/// Paths of every element in `siblings` below `parent_path`, in order.
///
/// A 1-based `[k]` position is added only when the parent has more than one
/// child with the same tag.
pub fn children(parent_path: &str, siblings: &[Element]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for s in siblings {
        *totals.entry(s.tag.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(totals.len());
    siblings
        .iter()
        .map(|s| {
            let tag = s.tag.as_str();
            if totals[tag] > 1 {
                let k = seen.entry(tag).or_default();
                *k += 1;
                format!("{parent_path}/{tag}[{k}]")
            } else {
                format!("{parent_path}/{tag}")
            }
        })
        .collect()
}
