//! HTML to clean-text conversion for the regex cascade.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Subtrees that never contain prose worth matching against.
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "iframe"];

/// Extracts the document's visible text with whitespace runs collapsed to
/// single spaces.
pub(crate) fn clean_text(doc: &Html) -> String {
    let mut raw = String::new();
    collect(doc.tree.root(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect(node: NodeRef<'_, Node>, out: &mut String) {
    if let Some(element) = node.value().as_element() {
        if SKIP_TAGS.contains(&element.name()) {
            return;
        }
    }
    if let Some(text) = node.value().as_text() {
        out.push_str(text);
        out.push(' ');
    }
    for child in node.children() {
        collect(child, out);
    }
}
