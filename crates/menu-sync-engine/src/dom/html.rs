use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dom::tree::{DocumentTree, NodeId};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Serialize `node` and everything below it as HTML.
///
/// Attributes are written in name order so identical trees always produce
/// identical bytes.
pub fn to_html(tree: &DocumentTree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

/// Serialize only the children of `node`, the equivalent of `innerHTML`.
pub fn inner_html(tree: &DocumentTree, node: NodeId) -> String {
    let mut out = String::new();
    for child in tree.children(node) {
        write_node(tree, *child, &mut out);
    }
    out
}

fn write_node(tree: &DocumentTree, node: NodeId, out: &mut String) {
    if let Some(text) = tree.text_of(node) {
        out.push_str(&encode_text(text));
        return;
    }
    let Some(tag) = tree.tag(node) else {
        return;
    };

    out.push('<');
    out.push_str(tag);
    for (name, value) in tree.attrs(node) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    for child in tree.children(node) {
        write_node(tree, *child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
