use crate::document::Document;
use crate::types::{NodeKey, NodeKind, PropValue, format_number};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize the subtree at `root` as HTML.
///
/// Properties are written as attributes in insertion order: `Null` and `false`
/// are omitted and `true` renders as a bare attribute. A fragment serializes as
/// the concatenation of its children.
pub fn outer_html(doc: &Document, root: NodeKey) -> String {
    let mut out = String::new();
    write_node(doc, root, &mut out);
    out
}

/// Serialize only the children of `root`.
pub fn inner_html(doc: &Document, root: NodeKey) -> String {
    let mut out = String::new();
    for &child in doc.children(root) {
        write_node(doc, child, &mut out);
    }
    out
}

fn write_node(doc: &Document, key: NodeKey, out: &mut String) {
    match doc.kind(key) {
        Some(NodeKind::Element { name }) => {
            out.push('<');
            out.push_str(name);
            for (prop, value) in doc.properties(key) {
                match value {
                    PropValue::Null | PropValue::Bool(false) => {}
                    PropValue::Bool(true) => {
                        out.push(' ');
                        out.push_str(prop);
                    }
                    PropValue::Number(value) => {
                        out.push(' ');
                        out.push_str(prop);
                        out.push_str("=\"");
                        out.push_str(&format_number(*value));
                        out.push('"');
                    }
                    PropValue::Text(text) => {
                        out.push(' ');
                        out.push_str(prop);
                        out.push_str("=\"");
                        push_escaped(out, text, true);
                        out.push('"');
                    }
                }
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&&**name) && doc.children(key).is_empty() {
                return;
            }
            for &child in doc.children(key) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Some(NodeKind::Text { text }) => push_escaped(out, text, false),
        Some(NodeKind::Fragment) => {
            for &child in doc.children(key) {
                write_node(doc, child, out);
            }
        }
        None => {}
    }
}

fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_props_and_escapes() {
        let mut doc = Document::new();
        let a = doc.create_element("a").unwrap();
        doc.set_property(a, "href", "/q?a=1&b=\"2\"".into()).unwrap();
        doc.set_property(a, "hidden", true.into()).unwrap();
        doc.set_property(a, "draggable", false.into()).unwrap();
        doc.set_property(a, "tabIndex", 2i32.into()).unwrap();
        doc.set_property(a, "title", PropValue::Null).unwrap();
        let text = doc.create_text("1 < 2");
        doc.append_child(a, text).unwrap();

        assert_eq!(
            outer_html(&doc, a),
            r#"<a href="/q?a=1&amp;b=&quot;2&quot;" hidden tabIndex="2">1 &lt; 2</a>"#
        );
        assert_eq!(inner_html(&doc, a), "1 &lt; 2");
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        let mut doc = Document::new();
        let p = doc.create_element("p").unwrap();
        let br = doc.create_element("br").unwrap();
        doc.append_child(p, br).unwrap();
        assert_eq!(outer_html(&doc, p), "<p><br></p>");
    }

    #[test]
    fn fragment_serializes_children_only() {
        let mut doc = Document::new();
        let frag = doc.create_fragment();
        let a = doc.create_text("a");
        let b = doc.create_element("b").unwrap();
        doc.append_child(frag, a).unwrap();
        doc.append_child(frag, b).unwrap();
        assert_eq!(outer_html(&doc, frag), "a<b></b>");
    }
}
