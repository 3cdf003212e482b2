//! HTML serialization of content trees.

use crate::node::{ContentTree, Element, Node};

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// Serialize a content tree to HTML.
#[must_use]
pub fn to_html(tree: &ContentTree) -> String {
    let mut out = String::with_capacity(4096);
    write_html(&tree.children, &mut out);
    out
}

/// Serialize nodes to HTML, appending to `out`.
pub fn write_html(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(element) => write_element(element, out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(html) => out.push_str(html),
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        // Boolean attributes (e.g. `disabled`) carry an empty value
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    write_html(&element.children, out);
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_code_block_markup() {
        let tree = ContentTree::from_nodes(vec![
            Element::new("pre")
                .with_child(
                    Element::new("code")
                        .with_attr("class", "language-lua")
                        .with_text("Axis:AddProvider(MyProvider)\n"),
                )
                .into(),
        ]);
        assert_eq!(
            to_html(&tree),
            "<pre><code class=\"language-lua\">Axis:AddProvider(MyProvider)\n</code></pre>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let tree = ContentTree::from_nodes(vec![Element::new("p").with_text("1 < 2 & 3").into()]);
        assert_eq!(to_html(&tree), "<p>1 &lt; 2 &amp; 3</p>");
    }

    #[test]
    fn test_raw_passthrough() {
        let tree = ContentTree::from_nodes(vec![Node::Raw("<div class=\"x\"></div>".to_owned())]);
        assert_eq!(to_html(&tree), "<div class=\"x\"></div>");
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let tree = ContentTree::from_nodes(vec![
            Element::new("input")
                .with_attr("type", "checkbox")
                .with_attr("disabled", "")
                .into(),
            Element::new("hr").into(),
        ]);
        assert_eq!(
            to_html(&tree),
            r#"<input type="checkbox" disabled><hr>"#
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let tree = ContentTree::from_nodes(vec![
            Element::new("img")
                .with_attr("src", "a.png")
                .with_attr("alt", "say \"hi\"")
                .into(),
        ]);
        assert_eq!(
            to_html(&tree),
            r#"<img src="a.png" alt="say &quot;hi&quot;">"#
        );
    }
}
