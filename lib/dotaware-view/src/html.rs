use crate::node::{Element, Node};
use std::fmt::Write;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: [&str; 4] = ["br", "img", "link", "meta"];

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

/// Wrap a rendered tree in a complete HTML document. When `refresh_secs` is
/// set the browser reloads the page on that interval.
pub fn page(body: &Node, refresh_secs: Option<u64>) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    if let Some(secs) = refresh_secs {
        let _ = write!(out, "<meta http-equiv=\"refresh\" content=\"{secs}\">");
    }
    out.push_str("<title>Dotaware</title></head><body>");
    write_node(&mut out, body);
    out.push_str("</body></html>\n");
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => escape_into(out, text),
        Node::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        let node: Node = Element::new("td")
            .attr("title", "\"quoted\"")
            .text(Some("<b>Tom & Jerry</b>"))
            .into();
        assert_eq!(
            node.to_html(),
            "<td title=\"&quot;quoted&quot;\">&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</td>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = Element::new("td")
            .child(Element::new("img").attr("src", "/heroes/1.png"))
            .into();
        assert_eq!(node.to_html(), "<td><img src=\"/heroes/1.png\"></td>");
    }

    #[test]
    fn test_page() {
        let body: Node = Element::new("ul").into();
        let html = page(&body, Some(10));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"10\">"));
        assert!(html.contains("<body><ul></ul></body>"));
        assert!(!page(&body, None).contains("refresh"));
    }
}
