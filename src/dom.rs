//! Owned HTML document tree.
//!
//! Parsing is delegated to html5ever (through `scraper`), which repairs the
//! input the way a browser would, so a parsed document always has `html`,
//! `head` and `body`. The result is copied into a plain owned tree: the
//! [`Document`] owns every [`Node`], elements own their children, and
//! mutation is ordinary `&mut` access with no shared handles.
//!
//! Serialization is pretty-printed: one node per line, indented one space per
//! level. Content whose whitespace matters is written verbatim:
//!
//! - raw-text elements (`script`, `style`, `noscript`, ...) keep their text unescaped
//! - preformatted elements (`pre`, `textarea`) are written without reflowing

use scraper::{ElementRef, Html, Node as ParsedNode};

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text content is not HTML-escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Elements whose whitespace is significant.
const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea"];

const INDENT: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Doctype(Doctype),
    Comment(String),
    Text(String),
    Element(Element),
}

impl Node {
    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment(text.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

/// `<!DOCTYPE name PUBLIC "public_id" "system_id">`. The identifiers decide
/// quirks mode, so they are written back exactly as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl Doctype {
    pub fn html5() -> Self {
        Self {
            name: "html".to_string(),
            ..Self::default()
        }
    }

    fn to_html(&self) -> String {
        let mut out = format!("<!DOCTYPE {}", self.name);
        if !self.public_id.is_empty() {
            out.push_str(&format!(" PUBLIC \"{}\"", self.public_id));
            if !self.system_id.is_empty() {
                out.push_str(&format!(" \"{}\"", self.system_id));
            }
        } else if !self.system_id.is_empty() {
            out.push_str(&format!(" SYSTEM \"{}\"", self.system_id));
        }
        out.push('>');
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// In source order.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add `node` as the last child.
    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let nodes = html
            .tree
            .root()
            .children()
            .filter_map(|child| convert_node(child.value(), ElementRef::wrap(child)))
            .collect();
        Self { nodes }
    }

    /// First element named `name`, depth-first in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        find_in(&self.nodes, name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        find_in_mut(&mut self.nodes, name)
    }

    /// Text of the first `<title>`, trimmed.
    pub fn title(&self) -> Option<String> {
        self.find("title")
            .map(|title| title.text_content().trim().to_string())
    }

    pub fn to_pretty_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_pretty(&mut out, node, 0);
        }
        out
    }
}

fn convert_node(value: &ParsedNode, element: Option<ElementRef<'_>>) -> Option<Node> {
    match value {
        ParsedNode::Doctype(doctype) => Some(Node::Doctype(Doctype {
            name: doctype.name().to_string(),
            public_id: doctype.public_id().to_string(),
            system_id: doctype.system_id().to_string(),
        })),
        ParsedNode::Comment(comment) => Some(Node::Comment(comment.comment.to_string())),
        ParsedNode::Text(text) => Some(Node::Text(text.text.to_string())),
        ParsedNode::Element(_) => element.map(|el| Node::Element(convert_element(el))),
        _ => None,
    }
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    Element {
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: el
            .children()
            .filter_map(|child| convert_node(child.value(), ElementRef::wrap(child)))
            .collect(),
    }
}

fn find_in<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == name {
                return Some(el);
            }
            if let Some(found) = find_in(&el.children, name) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [Node], name: &str) -> Option<&'a mut Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == name {
                return Some(el);
            }
            if let Some(found) = find_in_mut(&mut el.children, name) {
                return Some(found);
            }
        }
    }
    None
}

// ============================================================================
// Serialization
// ============================================================================

fn write_pretty(out: &mut String, node: &Node, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        Node::Doctype(doctype) => {
            out.push_str(&pad);
            out.push_str(&doctype.to_html());
            out.push('\n');
        }
        Node::Comment(text) => {
            out.push_str(&format!("{pad}<!--{text}-->\n"));
        }
        Node::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                out.push_str(&pad);
                out.push_str(&escape_text(text));
                out.push('\n');
            }
        }
        Node::Element(el) => write_element_pretty(out, el, depth, &pad),
    }
}

fn write_element_pretty(out: &mut String, el: &Element, depth: usize, pad: &str) {
    out.push_str(pad);
    write_open_tag(out, el);

    let name = el.name.as_str();
    if VOID_ELEMENTS.contains(&name) {
        out.push('\n');
        return;
    }

    if RAW_TEXT_ELEMENTS.contains(&name) {
        let raw = el.text_content();
        let raw = raw.trim_start_matches(['\n', '\r']).trim_end();
        if !raw.trim().is_empty() {
            out.push('\n');
            out.push_str(raw);
            out.push('\n');
            out.push_str(pad);
        }
        out.push_str(&format!("</{name}>\n"));
        return;
    }

    if PREFORMATTED_ELEMENTS.contains(&name) {
        for child in &el.children {
            write_compact(out, child, false);
        }
        out.push_str(&format!("</{name}>\n"));
        return;
    }

    let has_content = el.children.iter().any(|child| match child {
        Node::Text(t) => !t.trim().is_empty(),
        _ => true,
    });
    if !has_content {
        out.push_str(&format!("</{name}>\n"));
        return;
    }

    // A lone text child stays on the tag's line: <title>My Game</title>
    if let [Node::Text(text)] = el.children.as_slice() {
        out.push_str(&escape_text(text.trim()));
        out.push_str(&format!("</{name}>\n"));
        return;
    }

    out.push('\n');
    for child in &el.children {
        write_pretty(out, child, depth + 1);
    }
    out.push_str(&format!("{pad}</{name}>\n"));
}

/// Exact serialization, used where whitespace must survive.
fn write_compact(out: &mut String, node: &Node, raw_parent: bool) {
    match node {
        Node::Doctype(doctype) => out.push_str(&doctype.to_html()),
        Node::Comment(text) => out.push_str(&format!("<!--{text}-->")),
        Node::Text(text) if raw_parent => out.push_str(text),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => {
            write_open_tag(out, el);
            let name = el.name.as_str();
            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&name);
            for child in &el.children {
                write_compact(out, child, raw);
            }
            out.push_str(&format!("</{name}>"));
        }
    }
}

fn write_open_tag(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attrs {
        out.push_str(&format!(" {key}=\"{}\"", escape_attr(value)));
    }
    out.push('>');
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
