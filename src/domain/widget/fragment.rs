//! Lenient HTML fragment parsing
//!
//! Good enough for the short message snippets display plugins produce:
//! elements, attributes, text, comments and declarations such as
//! `<!DOCTYPE html>`, which are kept verbatim. Unclosed elements are closed at
//! end of input and stray closing tags are dropped.

use std::fmt;

/// Elements that never have children
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// A node in a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// Markup between `<` and `>` of a `<!...>` or `<?...>` declaration
    Declaration(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Self::Element(e) => e.text_content(),
            Self::Text(t) => t.clone(),
            Self::Comment(_) | Self::Declaration(_) => String::new(),
        }
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::Element(e) => e.render_into(out),
            Self::Text(t) => out.push_str(&html_escape::encode_text(t)),
            Self::Comment(c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
            Self::Declaration(d) => {
                out.push('<');
                out.push_str(d);
                out.push('>');
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out);
        f.write_str(&out)
    }
}

/// An element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into().to_lowercase(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Depth-first search for the element with the given id
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        find_in_mut(&mut self.children, id)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        if RAW_TEXT_ELEMENTS.contains(&self.tag.as_str()) {
            for child in &self.children {
                if let Node::Text(t) = child {
                    out.push_str(t);
                }
            }
        } else {
            for child in &self.children {
                child.render_into(out);
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Search a node list for the element with the given id
pub fn find_in_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Element> {
    nodes.iter_mut().find_map(|node| match node {
        Node::Element(e) => e.find_by_id_mut(id),
        _ => None,
    })
}

/// Render a node list back to HTML
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.render_into(&mut out);
    }
    out
}

/// Parse an HTML fragment into a list of top-level nodes
pub fn parse_fragment(html: &str) -> Vec<Node> {
    FragmentParser::new(html).parse()
}

struct FragmentParser<'a> {
    input: &'a str,
    pos: usize,
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl<'a> FragmentParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        let input = self.input;
        &input[self.pos..]
    }

    fn parse(mut self) -> Vec<Node> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.parse_comment();
            } else if rest.starts_with("</") {
                self.parse_end_tag();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.parse_declaration();
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.parse_start_tag();
            } else {
                self.parse_text();
            }
        }
        while let Some(element) = self.open.pop() {
            self.attach(Node::Element(element));
        }
        self.roots
    }

    fn attach(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn skip_past(&mut self, ch: char) {
        match self.rest().find(ch) {
            Some(idx) => self.pos += idx + ch.len_utf8(),
            None => self.pos = self.input.len(),
        }
    }

    fn parse_declaration(&mut self) {
        let input = self.input;
        let body_start = self.pos + 1;
        let body = &input[body_start..];
        let (declaration, consumed) = match body.find('>') {
            Some(end) => (&body[..end], end + 1),
            None => (body, body.len()),
        };
        self.pos = body_start + consumed;
        self.attach(Node::Declaration(declaration.to_string()));
    }

    fn parse_comment(&mut self) {
        let input = self.input;
        let body_start = self.pos + 4;
        let body = &input[body_start..];
        let (comment, consumed) = match body.find("-->") {
            Some(end) => (&body[..end], end + 3),
            None => (body, body.len()),
        };
        self.pos = body_start + consumed;
        self.attach(Node::Comment(comment.to_string()));
    }

    fn parse_text(&mut self) {
        let rest = self.rest();
        // A lone '<' that does not open a tag is literal text.
        let skip = usize::from(rest.starts_with('<'));
        let end = rest[skip..]
            .find('<')
            .map(|idx| idx + skip)
            .unwrap_or(rest.len());
        let text = html_escape::decode_html_entities(&rest[..end]).into_owned();
        self.pos += end;
        self.push_text(text);
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        if let Some(Node::Text(previous)) = siblings.last_mut() {
            previous.push_str(&text);
        } else {
            siblings.push(Node::Text(text));
        }
    }

    fn parse_end_tag(&mut self) {
        let rest = self.rest();
        let close = rest.find('>').unwrap_or(rest.len());
        let name = rest[2..close].trim().to_lowercase();
        self.pos += (close + 1).min(rest.len());

        if !self.open.iter().any(|e| e.tag == name) {
            return;
        }
        while let Some(element) = self.open.pop() {
            let done = element.tag == name;
            self.attach(Node::Element(element));
            if done {
                break;
            }
        }
    }

    fn parse_start_tag(&mut self) {
        self.pos += 1;
        let name = self.take_while(|c| !c.is_whitespace() && c != '>' && c != '/');
        let mut element = Element::new(name);
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                self_closing = true;
                break;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let attr_name =
                self.take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/');
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.take_attribute_value()
            } else {
                String::new()
            };
            if !attr_name.is_empty() {
                element = element.with_attribute(attr_name, value);
            }
        }

        if self_closing || element.is_void() {
            self.attach(Node::Element(element));
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()) {
            let end_tag = format!("</{}", element.tag);
            let rest = self.rest();
            let end = rest.to_ascii_lowercase().find(&end_tag).unwrap_or(rest.len());
            if end > 0 {
                element.children.push(Node::Text(rest[..end].to_string()));
            }
            self.pos += end;
            self.skip_past('>');
            self.attach(Node::Element(element));
            return;
        }

        self.open.push(element);
    }

    fn take_attribute_value(&mut self) -> String {
        let rest = self.rest();
        let raw = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                let end = body.find(quote).unwrap_or(body.len());
                self.pos += 1 + end + usize::from(end < body.len());
                &body[..end]
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                self.pos += end;
                &rest[..end]
            }
        };
        html_escape::decode_html_entities(raw).into_owned()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}
