//! Minimal element tree for HTML documents
//!
//! The grid reconstruction only needs to look up elements by tag, read
//! attributes and collect text, which is what [`Element`] exposes. [`Node`]
//! is an owned implementation built by [`parse_document`], a forgiving
//! tree builder on top of `quick-xml` that copes with the usual HTML
//! shortcuts around tables (void elements, omitted `</td>` and `</tr>`).

use std::borrow::Cow;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::HtmlResult;

/// Read-only view of an element in a document tree
pub trait Element: Sized {
    /// Tag name of the element
    fn tag_name(&self) -> &str;

    /// Attribute value by name
    fn attr(&self, name: &str) -> Option<&str>;

    /// Whitespace-normalized text content of the element and its descendants
    fn text(&self) -> String;

    /// Child elements in document order
    fn children(&self) -> &[Self];

    /// Whether the element has the given tag (ASCII case-insensitive)
    fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// All descendants with the given tag, in document order
    fn descendants_by_tag(&self, tag: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        collect_descendants(self, tag, &mut found);
        found
    }

    /// Direct children whose tag is one of `tags`
    fn children_by_tag(&self, tags: &[&str]) -> Vec<&Self> {
        self.children()
            .iter()
            .filter(|c| tags.iter().any(|t| c.is(t)))
            .collect()
    }
}

fn collect_descendants<'a, E: Element>(parent: &'a E, tag: &str, out: &mut Vec<&'a E>) {
    for child in parent.children() {
        if child.is(tag) {
            out.push(child);
        }
        collect_descendants(child, tag, out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Child(usize),
}

/// An owned element with attributes, children and interleaved text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    content: Vec<Content>,
}

impl Node {
    /// Create an element with no attributes or content
    pub fn new<S: AsRef<str>>(tag: S) -> Self {
        Self {
            tag: tag.as_ref().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attr<K: AsRef<str>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes
            .push((name.as_ref().to_ascii_lowercase(), value.into()));
        self
    }

    /// Append a text run
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.push_text(text.into());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }

    fn from_start(e: &BytesStart<'_>) -> Self {
        let mut node = Node::new(String::from_utf8_lossy(e.local_name().as_ref()));
        for attr in e.html_attributes().flatten() {
            let value = decode_entities(&String::from_utf8_lossy(&attr.value)).into_owned();
            node = node.with_attr(String::from_utf8_lossy(attr.key.local_name().as_ref()), value);
        }
        node
    }

    fn push_child(&mut self, child: Node) {
        self.content.push(Content::Child(self.children.len()));
        self.children.push(child);
    }

    fn push_text(&mut self, text: String) {
        self.content.push(Content::Text(text));
    }

    fn collect_text(&self, out: &mut String) {
        if self.tag == "br" {
            out.push(' ');
            return;
        }
        let block = is_block(&self.tag);
        if block {
            out.push(' ');
        }
        for item in &self.content {
            match item {
                Content::Text(t) => out.push_str(t),
                Content::Child(i) => self.children[*i].collect_text(out),
            }
        }
        if block {
            out.push(' ');
        }
    }
}

impl Element for Node {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        // Only ASCII whitespace collapses; a non-breaking space is content
        raw.split(|c: char| c.is_ascii_whitespace())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "li"
            | "tr"
            | "td"
            | "th"
            | "caption"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "table"
    )
}

/// Named character references beyond the five XML ones that show up in tables
fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{ad}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "middot" => "\u{b7}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "percnt" => "%",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        _ => return None,
    })
}

/// Longest reference name looked for between `&` and `;`
const MAX_REFERENCE_LEN: usize = 32;

/// Resolve character references one by one
///
/// Known named references, the five XML ones and numeric references are
/// replaced. Anything else, a bare `&` included, stays as written.
fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos + 1..];
        let resolved = candidate
            .find(';')
            .filter(|&end| end <= MAX_REFERENCE_LEN)
            .and_then(|end| resolve_reference(&candidate[..end]).map(|text| (text, end)));
        match resolved {
            Some((text, end)) => {
                out.push_str(&text);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()?
            }
            None if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
                number.parse().ok()?
            }
            _ => return None,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }

    let text = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => html_entity(name)?,
    };
    Some(Cow::Borrowed(text))
}

/// Escape every `<` that cannot open a tag, as an HTML tokenizer reads it
/// as text. Comments and CDATA sections are copied unchanged.
fn escape_stray_angles(markup: &str) -> Cow<'_, str> {
    let bytes = markup.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut escaped = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let rest = &markup[i..];
        let section_end = if rest.starts_with("<!--") {
            rest.find("-->").map(|end| end + 3)
        } else if rest.starts_with("<![CDATA[") {
            rest.find("]]>").map(|end| end + 3)
        } else {
            None
        };
        if let Some(len) = section_end {
            i += len;
            continue;
        }

        let opens_markup = matches!(
            bytes.get(i + 1),
            Some(&b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?')
        );
        if !opens_markup {
            let buf = out.get_or_insert_with(|| String::with_capacity(markup.len() + 8));
            buf.push_str(&markup[copied..i]);
            buf.push_str("&lt;");
            copied = i + 1;
            escaped += 1;
        }
        i += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&markup[copied..]);
            debug!("Escaped {} '<' characters that do not open a tag", escaped);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(markup),
    }
}

/// Open elements, innermost last; index 0 is the document root
struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::new("#document")],
        }
    }

    fn open(&mut self, node: Node) {
        self.close_implied_by(&node.tag);
        self.stack.push(node);
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_child(node);
        }
    }

    fn text(&mut self, text: String) {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_text(text);
        }
    }

    fn close(&mut self, tag: &str) {
        match self.stack.iter().rposition(|n| n.tag == tag) {
            Some(idx) if idx > 0 => self.close_to(idx),
            _ => warn!("Ignoring unmatched end tag </{}>", tag),
        }
    }

    /// Closes a cell, row or section that HTML lets authors leave open
    fn close_implied_by(&mut self, tag: &str) {
        let (closes, boundary): (&[&str], &[&str]) = match tag {
            "td" | "th" => (&["td", "th"], &["tr", "table"]),
            "tr" => (&["tr"], &["thead", "tbody", "tfoot", "table"]),
            "thead" | "tbody" | "tfoot" => (&["thead", "tbody", "tfoot"], &["table"]),
            _ => return,
        };

        for idx in (1..self.stack.len()).rev() {
            let open = self.stack[idx].tag.as_str();
            if closes.contains(&open) {
                self.close_to(idx);
                return;
            }
            if boundary.contains(&open) {
                return;
            }
        }
    }

    /// Pops every element at `idx` and above into its parent
    fn close_to(&mut self, idx: usize) {
        while self.stack.len() > idx.max(1) {
            if let Some(node) = self.stack.pop() {
                self.append(node);
            }
        }
    }

    fn finish(mut self) -> Node {
        self.close_to(1);
        self.stack.pop().unwrap_or_else(|| Node::new("#document"))
    }
}

/// Build an element tree from HTML or XHTML markup
///
/// The returned node is a synthetic `#document` root.
pub fn parse_document(markup: &str) -> HtmlResult<Node> {
    let markup = escape_stray_angles(markup);
    let mut reader = Reader::from_str(&markup);
    reader.check_end_names(false);

    let mut builder = TreeBuilder::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let node = Node::from_start(&e);
                if is_void(&node.tag) {
                    builder.append(node);
                } else {
                    builder.open(node);
                }
            }
            Event::Empty(e) => {
                let node = Node::from_start(&e);
                builder.close_implied_by(&node.tag);
                builder.append(node);
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                if !is_void(&tag) {
                    builder.close(&tag);
                }
            }
            Event::Text(e) => {
                let text = decode_entities(&String::from_utf8_lossy(&e)).into_owned();
                builder.text(text);
            }
            Event::CData(e) => builder.text(String::from_utf8_lossy(&e).into_owned()),
            Event::Eof => break,
            // Comments, doctype, declarations and processing instructions
            _ => {}
        }
    }

    Ok(builder.finish())
}
