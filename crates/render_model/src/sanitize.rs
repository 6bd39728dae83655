//! Rich-text sanitizer
//!
//! Paragraph markup is parsed with `html5ever`, walked, and re-serialized
//! from an allowlist. Structural tags (emphasis, lists, links, paragraphs)
//! survive; executable content is removed together with its children;
//! anything else is unwrapped so its text is kept. The only attributes that
//! survive are `href` (safe schemes only) and `title` on links.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements written back out with their tag
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "hr", "b", "strong", "i", "em", "u", "s", "sub", "sup", "ul", "ol", "li", "a",
    "span", "div", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Elements removed together with everything inside them
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "link", "meta",
    "base", "head", "title", "noscript", "template", "svg", "math",
];

const VOID_TAGS: &[&str] = &["br", "hr"];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Sanitize a fragment of rich text. Never fails; unparseable input simply
/// yields whatever text html5ever recovers.
pub fn sanitize_html(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let dom = parse_document(RcDom::default(), Default::default()).one(input);

    let mut sanitizer = Sanitizer::default();
    sanitizer.walk(&dom.document);

    if sanitizer.removed > 0 {
        tracing::warn!(removed = sanitizer.removed, "stripped unsafe markup from rich text");
    }
    sanitizer.out
}

#[derive(Default)]
struct Sanitizer {
    out: String,
    removed: usize,
}

impl Sanitizer {
    fn walk(&mut self, handle: &Handle) {
        match &handle.data {
            NodeData::Document => self.walk_children(handle),
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref();

                if DROPPED_TAGS.contains(&tag) {
                    // The parser always creates a head; only count it if something landed in it
                    if tag != "head" || !handle.children.borrow().is_empty() {
                        self.removed += 1;
                    }
                    return;
                }

                if !ALLOWED_TAGS.contains(&tag) {
                    self.walk_children(handle);
                    return;
                }

                self.out.push('<');
                self.out.push_str(tag);
                for attr in attrs.borrow().iter() {
                    let key = attr.name.local.as_ref();
                    let value: &str = &attr.value;
                    let keep = match (tag, key) {
                        ("a", "href") => is_safe_url(value),
                        ("a", "title") => true,
                        _ => false,
                    };
                    if keep {
                        self.out.push(' ');
                        self.out.push_str(key);
                        self.out.push_str("=\"");
                        self.out.push_str(&escape_attr(value));
                        self.out.push('"');
                    } else {
                        self.removed += 1;
                    }
                }
                self.out.push('>');

                if VOID_TAGS.contains(&tag) {
                    return;
                }
                self.walk_children(handle);
                self.out.push_str("</");
                self.out.push_str(tag);
                self.out.push('>');
            }
            NodeData::Text { contents } => {
                self.out.push_str(&escape_text(&contents.borrow()));
            }
            _ => {}
        }
    }

    fn walk_children(&mut self, handle: &Handle) {
        for child in handle.children.borrow().iter() {
            self.walk(child);
        }
    }
}

/// Scheme of a URL, if it has one before any path, query or fragment.
/// Whitespace and control characters are ignored the way browsers do.
fn url_scheme(url: &str) -> Option<String> {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let end = cleaned.find([':', '/', '?', '#'])?;
    cleaned[end..].starts_with(':').then(|| cleaned[..end].to_string())
}

/// Whether a link target is safe to emit. Relative references are allowed.
pub fn is_safe_url(url: &str) -> bool {
    match url_scheme(url) {
        Some(scheme) => SAFE_SCHEMES.contains(&scheme.as_str()),
        None => true,
    }
}

/// Whether an image source is safe to emit: a safe URL or an inline image
pub fn is_safe_image_src(src: &str) -> bool {
    match url_scheme(src) {
        Some(scheme) if scheme == "data" => src.trim_start().to_ascii_lowercase().starts_with("data:image/"),
        Some(scheme) => scheme == "http" || scheme == "https",
        None => true,
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
