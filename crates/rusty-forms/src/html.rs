// File: src/html.rs
// Purpose: Minimal HTML element builder used by the markup helpers

use indexmap::IndexMap;
use maud::{Escaper, Markup, PreEscaped, Render};
use std::fmt::{self, Write};

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Value of an HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `true` renders a bare boolean attribute, `false` omits it
    Bool(bool),
    Text(String),
    /// Space-separated tokens such as `class`; omitted when empty
    List(Vec<String>),
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Text(n.to_string())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(tokens: Vec<String>) -> Self {
        AttrValue::List(tokens)
    }
}

/// Ordered attribute map
pub type Attrs = IndexMap<String, AttrValue>;

/// Escape text for element content or a double-quoted attribute value
pub fn escape(text: &str) -> String {
    let mut buffer = String::with_capacity(text.len());
    escape_into(&mut buffer, text);
    buffer
}

fn escape_into(buffer: &mut String, text: &str) {
    // Writing into a String cannot fail
    let _ = Escaper::new(buffer).write_str(text);
}

/// Render one attribute as ` name="value"`, or nothing when it is omitted
pub fn render_attribute(buffer: &mut String, name: &str, value: &AttrValue, xhtml: bool) {
    let text = match value {
        AttrValue::Bool(false) => return,
        AttrValue::Bool(true) => {
            buffer.push(' ');
            buffer.push_str(name);
            if xhtml {
                buffer.push_str("=\"");
                buffer.push_str(name);
                buffer.push('"');
            }
            return;
        }
        AttrValue::List(tokens) if tokens.is_empty() => return,
        AttrValue::List(tokens) => tokens.join(" "),
        AttrValue::Text(text) => text.clone(),
    };

    buffer.push(' ');
    buffer.push_str(name);
    buffer.push_str("=\"");
    escape_into(buffer, &text);
    buffer.push('"');
}

/// Render a whole attribute map
pub fn render_attributes<'a, I>(attrs: I, xhtml: bool) -> String
where
    I: IntoIterator<Item = (&'a String, &'a AttrValue)>,
{
    let mut buffer = String::new();
    for (name, value) in attrs {
        render_attribute(&mut buffer, name, value, xhtml);
    }
    buffer
}

/// An HTML element with ordered attributes and pre-rendered content
///
/// An element without a name is a bare fragment: only its content renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: Option<String>,
    attrs: Attrs,
    html: String,
}

impl Element {
    /// Create an element with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a nameless fragment
    pub fn fragment() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_void(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| VOID_ELEMENTS.contains(&n.to_ascii_lowercase().as_str()))
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        self.attrs.shift_remove(name)
    }

    /// Merge attributes, overwriting existing ones of the same name
    pub fn add_attributes<I, K>(&mut self, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: Into<String>,
    {
        for (name, value) in attrs {
            self.attrs.insert(name.into(), value);
        }
        self
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Replace content with trusted HTML
    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = html.into();
        self
    }

    /// Builder-style variant of [`Element::set_html`]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.set_html(html);
        self
    }

    /// Replace content with escaped text
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.html = escape(text);
        self
    }

    /// Builder-style variant of [`Element::set_text`]
    pub fn text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn inner_html(&self) -> &str {
        &self.html
    }

    /// Rendered attribute list, each with a leading space
    pub fn attributes(&self, xhtml: bool) -> String {
        render_attributes(&self.attrs, xhtml)
    }

    pub fn start_tag(&self, xhtml: bool) -> String {
        match &self.name {
            Some(name) => {
                let close = if xhtml && self.is_void() { " />" } else { ">" };
                format!("<{}{}{}", name, self.attributes(xhtml), close)
            }
            None => String::new(),
        }
    }

    pub fn end_tag(&self) -> String {
        match &self.name {
            Some(name) if !self.is_void() => format!("</{}>", name),
            _ => String::new(),
        }
    }

    /// Render the full element
    pub fn to_html_with(&self, xhtml: bool) -> String {
        let mut out = self.start_tag(xhtml);
        if !self.is_void() {
            out.push_str(&self.html);
            out.push_str(&self.end_tag());
        }
        out
    }

    pub fn to_html(&self) -> String {
        self.to_html_with(false)
    }

    pub fn into_markup(self) -> Markup {
        PreEscaped(self.to_html())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl Render for Element {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.to_html());
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Element {
    fn into_response(self) -> axum::response::Response {
        (
            [(
                axum::http::header::CONTENT_TYPE,
                axum::http::HeaderValue::from_static("text/html; charset=utf-8"),
            )],
            self.to_html(),
        )
            .into_response()
    }
}
