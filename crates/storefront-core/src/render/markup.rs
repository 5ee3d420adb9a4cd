// ── Markup tree ──
//
// A small element tree that renderers build and the page serializes,
// either as JSON or as an HTML fragment. Text and attribute values are
// escaped on output; `Raw` is emitted verbatim.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

/// Tags that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Markup {
    Element(Element),
    Text { text: String },
    Raw { html: String },
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn raw(html: impl Into<String>) -> Self {
        Self::Raw { html: html.into() }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(el) => el.write_html(out),
            Self::Text { text } => out.push_str(&escape_html(text)),
            Self::Raw { html } => out.push_str(html),
        }
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the attribute only when `value` is present and non-blank.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::into) {
            Some(v) if !v.trim().is_empty() => self.attr(name, v),
            _ => self,
        }
    }

    /// A valueless boolean attribute such as `autoplay`, set when `on`.
    pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    /// Append to the `class` attribute.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref().trim();
        if class.is_empty() {
            return self;
        }
        self.attrs
            .entry("class".to_owned())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(class);
            })
            .or_insert_with(|| class.to_owned());
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn child_opt(self, child: Option<impl Into<Markup>>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    pub fn children<M: Into<Markup>>(mut self, children: impl IntoIterator<Item = M>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::text(text))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape_html(value));
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
