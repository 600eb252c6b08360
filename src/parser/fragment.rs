//! HTML fragment parsing.
//!
//! Fragments go through html5ever's full document algorithm (via `scraper`),
//! exactly as a browser would load them, so `<head>`-only elements move to
//! the head and misnested markup is repaired the standard way. A fragment has
//! no doctype and is therefore parsed in quirks mode, where a `<table>` may
//! sit inside a `<p>`. Parsing never fails.

use scraper::{ElementRef, Html};

/// A parsed HTML fragment.
pub struct Fragment {
    html: Html,
}

impl Fragment {
    /// Parse an HTML string.
    pub fn parse(input: &str) -> Self {
        let html = Html::parse_document(input);
        if !html.errors.is_empty() {
            log::trace!("html5ever recovered from {} parse errors", html.errors.len());
        }
        Self { html }
    }

    /// The `<body>` element.
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
    }

    /// Top-level elements of the body, in document order.
    ///
    /// Text and comment nodes directly under the body are skipped.
    pub fn top_level(&self) -> Vec<ElementRef<'_>> {
        self.body()
            .map(|body| child_elements(body).collect())
            .unwrap_or_default()
    }
}

/// Lowercase local name of an element.
pub fn tag_name<'a>(el: &ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// Direct element children.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Concatenated text of all descendant text nodes, like DOM `textContent`.
pub fn text_content(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Serialized outer markup of the element.
pub fn outer_html(el: &ElementRef<'_>) -> String {
    el.html()
}
