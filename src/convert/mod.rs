//! Block dispatch.
//!
//! A [`Converter`] walks the top-level elements of a parsed fragment and
//! routes each one to a media classifier or to the rich-text extractor,
//! producing exactly one [`Block`] per element.
//!
//! # Example
//!
//! ```
//! use htmlblocks::convert::Converter;
//! use htmlblocks::Block;
//!
//! let converter = Converter::new();
//! let blocks = converter.convert(r#"<p>Hello</p><p><img src="a.png"></p>"#);
//! assert_eq!(blocks.len(), 2);
//! assert!(blocks[0].is_text());
//! assert!(matches!(blocks[1], Block::Image(_)));
//! ```

use crate::classify::{classify_iframe, classify_image, classify_table, VideoIdMatcher};
use crate::error::Result;
use crate::keys::KeyGenerator;
use crate::model::Block;
use crate::parser::{child_elements, tag_name, ExtractMode, Fragment, ParseOptions};
use crate::richtext::{self, BlockTypeHook, ExtractOptions};
use scraper::ElementRef;
use std::io::Read;
use std::path::Path;

/// Kinds of element the dispatcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<img>`
    Image,
    /// `<table>`
    Table,
    /// `<iframe>`
    Iframe,
    /// Anything else, handled as rich text
    Other,
}

impl ElementKind {
    /// Classify a lowercase tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "img" => ElementKind::Image,
            "table" => ElementKind::Table,
            "iframe" => ElementKind::Iframe,
            _ => ElementKind::Other,
        }
    }
}

/// Reusable conversion context.
///
/// Build once and share by reference; conversion only reads it.
///
/// ```
/// use htmlblocks::convert::Converter;
///
/// let converter = Converter::new().without_hook();
/// let blocks = converter.convert(r#"<p class="callout">note</p>"#);
/// assert_eq!(blocks[0].plain_text(), "note");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    videos: VideoIdMatcher,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set rich-text extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Produce text blocks only.
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self
    }

    /// Replace the block-type hook.
    pub fn with_hook(mut self, hook: impl BlockTypeHook + 'static) -> Self {
        self.extract_options = self.extract_options.with_hook(hook);
        self
    }

    /// Disable the block-type hook.
    pub fn without_hook(mut self) -> Self {
        self.extract_options = self.extract_options.without_hook();
        self
    }

    /// Parse options in use.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Extraction options in use.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Convert an HTML fragment to blocks with fresh random keys.
    pub fn convert(&self, html: &str) -> Vec<Block> {
        self.convert_with_keys(html, &mut KeyGenerator::new())
    }

    /// Convert an HTML fragment, drawing keys from `keys`.
    ///
    /// A seeded generator makes the output reproducible.
    pub fn convert_with_keys(&self, html: &str, keys: &mut KeyGenerator) -> Vec<Block> {
        let fragment = Fragment::parse(html);
        let blocks: Vec<Block> = fragment
            .top_level()
            .into_iter()
            .map(|element| self.convert_element(element, keys))
            .collect();
        log::debug!("converted {} bytes into {} blocks", html.len(), blocks.len());
        blocks
    }

    /// Read and convert an HTML file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Block>> {
        let html = std::fs::read_to_string(path)?;
        Ok(self.convert(&html))
    }

    /// Read and convert HTML from a reader.
    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<Vec<Block>> {
        let mut html = String::new();
        reader.read_to_string(&mut html)?;
        Ok(self.convert(&html))
    }

    /// Convert one top-level element.
    pub fn convert_element(&self, element: ElementRef<'_>, keys: &mut KeyGenerator) -> Block {
        if self.parse_options.extract_mode == ExtractMode::TextOnly {
            return Block::text(richtext::extract(element, &self.extract_options, keys));
        }

        let target = self.dispatch_target(element);
        let block = match ElementKind::from_tag(tag_name(&target)) {
            ElementKind::Image => classify_image(target),
            ElementKind::Table => classify_table(target, keys),
            ElementKind::Iframe => classify_iframe(target, &self.videos),
            ElementKind::Other => {
                Block::text(richtext::extract(element, &self.extract_options, keys))
            }
        };
        log::debug!("<{}> -> {}", tag_name(&element), block.kind());
        block
    }

    /// The element whose tag decides the block kind.
    ///
    /// A wrapper with exactly one child element yields that child; text
    /// nodes beside it do not count. Anything else yields the element itself.
    fn dispatch_target<'a>(&self, element: ElementRef<'a>) -> ElementRef<'a> {
        if !self.parse_options.is_wrapper(tag_name(&element)) {
            return element;
        }
        let mut children = child_elements(element);
        match (children.next(), children.next()) {
            (Some(only), None) => only,
            _ => element,
        }
    }
}
