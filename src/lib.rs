//! # htmlblocks
//!
//! Convert HTML fragments into typed rich-text content blocks.
//!
//! Each top-level element of a fragment becomes one [`Block`]: styled text
//! (a Draft.js-style [`RichTextDocument`] with inline style and entity
//! ranges), an image, a YouTube video, a raw html embed, or a table.
//!
//! ## Quick Start
//!
//! ```
//! use htmlblocks::{convert_html, Block};
//!
//! let blocks = convert_html("<p><em>foo</em> bar <strong>baz</strong></p>");
//! assert_eq!(blocks.len(), 1);
//!
//! let Block::Text { content } = &blocks[0] else { panic!("expected text") };
//! assert_eq!(content.blocks[0].text, "foo bar baz");
//! assert_eq!(content.blocks[0].inline_style_ranges.len(), 2);
//! ```
//!
//! ## Features
//!
//! - **Browser-grade parsing**: html5ever tree construction via `scraper`
//! - **Rich text**: block types, nested lists, inline styles, links, images
//! - **Media**: image scale and alignment hints, YouTube embeds, tables
//! - **Custom block types**: pluggable [`BlockTypeHook`]
//! - **Two JSON shapes**: the block model, or the Volto editor shape

pub mod classify;
pub mod convert;
pub mod error;
pub mod keys;
pub mod model;
pub mod parser;
pub mod render;
pub mod richtext;

// Re-export commonly used types
pub use convert::{Converter, ElementKind};
pub use error::{Error, Result};
pub use keys::KeyGenerator;
pub use model::{
    Alignment, Block, BlockType, Entity, EntityRange, ImageBlock, ImageSize, InlineStyle,
    RichTextDocument, StyleRange, Table, TableCell, TableRow, TextBlock,
};
pub use parser::{ExtractMode, ParseOptions};
pub use render::{JsonFormat, OutputShape, RenderOptions};
pub use richtext::{BlockTypeHook, CalloutHook, CustomBlock, ExtractOptions, NoHook};
pub use scraper::ElementRef;

use std::io::Read;
use std::path::Path;

/// Convert an HTML fragment with default options.
///
/// # Example
///
/// ```
/// use htmlblocks::convert_html;
///
/// let blocks = convert_html(r#"<iframe src="https://youtu.be/VASywEuqFd8"></iframe>"#);
/// assert_eq!(blocks[0].kind(), "video");
/// ```
pub fn convert_html(html: &str) -> Vec<Block> {
    Converter::new().convert(html)
}

/// Read and convert an HTML file.
///
/// # Example
///
/// ```no_run
/// use htmlblocks::convert_file;
///
/// let blocks = convert_file("page.html").unwrap();
/// println!("Blocks: {}", blocks.len());
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    Converter::new().convert_file(path)
}

/// Read and convert HTML from a reader.
pub fn convert_reader<R: Read>(reader: R) -> Result<Vec<Block>> {
    Converter::new().convert_reader(reader)
}

/// Convert an HTML fragment to JSON in the block shape.
///
/// # Example
///
/// ```
/// use htmlblocks::{to_json, JsonFormat};
///
/// let json = to_json("<p>foo</p>", JsonFormat::Compact).unwrap();
/// assert!(json.starts_with(r#"[{"type":"text""#));
/// ```
pub fn to_json(html: &str, format: JsonFormat) -> Result<String> {
    let blocks = convert_html(html);
    render::to_json(&blocks, &RenderOptions::new().with_format(format))
}

/// Convert an HTML fragment to JSON in the Volto shape.
pub fn to_volto_json(html: &str, format: JsonFormat) -> Result<String> {
    let blocks = convert_html(html);
    render::to_json(&blocks, &RenderOptions::new().with_format(format).volto())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_html_empty() {
        assert!(convert_html("").is_empty());
        assert!(convert_html("   \n").is_empty());
    }

    #[test]
    fn test_convert_html_loose_text_is_skipped() {
        let blocks = convert_html("loose <p>kept</p> text");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "kept");
    }

    #[test]
    fn test_head_elements_are_not_blocks() {
        let blocks = convert_html("<title>t</title><meta charset=utf-8><p>body</p>");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_convert_reader() {
        let blocks = convert_reader("<h1>Title</h1><p>text</p>".as_bytes()).unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_convert_file_missing() {
        let result = convert_file("/nonexistent/page.html");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_to_json_shapes() {
        let json = to_json("<p>foo</p>", JsonFormat::Compact).unwrap();
        assert!(json.contains(r#""text":"foo""#));
        assert!(!json.contains("@type"));

        let json = to_volto_json("<p>foo</p>", JsonFormat::Compact).unwrap();
        assert!(json.contains(r#""@type":"text""#));
    }
}
