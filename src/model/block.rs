//! Top-level content blocks.

use super::{RichTextDocument, Table};
use serde::{Deserialize, Serialize};

/// One top-level unit of converted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Styled text
    Text {
        /// Rich-text content
        content: RichTextDocument,
    },

    /// An image
    Image(ImageBlock),

    /// An embedded video, always a `https://youtu.be/<id>` URL
    Video {
        /// Normalized video URL
        url: String,
    },

    /// A raw embed kept verbatim
    Html {
        /// Serialized outer markup
        markup: String,
    },

    /// A table
    Table(Table),
}

impl Block {
    /// Wrap a rich-text document.
    pub fn text(content: RichTextDocument) -> Self {
        Block::Text { content }
    }

    /// Create a video block from a YouTube video id.
    pub fn youtube(id: &str) -> Self {
        Block::Video {
            url: format!("https://youtu.be/{}", id),
        }
    }

    /// Create a raw markup block.
    pub fn html(markup: impl Into<String>) -> Self {
        Block::Html {
            markup: markup.into(),
        }
    }

    /// Wire name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text { .. } => "text",
            Block::Image(_) => "image",
            Block::Video { .. } => "video",
            Block::Html { .. } => "html",
            Block::Table(_) => "table",
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Text { content } => content.plain_text(),
            Block::Table(table) => table.plain_text(),
            Block::Image(_) | Block::Video { .. } | Block::Html { .. } => String::new(),
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text { .. })
    }
}

/// An image block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Image URL with any scale suffix removed
    pub url: String,

    /// Alignment from the image's class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,

    /// Link target from `data-href`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Size bucket, present only when the URL carried a scale hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
}

impl ImageBlock {
    /// Create an image block for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Image alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Coarse image size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableCell, TableRow};

    #[test]
    fn test_image_omits_missing_fields() {
        let block = Block::Image(ImageBlock::new("http://x/img.png"));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "image", "url": "http://x/img.png" })
        );
    }

    #[test]
    fn test_image_with_all_fields() {
        let block = Block::Image(ImageBlock {
            url: "a.png".to_string(),
            align: Some(Alignment::Center),
            href: Some("/target".to_string()),
            size: Some(ImageSize::Large),
        });
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["align"], "center");
        assert_eq!(value["href"], "/target");
        assert_eq!(value["size"], "l");
    }

    #[test]
    fn test_tagged_shapes() {
        let video = serde_json::to_value(Block::youtube("abc")).unwrap();
        assert_eq!(
            video,
            serde_json::json!({ "type": "video", "url": "https://youtu.be/abc" })
        );

        let html = serde_json::to_value(Block::html("<iframe></iframe>")).unwrap();
        assert_eq!(html["type"], "html");
        assert_eq!(html["markup"], "<iframe></iframe>");

        let mut table = Table::new();
        table.add_row(TableRow::new(vec![TableCell::text("a", "b", "x")]));
        let table = serde_json::to_value(Block::Table(table)).unwrap();
        assert_eq!(table["type"], "table");
        assert_eq!(table["rows"][0]["cells"][0]["value"]["blocks"][0]["text"], "x");
    }

    #[test]
    fn test_deserialize_text_block() {
        let json = r#"{"type":"text","content":{"blocks":[],"entityMap":{}}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(block.is_text());
        assert_eq!(block.kind(), "text");
    }
}
