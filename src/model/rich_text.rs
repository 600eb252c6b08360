//! Rich-text document types.
//!
//! These mirror the raw content format used by block-based rich-text
//! editors: a list of text blocks, each carrying run-length encoded inline
//! style and entity ranges, plus a shared entity map.
//!
//! Offsets and lengths count UTF-16 code units, the unit JavaScript editors
//! index strings with.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key of an entry in [`RichTextDocument::entity_map`].
pub type EntityKey = u32;

/// Free-form block metadata.
pub type BlockData = BTreeMap<String, serde_json::Value>;

/// A rich-text document: text blocks plus the entities they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextDocument {
    /// Text blocks in document order
    pub blocks: Vec<TextBlock>,

    /// Entities referenced by the blocks' entity ranges
    pub entity_map: BTreeMap<EntityKey, Entity>,
}

impl RichTextDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding one unstyled block of plain text.
    pub fn plain(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            blocks: vec![TextBlock::unstyled(key, text)],
            entity_map: BTreeMap::new(),
        }
    }

    /// Get plain text content, one line per block.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Opaque key, unique within a conversion
    pub key: String,

    /// Block type
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Nesting depth (list items only)
    pub depth: u32,

    /// Flattened text
    pub text: String,

    /// Inline style runs over `text`
    pub inline_style_ranges: Vec<StyleRange>,

    /// Entity runs over `text`
    pub entity_ranges: Vec<EntityRange>,

    /// Block metadata
    pub data: BlockData,
}

impl TextBlock {
    /// Create an unstyled block without ranges.
    pub fn unstyled(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            block_type: BlockType::Unstyled,
            depth: 0,
            text: text.into(),
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: BlockData::new(),
        }
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.text.encode_utf16().count()
    }
}

/// Type of a text block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
    /// Any other type, e.g. `callout` from a block-type hook
    Custom(String),
}

impl BlockType {
    /// Structural type for a block-level tag, if the tag opens a block.
    ///
    /// `li` is not covered here because its type depends on the enclosing
    /// list.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let block_type = match tag {
            "p" | "div" => BlockType::Unstyled,
            "h1" => BlockType::HeaderOne,
            "h2" => BlockType::HeaderTwo,
            "h3" => BlockType::HeaderThree,
            "h4" => BlockType::HeaderFour,
            "h5" => BlockType::HeaderFive,
            "h6" => BlockType::HeaderSix,
            "blockquote" => BlockType::Blockquote,
            "pre" => BlockType::CodeBlock,
            "figure" => BlockType::Atomic,
            _ => return None,
        };
        Some(block_type)
    }

    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::HeaderFour => "header-four",
            BlockType::HeaderFive => "header-five",
            BlockType::HeaderSix => "header-six",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::Blockquote => "blockquote",
            BlockType::CodeBlock => "code-block",
            BlockType::Atomic => "atomic",
            BlockType::Custom(name) => name,
        }
    }

    /// Check if blocks of this type keep whitespace verbatim.
    pub fn preserves_whitespace(&self) -> bool {
        matches!(self, BlockType::CodeBlock)
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "unstyled" => BlockType::Unstyled,
            "header-one" => BlockType::HeaderOne,
            "header-two" => BlockType::HeaderTwo,
            "header-three" => BlockType::HeaderThree,
            "header-four" => BlockType::HeaderFour,
            "header-five" => BlockType::HeaderFive,
            "header-six" => BlockType::HeaderSix,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "blockquote" => BlockType::Blockquote,
            "code-block" => BlockType::CodeBlock,
            "atomic" => BlockType::Atomic,
            other => BlockType::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(BlockType::from(name.as_str()))
    }
}

/// An inline style run: `[offset, offset + length)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// Inline text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Code,
    Underline,
    Strikethrough,
    Highlight,
}

impl InlineStyle {
    /// Style implied by an inline tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "strong" | "b" => Some(InlineStyle::Bold),
            "em" | "i" => Some(InlineStyle::Italic),
            "code" => Some(InlineStyle::Code),
            "u" | "ins" => Some(InlineStyle::Underline),
            "s" | "strike" | "del" => Some(InlineStyle::Strikethrough),
            "mark" => Some(InlineStyle::Highlight),
            _ => None,
        }
    }
}

/// An entity run: `[offset, offset + length)` refers to `entity_map[key]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub key: EntityKey,
    pub offset: usize,
    pub length: usize,
}

/// Out-of-band metadata attached to a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity kind
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Editing behaviour
    pub mutability: Mutability,

    /// Entity attributes (`url` for links, `src` for images, ...)
    pub data: BTreeMap<String, String>,
}

impl Entity {
    /// Create a mutable link entity.
    pub fn link(data: BTreeMap<String, String>) -> Self {
        Self {
            entity_type: EntityType::Link,
            mutability: Mutability::Mutable,
            data,
        }
    }

    /// Create a mutable image entity.
    pub fn image(data: BTreeMap<String, String>) -> Self {
        Self {
            entity_type: EntityType::Image,
            mutability: Mutability::Mutable,
            data,
        }
    }
}

/// Entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Link,
    Image,
}

/// Entity mutability. Extracted entities are always mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    Mutable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trips_names() {
        for name in ["unstyled", "header-two", "ordered-list-item", "code-block"] {
            assert_eq!(BlockType::from(name).as_str(), name);
        }
        assert_eq!(
            BlockType::from("callout"),
            BlockType::Custom("callout".to_string())
        );
    }

    #[test]
    fn test_inline_style_from_tag() {
        assert_eq!(InlineStyle::from_tag("b"), Some(InlineStyle::Bold));
        assert_eq!(InlineStyle::from_tag("em"), Some(InlineStyle::Italic));
        assert_eq!(InlineStyle::from_tag("span"), None);
    }

    #[test]
    fn test_document_wire_shape() {
        let mut doc = RichTextDocument::plain("abc", "foo");
        doc.blocks[0].inline_style_ranges.push(StyleRange {
            offset: 0,
            length: 3,
            style: InlineStyle::Bold,
        });
        let mut data = BTreeMap::new();
        data.insert("url".to_string(), "http://x.com".to_string());
        doc.entity_map.insert(0, Entity::link(data));

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["blocks"][0]["type"], "unstyled");
        assert_eq!(value["blocks"][0]["inlineStyleRanges"][0]["style"], "BOLD");
        assert_eq!(value["blocks"][0]["entityRanges"], serde_json::json!([]));
        assert_eq!(value["blocks"][0]["data"], serde_json::json!({}));
        assert_eq!(value["entityMap"]["0"]["type"], "LINK");
        assert_eq!(value["entityMap"]["0"]["mutability"], "MUTABLE");
    }

    #[test]
    fn test_utf16_length() {
        let block = TextBlock::unstyled("k", "a\u{1F4F7}");
        assert_eq!(block.len_utf16(), 3);
    }
}
