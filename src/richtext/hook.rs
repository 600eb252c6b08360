//! Custom block-type detection.

use crate::model::{BlockData, BlockType};
use scraper::ElementRef;

/// Block type and data reported by a hook for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomBlock {
    /// Type of the block the element opens
    pub block_type: BlockType,

    /// Block metadata
    pub data: BlockData,
}

impl CustomBlock {
    /// Create a custom block of the given type with no data.
    pub fn new(block_type: impl Into<BlockType>) -> Self {
        Self {
            block_type: block_type.into(),
            data: BlockData::new(),
        }
    }

    /// Attach a data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Hook consulted for every element before structural block typing.
///
/// Returning `Some` makes the element open a block of the reported type,
/// even if the tag is inline.
///
/// # Example
///
/// ```
/// use htmlblocks::richtext::{BlockTypeHook, CustomBlock};
/// use htmlblocks::ElementRef;
///
/// struct Asides;
///
/// impl BlockTypeHook for Asides {
///     fn custom_block(&self, element: &ElementRef<'_>) -> Option<CustomBlock> {
///         (element.value().name() == "aside").then(|| CustomBlock::new("aside"))
///     }
/// }
/// ```
pub trait BlockTypeHook: Send + Sync {
    /// Inspect an element and optionally report a custom block.
    fn custom_block(&self, element: &ElementRef<'_>) -> Option<CustomBlock>;
}

impl<F> BlockTypeHook for F
where
    F: Fn(&ElementRef<'_>) -> Option<CustomBlock> + Send + Sync,
{
    fn custom_block(&self, element: &ElementRef<'_>) -> Option<CustomBlock> {
        self(element)
    }
}

/// Reports elements whose class attribute is exactly `callout` as `callout`
/// blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalloutHook;

impl BlockTypeHook for CalloutHook {
    fn custom_block(&self, element: &ElementRef<'_>) -> Option<CustomBlock> {
        match element.value().attr("class") {
            Some("callout") => Some(CustomBlock::new("callout")),
            _ => None,
        }
    }
}

/// Never reports a custom block.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

impl BlockTypeHook for NoHook {
    fn custom_block(&self, _element: &ElementRef<'_>) -> Option<CustomBlock> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn find<'a>(doc: &'a Html, name: &str) -> ElementRef<'a> {
        doc.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == name)
            .unwrap()
    }

    #[test]
    fn test_callout_hook_exact_class() {
        let doc = Html::parse_document(r#"<p class="callout">x</p>"#);
        let block = CalloutHook.custom_block(&find(&doc, "p")).unwrap();
        assert_eq!(block.block_type, BlockType::Custom("callout".to_string()));
        assert!(block.data.is_empty());

        let doc = Html::parse_document(r#"<p class="callout big">x</p>"#);
        assert!(CalloutHook.custom_block(&find(&doc, "p")).is_none());
    }

    #[test]
    fn test_closure_hook() {
        let hook = |el: &ElementRef<'_>| {
            (el.value().name() == "aside").then(|| CustomBlock::new("aside").with_data("role", "note"))
        };
        let doc = Html::parse_document("<aside>x</aside>");
        let block = hook.custom_block(&find(&doc, "aside")).unwrap();
        assert_eq!(block.block_type.as_str(), "aside");
        assert_eq!(block.data["role"], "note");
    }

    #[test]
    fn test_no_hook() {
        let doc = Html::parse_document(r#"<p class="callout">x</p>"#);
        assert!(NoHook.custom_block(&find(&doc, "p")).is_none());
    }
}
