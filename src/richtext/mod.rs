//! Rich-text extraction.
//!
//! Converts one element subtree into a [`RichTextDocument`]:
//!
//! - Block elements (`p`, `div`, `h1`-`h6`, `blockquote`, `pre`, `figure`,
//!   `li`) open text blocks. An unstyled container nested in a typed block
//!   takes the outer type, so `<blockquote><p>x</p></blockquote>` yields a
//!   single `blockquote` block.
//! - Inline tags set styles (`strong`/`b` bold, `em`/`i` italic, `code`, and
//!   a few more, see [`InlineStyle::from_tag`](crate::model::InlineStyle::from_tag)).
//! - Anchors with `href` become `LINK` entities; nested images become
//!   `IMAGE` entities over a placeholder character.
//! - Outside code blocks whitespace collapses the way a browser renders it.
//!
//! A [`BlockTypeHook`] can claim any element as a custom block type. The
//! default hook is [`CalloutHook`].

mod encode;
mod generator;
mod hook;

pub use hook::{BlockTypeHook, CalloutHook, CustomBlock, NoHook};

use crate::keys::KeyGenerator;
use crate::model::RichTextDocument;
use generator::BlockGenerator;
use scraper::ElementRef;
use std::fmt;
use std::sync::Arc;

/// Options for rich-text extraction.
#[derive(Clone)]
pub struct ExtractOptions {
    hook: Arc<dyn BlockTypeHook>,
}

impl ExtractOptions {
    /// Create extract options with the callout hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the block-type hook.
    pub fn with_hook(mut self, hook: impl BlockTypeHook + 'static) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Use structural block types only.
    pub fn without_hook(self) -> Self {
        self.with_hook(NoHook)
    }

    /// The configured hook.
    pub fn hook(&self) -> &dyn BlockTypeHook {
        self.hook.as_ref()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            hook: Arc::new(CalloutHook),
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions").finish_non_exhaustive()
    }
}

/// Extract a rich-text document from an element and its subtree.
///
/// The element is treated like the only child of an unstyled root block,
/// so inline elements and bare text still produce an `unstyled` block. The
/// result always has at least one block.
pub fn extract(
    element: ElementRef<'_>,
    options: &ExtractOptions,
    keys: &mut KeyGenerator,
) -> RichTextDocument {
    let generated = BlockGenerator::new(options.hook()).generate(element);
    log::trace!(
        "<{}>: {} raw blocks, {} entities",
        element.value().name(),
        generated.blocks.len(),
        generated.entities.len()
    );
    encode::encode(generated, keys)
}
