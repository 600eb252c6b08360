//! Tree walk that turns an element subtree into raw text blocks.
//!
//! Each block collects characters paired with their inline styles and
//! entity. Whitespace is normalized and ranges are encoded afterwards, in
//! [`super::encode`].

use super::hook::BlockTypeHook;
use crate::model::{BlockData, BlockType, Entity, InlineStyle};
use scraper::{ElementRef, Node};
use std::collections::BTreeMap;

/// Placeholder text for an image nested inside text.
pub(crate) const IMAGE_PLACEHOLDER: char = '\u{1F4F7}';

/// Soft line break inserted for `<br>`.
pub(crate) const SOFT_BREAK: char = '\n';

/// Element nesting below which the walk stops recursing and only
/// collects text into the current block.
pub(crate) const MAX_NESTING: usize = 256;

/// Elements whose content never reaches the text.
const IGNORED_TAGS: &[&str] = &[
    "head", "title", "meta", "link", "script", "style", "template", "noscript", "iframe",
];

/// Style and entity of one character.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CharMeta {
    /// Styles in the order they were applied, outermost first
    pub styles: Vec<InlineStyle>,

    /// Index into the generator's entity list
    pub entity: Option<usize>,
}

/// A block before whitespace normalization and range encoding.
#[derive(Debug, Clone)]
pub(crate) struct RawBlock {
    pub block_type: BlockType,
    pub depth: u32,
    pub data: BlockData,
    pub chars: Vec<(char, CharMeta)>,
}

impl RawBlock {
    fn new(block_type: BlockType, depth: u32, data: BlockData) -> Self {
        Self {
            block_type,
            depth,
            data,
            chars: Vec::new(),
        }
    }
}

/// Output of a tree walk.
#[derive(Debug)]
pub(crate) struct Generated {
    pub blocks: Vec<RawBlock>,
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Inline context inherited by descendants within one block.
#[derive(Debug, Clone, Default)]
struct Inline {
    styles: Vec<InlineStyle>,
    entity: Option<usize>,
}

impl Inline {
    fn with_style(&self, style: InlineStyle) -> Self {
        let mut next = self.clone();
        if !next.styles.contains(&style) {
            next.styles.push(style);
        }
        next
    }

    fn with_entity(&self, entity: usize) -> Self {
        Self {
            styles: self.styles.clone(),
            entity: Some(entity),
        }
    }

    fn meta(&self) -> CharMeta {
        CharMeta {
            styles: self.styles.clone(),
            entity: self.entity,
        }
    }
}

pub(crate) struct BlockGenerator<'h> {
    hook: &'h dyn BlockTypeHook,
    blocks: Vec<RawBlock>,
    entities: Vec<Entity>,
    lists: Vec<ListKind>,
    list_depth: u32,
    nesting: usize,
}

impl<'h> BlockGenerator<'h> {
    pub fn new(hook: &'h dyn BlockTypeHook) -> Self {
        Self {
            hook,
            blocks: Vec::new(),
            entities: Vec::new(),
            lists: Vec::new(),
            list_depth: 0,
            nesting: 0,
        }
    }

    /// Walk `element` as the only child of an implicit unstyled root block.
    pub fn generate(mut self, element: ElementRef<'_>) -> Generated {
        self.blocks
            .push(RawBlock::new(BlockType::Unstyled, 0, BlockData::new()));
        self.process_element(element, 0, &Inline::default());
        Generated {
            blocks: self.blocks,
            entities: self.entities,
        }
    }

    fn process_children(&mut self, element: ElementRef<'_>, block: usize, inline: &Inline) {
        let mut block = block;
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(block, text, inline),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        if self.nesting >= MAX_NESTING {
                            self.flatten(child, block, inline);
                            continue;
                        }
                        let opened = self.blocks.len();
                        self.nesting += 1;
                        self.process_element(child, block, inline);
                        self.nesting -= 1;
                        if self.blocks.len() > opened {
                            // content after a nested block goes into a new block of the same kind
                            block = self.continue_block(block);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Append the text under `element` to `block` without recursing.
    ///
    /// Structure is dropped: nested blocks, styles and links all collapse
    /// into the current block. `<br>` and ignored tags still apply.
    fn flatten(&mut self, element: ElementRef<'_>, block: usize, inline: &Inline) {
        let mut stack = vec![*element];
        while let Some(node) = stack.pop() {
            match node.value() {
                Node::Text(text) => self.push_text(block, text, inline),
                Node::Element(el) if el.name() == "br" => {
                    self.push_char(block, SOFT_BREAK, inline.meta())
                }
                Node::Element(el) if !IGNORED_TAGS.contains(&el.name()) => {
                    let start = stack.len();
                    stack.extend(node.children());
                    stack[start..].reverse();
                }
                _ => {}
            }
        }
    }

    fn continue_block(&mut self, block: usize) -> usize {
        let source = &self.blocks[block];
        let next = RawBlock::new(source.block_type.clone(), source.depth, source.data.clone());
        self.blocks.push(next);
        self.blocks.len() - 1
    }

    fn process_element(&mut self, element: ElementRef<'_>, block: usize, inline: &Inline) {
        let tag = element.value().name();
        if IGNORED_TAGS.contains(&tag) {
            return;
        }

        if let Some(custom) = self.hook.custom_block(&element) {
            log::trace!("hook typed <{}> as {}", tag, custom.block_type);
            let depth = self.blocks[block].depth;
            self.open_block(element, custom.block_type, depth, custom.data);
            return;
        }

        match tag {
            "br" => self.push_char(block, SOFT_BREAK, inline.meta()),
            "img" => self.process_image(element, block, inline),
            "ul" | "ol" => {
                let kind = if tag == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                self.lists.push(kind);
                self.process_children(element, block, inline);
                self.lists.pop();
            }
            "li" => {
                let block_type = match self.lists.last() {
                    Some(ListKind::Ordered) => BlockType::OrderedListItem,
                    _ => BlockType::UnorderedListItem,
                };
                let depth = self.list_depth;
                self.list_depth += 1;
                self.open_block(element, block_type, depth, BlockData::new());
                self.list_depth -= 1;
            }
            "a" => match element.value().attr("href") {
                Some(href) => {
                    let entity = self.add_entity(Entity::link(link_data(element, href)));
                    self.process_children(element, block, &inline.with_entity(entity));
                }
                None => self.process_children(element, block, inline),
            },
            _ => {
                if let Some(block_type) = BlockType::from_tag(tag) {
                    let parent = &self.blocks[block];
                    let (block_type, depth, data) =
                        if block_type == BlockType::Unstyled && parent.block_type != BlockType::Unstyled {
                            // a plain container inside a typed block keeps the outer type
                            (parent.block_type.clone(), parent.depth, parent.data.clone())
                        } else {
                            (block_type, 0, BlockData::new())
                        };
                    self.open_block(element, block_type, depth, data);
                } else if let Some(style) = InlineStyle::from_tag(tag) {
                    self.process_children(element, block, &inline.with_style(style));
                } else {
                    self.process_children(element, block, inline);
                }
            }
        }
    }

    /// Start a new block for `element`; inline context does not cross into it.
    fn open_block(&mut self, element: ElementRef<'_>, block_type: BlockType, depth: u32, data: BlockData) {
        self.blocks.push(RawBlock::new(block_type, depth, data));
        let index = self.blocks.len() - 1;
        self.process_children(element, index, &Inline::default());
    }

    fn process_image(&mut self, element: ElementRef<'_>, block: usize, inline: &Inline) {
        let Some(src) = element.value().attr("src") else {
            return;
        };
        let mut data = BTreeMap::new();
        data.insert("src".to_string(), src.to_string());
        for (name, value) in element.value().attrs() {
            if name == "alt" || is_data_attribute(name) {
                data.insert(name.to_string(), value.to_string());
            }
        }
        let entity = self.add_entity(Entity::image(data));
        self.push_char(block, IMAGE_PLACEHOLDER, inline.with_entity(entity).meta());
    }

    fn add_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    fn push_text(&mut self, block: usize, text: &str, inline: &Inline) {
        let preserve = self.blocks[block].block_type.preserves_whitespace();
        let meta = inline.meta();
        let chars = &mut self.blocks[block].chars;
        chars.reserve(text.len());
        for c in text.chars() {
            let c = if !preserve && is_ascii_whitespace(c) { ' ' } else { c };
            chars.push((c, meta.clone()));
        }
    }

    fn push_char(&mut self, block: usize, c: char, meta: CharMeta) {
        self.blocks[block].chars.push((c, meta));
    }
}

/// Link entity data: `href` becomes `url`; `rel`, `target`, `title` and
/// `data-*` attributes are kept under their own names.
fn link_data(element: ElementRef<'_>, href: &str) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    data.insert("url".to_string(), href.to_string());
    for (name, value) in element.value().attrs() {
        if matches!(name, "rel" | "target" | "title") || is_data_attribute(name) {
            data.insert(name.to_string(), value.to_string());
        }
    }
    data
}

fn is_data_attribute(name: &str) -> bool {
    name.strip_prefix("data-").is_some_and(|rest| {
        !rest.is_empty()
            && rest
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    })
}

fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0C}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::hook::{CalloutHook, NoHook};
    use scraper::Html;

    fn generate(html: &str, hook: &dyn BlockTypeHook) -> Generated {
        let doc = Html::parse_document(html);
        let body = doc
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .unwrap();
        let element = body.children().find_map(ElementRef::wrap).unwrap();
        BlockGenerator::new(hook).generate(element)
    }

    fn text(block: &RawBlock) -> String {
        block.chars.iter().map(|(c, _)| *c).collect()
    }

    #[test]
    fn test_root_block_comes_first() {
        let generated = generate("<p>foo</p>", &NoHook);
        assert_eq!(generated.blocks.len(), 2);
        assert_eq!(text(&generated.blocks[0]), "");
        assert_eq!(text(&generated.blocks[1]), "foo");
    }

    #[test]
    fn test_inline_element_writes_into_root() {
        let generated = generate("<span>foo <b>bar</b></span>", &NoHook);
        assert_eq!(generated.blocks.len(), 1);
        assert_eq!(text(&generated.blocks[0]), "foo bar");
        assert_eq!(generated.blocks[0].chars[4].1.styles, vec![InlineStyle::Bold]);
    }

    #[test]
    fn test_nested_styles_keep_application_order() {
        let generated = generate("<p><strong><em>x</em></strong></p>", &NoHook);
        let meta = &generated.blocks[1].chars[0].1;
        assert_eq!(meta.styles, vec![InlineStyle::Bold, InlineStyle::Italic]);
    }

    #[test]
    fn test_hook_opens_block() {
        let generated = generate(r#"<div class="callout">x</div>"#, &CalloutHook);
        assert_eq!(
            generated.blocks[1].block_type,
            BlockType::Custom("callout".to_string())
        );
    }

    #[test]
    fn test_list_depth() {
        let generated = generate("<ul><li>a<ol><li>b</li></ol></li></ul>", &NoHook);
        let items: Vec<_> = generated
            .blocks
            .iter()
            .filter(|b| !b.chars.is_empty())
            .map(|b| (b.block_type.clone(), b.depth, text(b)))
            .collect();
        assert_eq!(
            items,
            vec![
                (BlockType::UnorderedListItem, 0, "a".to_string()),
                (BlockType::OrderedListItem, 1, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_after_nested_block_keeps_order() {
        let generated = generate("<div>a<p>b</p>c</div>", &NoHook);
        let texts: Vec<_> = generated
            .blocks
            .iter()
            .map(text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deep_nesting_is_flattened() {
        let depth = 50_000;
        let html = format!(
            "{}<b>x</b><br>y<script>z</script>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let generated = generate(&html, &NoHook);
        let texts: Vec<_> = generated
            .blocks
            .iter()
            .map(text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["x\ny"]);
    }

    #[test]
    fn test_link_data_attributes() {
        let generated = generate(
            r#"<p><a href="/x" data-linktype="internal" class="c" title="t">l</a></p>"#,
            &NoHook,
        );
        let data = &generated.entities[0].data;
        assert_eq!(data.get("url").map(String::as_str), Some("/x"));
        assert_eq!(data.get("data-linktype").map(String::as_str), Some("internal"));
        assert_eq!(data.get("title").map(String::as_str), Some("t"));
        assert!(!data.contains_key("class"));
    }

    #[test]
    fn test_image_placeholder() {
        let generated = generate(r#"<div>a<span><img src="i.png" alt="A"></span></div>"#, &NoHook);
        let block = &generated.blocks[1];
        assert_eq!(block.chars[1].0, IMAGE_PLACEHOLDER);
        assert_eq!(block.chars[1].1.entity, Some(0));
        assert_eq!(generated.entities[0].data.get("alt").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_data_attribute_names() {
        assert!(is_data_attribute("data-linktype"));
        assert!(is_data_attribute("data-x-1"));
        assert!(!is_data_attribute("data-"));
        assert!(!is_data_attribute("datax"));
    }
}
