//! Whitespace normalization and range encoding.

use super::generator::{CharMeta, Generated, RawBlock, SOFT_BREAK};
use crate::keys::KeyGenerator;
use crate::model::{EntityKey, EntityRange, InlineStyle, RichTextDocument, StyleRange, TextBlock};
use std::collections::HashMap;

/// Turn generated raw blocks into a document.
///
/// Empty blocks are dropped, except one holding only a soft break, which is
/// kept with empty text. Entity keys are renumbered from 0 in order of first
/// use, so entities whose text vanished never reach the map.
pub(crate) fn encode(generated: Generated, keys: &mut KeyGenerator) -> RichTextDocument {
    let Generated { blocks, entities } = generated;
    let mut doc = RichTextDocument::new();
    let mut renumbered: HashMap<usize, EntityKey> = HashMap::new();

    for mut raw in blocks {
        let only_break = raw.chars.len() == 1 && raw.chars[0].0 == SOFT_BREAK;
        if only_break {
            raw.chars.clear();
        } else if !raw.block_type.preserves_whitespace() {
            collapse_whitespace(&mut raw.chars);
        }
        if raw.chars.is_empty() && !only_break {
            continue;
        }

        let inline_style_ranges = style_ranges(&raw.chars);
        let mut entity_ranges = Vec::new();
        for (index, offset, length) in entity_runs(&raw.chars) {
            let key = match renumbered.get(&index) {
                Some(key) => *key,
                None => {
                    let key = renumbered.len() as EntityKey;
                    renumbered.insert(index, key);
                    doc.entity_map.insert(key, entities[index].clone());
                    key
                }
            };
            entity_ranges.push(EntityRange { key, offset, length });
        }

        let RawBlock {
            block_type,
            depth,
            data,
            chars,
        } = raw;
        doc.blocks.push(TextBlock {
            key: keys.next_key(),
            block_type,
            depth,
            text: chars.iter().map(|(c, _)| *c).collect(),
            inline_style_ranges,
            entity_ranges,
            data,
        });
    }

    if doc.blocks.is_empty() {
        doc.blocks.push(TextBlock::unstyled(keys.next_key(), ""));
    }
    doc
}

/// Collapse runs of spaces to one, drop spaces next to soft breaks, and trim
/// both ends. A collapsed run keeps the metadata of its first space.
fn collapse_whitespace(chars: &mut Vec<(char, CharMeta)>) {
    let mut out: Vec<(char, CharMeta)> = Vec::with_capacity(chars.len());
    for (c, meta) in chars.drain(..) {
        if c == ' ' {
            match out.last() {
                None => continue,
                Some((' ', _)) => continue,
                Some((prev, _)) if *prev == SOFT_BREAK => continue,
                _ => {}
            }
        } else if c == SOFT_BREAK && matches!(out.last(), Some((' ', _))) {
            out.pop();
        }
        out.push((c, meta));
    }
    if matches!(out.last(), Some((' ', _))) {
        out.pop();
    }
    *chars = out;
}

/// Style runs, grouped by style in order of first appearance, then by offset.
fn style_ranges(chars: &[(char, CharMeta)]) -> Vec<StyleRange> {
    let mut order: Vec<InlineStyle> = Vec::new();
    for (_, meta) in chars {
        for style in &meta.styles {
            if !order.contains(style) {
                order.push(*style);
            }
        }
    }

    let mut ranges = Vec::new();
    for style in order {
        let mut offset = 0;
        let mut start: Option<usize> = None;
        for (c, meta) in chars {
            let styled = meta.styles.contains(&style);
            match (styled, start) {
                (true, None) => start = Some(offset),
                (false, Some(s)) => {
                    ranges.push(StyleRange {
                        offset: s,
                        length: offset - s,
                        style,
                    });
                    start = None;
                }
                _ => {}
            }
            offset += c.len_utf16();
        }
        if let Some(s) = start {
            ranges.push(StyleRange {
                offset: s,
                length: offset - s,
                style,
            });
        }
    }
    ranges
}

/// Maximal runs of one entity as `(entity index, offset, length)`.
fn entity_runs(chars: &[(char, CharMeta)]) -> Vec<(usize, usize, usize)> {
    let mut runs = Vec::new();
    let mut offset = 0;
    let mut current: Option<(usize, usize)> = None;
    for (c, meta) in chars {
        if current.map(|(entity, _)| entity) != meta.entity {
            if let Some((entity, start)) = current.take() {
                runs.push((entity, start, offset - start));
            }
            current = meta.entity.map(|entity| (entity, offset));
        }
        offset += c.len_utf16();
    }
    if let Some((entity, start)) = current {
        runs.push((entity, start, offset - start));
    }
    runs
}
