//! Content model for converted HTML.
//!
//! A conversion yields a flat list of [`Block`]s. Text blocks carry a
//! [`RichTextDocument`]; tables carry rows of cells whose values are
//! themselves single-block rich-text documents.

mod block;
mod rich_text;
mod table;

pub use block::{Alignment, Block, ImageBlock, ImageSize};
pub use rich_text::{
    BlockData, BlockType, Entity, EntityKey, EntityRange, EntityType, InlineStyle, Mutability,
    RichTextDocument, StyleRange, TextBlock,
};
pub use table::{CellType, Table, TableCell, TableRow};
