//! `<table>` classification.

use crate::keys::KeyGenerator;
use crate::model::{Block, Table, TableCell, TableRow};
use crate::parser::{child_elements, tag_name, text_content};
use scraper::ElementRef;

/// Build a table block from a `<table>` element.
///
/// Rows are looked up two levels down (row group, then row), so a `tr`
/// must sit in a `thead`, `tbody` or `tfoot`; the HTML parser inserts a
/// `tbody` when the markup has none. Every element child of a row becomes
/// a data cell holding the cell's text content verbatim. Inline markup in
/// cells is flattened.
pub fn classify_table(element: ElementRef<'_>, keys: &mut KeyGenerator) -> Block {
    let mut table = Table::new();
    for group in child_elements(element) {
        for row in child_elements(group).filter(|el| tag_name(el) == "tr") {
            let cells = child_elements(row)
                .map(|cell| {
                    let key = keys.next_key();
                    TableCell::text(key, keys.next_key(), text_content(&cell))
                })
                .collect();
            table.add_row(TableRow::new(cells));
        }
    }
    log::trace!(
        "table with {} rows, {} columns",
        table.row_count(),
        table.column_count()
    );
    Block::Table(table)
}
