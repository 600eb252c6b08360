//! Table types.

use super::RichTextDocument;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell. Its value is a one-block rich-text document so cell text
/// renders through the same path as body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Opaque key, unique within a conversion
    pub key: String,

    /// Cell kind
    #[serde(rename = "type")]
    pub cell_type: CellType,

    /// Cell content
    pub value: RichTextDocument,
}

impl TableCell {
    /// Create a data cell holding plain text.
    pub fn text(key: impl Into<String>, block_key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cell_type: CellType::Data,
            value: RichTextDocument::plain(block_key, text),
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.value.plain_text()
    }
}

/// Kind of table cell. Header and data cells are not distinguished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Data,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::text("a", "b", "Name"),
            TableCell::text("c", "d", "Age"),
        ]));
        table.add_row(TableRow::new(vec![
            TableCell::text("e", "f", "Alice"),
            TableCell::text("g", "h", "30"),
        ]));

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.plain_text(), "Name\tAge\nAlice\t30");
    }

    #[test]
    fn test_cell_wire_shape() {
        let cell = TableCell::text("k1", "k2", "Hello");
        assert_eq!(cell.plain_text(), "Hello");

        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(value["type"], "data");
        assert_eq!(value["value"]["blocks"][0]["text"], "Hello");
        assert_eq!(value["value"]["blocks"][0]["key"], "k2");
        assert_eq!(value["value"]["entityMap"], serde_json::json!({}));
    }
}
