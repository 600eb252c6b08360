//! Volto block shape.
//!
//! Volto keys the block kind as `@type`, keeps text content under `text`
//! and raw markup under `html`, and wraps table rows in a table settings
//! object:
//!
//! ```json
//! {"@type": "table", "table": {"basic": false, "celled": true, "compact": false,
//!   "fixed": true, "inverted": false, "rows": [...], "striped": false}}
//! ```

use crate::error::Result;
use crate::model::Block;
use serde_json::{json, Map, Value};

/// Render one block in the Volto shape.
pub fn to_volto_value(block: &Block) -> Result<Value> {
    let value = match block {
        Block::Text { content } => json!({
            "@type": "text",
            "text": serde_json::to_value(content)?,
        }),
        Block::Image(image) => {
            let mut fields = Map::new();
            fields.insert("@type".to_string(), Value::from("image"));
            if let Value::Object(image) = serde_json::to_value(image)? {
                fields.extend(image);
            }
            Value::Object(fields)
        }
        Block::Video { url } => json!({ "@type": "video", "url": url }),
        Block::Html { markup } => json!({ "@type": "html", "html": markup }),
        Block::Table(table) => json!({
            "@type": "table",
            "table": {
                "basic": false,
                "celled": true,
                "compact": false,
                "fixed": true,
                "inverted": false,
                "rows": serde_json::to_value(&table.rows)?,
                "striped": false,
            },
        }),
    };
    Ok(value)
}
