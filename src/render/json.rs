//! JSON rendering for block sequences.

use super::{volto, JsonFormat, OutputShape, RenderOptions};
use crate::error::Result;
use crate::model::Block;
use serde::Serialize;
use serde_json::Value;

/// Render blocks as a JSON array.
pub fn to_json(blocks: &[Block], options: &RenderOptions) -> Result<String> {
    match options.shape {
        OutputShape::Blocks => write(&blocks, options.format),
        OutputShape::Volto => write(&to_value(blocks, OutputShape::Volto)?, options.format),
    }
}

fn write<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Render blocks as a JSON array value in the given shape.
pub fn to_value(blocks: &[Block], shape: OutputShape) -> Result<Value> {
    match shape {
        OutputShape::Blocks => Ok(serde_json::to_value(blocks)?),
        OutputShape::Volto => blocks
            .iter()
            .map(volto::to_volto_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
    }
}
