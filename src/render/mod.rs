//! Rendering converted blocks to JSON.
//!
//! Two output shapes are supported: [`OutputShape::Blocks`] is the
//! serde form of [`Block`](crate::Block), and [`OutputShape::Volto`] is the
//! shape Volto block editors import (see [`volto`]).

mod json;
pub mod volto;

pub use json::{to_json, to_value};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Shape of each rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// `{"type": ..., ...}` as defined by the block model
    #[default]
    Blocks,
    /// `{"@type": ..., ...}` as consumed by Volto
    Volto,
}

/// Options for rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// JSON layout
    pub format: JsonFormat,

    /// Block shape
    pub shape: OutputShape,
}

impl RenderOptions {
    /// Create render options with defaults (pretty, block shape).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set output shape.
    pub fn with_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    /// Render compact JSON.
    pub fn compact(self) -> Self {
        self.with_format(JsonFormat::Compact)
    }

    /// Render the Volto shape.
    pub fn volto(self) -> Self {
        self.with_shape(OutputShape::Volto)
    }
}
