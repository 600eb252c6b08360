//! Media element classifiers.
//!
//! Each classifier turns one element into one block and never fails:
//! unknown scales, alignments and embed URLs fall back to defaults.

mod iframe;
mod image;
mod table;

pub use iframe::{classify_iframe, VideoIdMatcher};
pub use image::{classify_image, size_for_scale, split_scale};
pub use table::classify_table;
