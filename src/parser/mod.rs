//! HTML parsing module.

mod fragment;
mod options;

pub use fragment::{child_elements, outer_html, tag_name, text_content, Fragment};
pub use options::{ExtractMode, ParseOptions};
