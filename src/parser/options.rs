//! Parsing options and configuration.

/// Options controlling how a fragment's top level is interpreted.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// What kinds of blocks to produce
    pub extract_mode: ExtractMode,

    /// Tags treated as paragraph wrappers around a single media element
    pub wrapper_tags: Vec<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extract mode.
    pub fn with_extract_mode(mut self, mode: ExtractMode) -> Self {
        self.extract_mode = mode;
        self
    }

    /// Produce text blocks only, never image, video, html or table blocks.
    pub fn text_only(mut self) -> Self {
        self.extract_mode = ExtractMode::TextOnly;
        self
    }

    /// Replace the wrapper tag set. Tags are compared lowercase.
    pub fn with_wrapper_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrapper_tags = tags
            .into_iter()
            .map(|t| t.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Check if a tag is a paragraph wrapper.
    pub fn is_wrapper(&self, tag: &str) -> bool {
        self.wrapper_tags.iter().any(|t| t == tag)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_mode: ExtractMode::Full,
            wrapper_tags: vec!["p".to_string()],
        }
    }
}

/// What content to extract from the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Classify media elements and extract text
    #[default]
    Full,
    /// Route every element through the rich-text extractor
    TextOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .text_only()
            .with_wrapper_tags(["P", "div"]);

        assert_eq!(options.extract_mode, ExtractMode::TextOnly);
        assert!(options.is_wrapper("p"));
        assert!(options.is_wrapper("div"));
        assert!(!options.is_wrapper("span"));
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.extract_mode, ExtractMode::Full);
        assert!(options.is_wrapper("p"));
        assert!(!options.is_wrapper("div"));
    }
}
