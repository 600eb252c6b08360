//! `<iframe>` classification: YouTube embeds become video blocks, anything
//! else is kept as raw markup.

use crate::model::Block;
use crate::parser::outer_html;
use regex::Regex;
use scraper::ElementRef;

/// Delimiters that precede a YouTube video id in the URL forms we accept.
const VIDEO_ID_DELIMITERS: &str = r"vi/|v=|/v/|youtu\.be/|/embed/";

/// Extracts YouTube video ids from URLs.
#[derive(Debug, Clone)]
pub struct VideoIdMatcher {
    delimiters: Regex,
}

impl VideoIdMatcher {
    /// Compile the matcher.
    pub fn new() -> Self {
        Self {
            delimiters: Regex::new(VIDEO_ID_DELIMITERS).unwrap(),
        }
    }

    /// Find the video id in a URL.
    ///
    /// The id is the text between the first delimiter and the next one,
    /// cut at the first character outside `[0-9A-Za-z_-]`. Angle brackets
    /// are ignored.
    pub fn video_id(&self, url: &str) -> Option<String> {
        let url: String = url.chars().filter(|c| !matches!(c, '<' | '>')).collect();
        let first = self.delimiters.find(&url)?;
        let rest = &url[first.end()..];
        let segment = match self.delimiters.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        };
        let id: String = segment
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
            .collect();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

impl Default for VideoIdMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a video or html block from an `<iframe>` element.
pub fn classify_iframe(element: ElementRef<'_>, matcher: &VideoIdMatcher) -> Block {
    let src = element.value().attr("src").unwrap_or_default();
    match matcher.video_id(src) {
        Some(id) => Block::youtube(&id),
        None => {
            log::debug!("iframe {:?} is not a YouTube embed, keeping markup", src);
            Block::html(outer_html(&element))
        }
    }
}
