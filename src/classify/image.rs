//! `<img>` classification.

use crate::model::{Alignment, Block, ImageBlock, ImageSize};
use scraper::ElementRef;

/// Marker of the images view; everything from `/@@images` on is dropped.
const IMAGES_VIEW: &str = "@@images";

/// Marker of a scale view in an image URL: `.../@@images/image/<scale>`.
const SCALE_VIEW: &str = "@@images/image/";

/// Marker of a traversal scale in an image URL: `.../image_<scale>`.
const SCALE_TRAVERSAL: &str = "/image_";

/// Build an image block from an `<img>` element.
pub fn classify_image(element: ElementRef<'_>) -> Block {
    let el = element.value();
    let (url, scale) = split_scale(el.attr("src").unwrap_or_default());

    let mut image = ImageBlock::new(url);
    image.href = el.attr("data-href").map(str::to_string);
    image.align = alignment(el.attr("class").unwrap_or_default());
    image.size = scale.map(size_for_scale);
    log::trace!("image {} scale={:?}", image.url, scale);
    Block::Image(image)
}

/// Split an image URL into the base URL and the scale token, if any.
///
/// ```
/// use htmlblocks::classify::split_scale;
///
/// assert_eq!(split_scale("a/b/@@images/image/mini"), ("a/b", Some("mini")));
/// assert_eq!(split_scale("a/b/image_large"), ("a/b", Some("large")));
/// assert_eq!(split_scale("a/b.png"), ("a/b.png", None));
/// ```
pub fn split_scale(src: &str) -> (&str, Option<&str>) {
    if src.contains(IMAGES_VIEW) {
        let token = src
            .find(SCALE_VIEW)
            .map(|pos| first_segment(&src[pos + SCALE_VIEW.len()..]));
        let base = src.find("/@@images").map_or(src, |pos| &src[..pos]);
        return (base, token);
    }
    if let Some(pos) = src.find(SCALE_TRAVERSAL) {
        let token = first_segment(&src[pos + SCALE_TRAVERSAL.len()..]);
        return (&src[..pos], Some(token));
    }
    (src, None)
}

/// Map a scale token to a size bucket. Unknown tokens are medium.
pub fn size_for_scale(token: &str) -> ImageSize {
    match token {
        "large" | "image_large" => ImageSize::Large,
        "thumb" | "image_thumb" | "tile" | "image_tile" => ImageSize::Small,
        _ => ImageSize::Medium,
    }
}

fn alignment(class: &str) -> Option<Alignment> {
    if class.contains("image-left") {
        Some(Alignment::Left)
    } else if class.contains("image-right") {
        Some(Alignment::Right)
    } else if class.contains("image-inline") {
        Some(Alignment::Center)
    } else {
        None
    }
}

fn first_segment(rest: &str) -> &str {
    rest.split('/').next().unwrap_or(rest)
}
