//! Card image selection for the news and opportunities feed
//!
//! Fallback imagery is the caller's job, not the resolver's. This module holds
//! the rule the feed cards use to pick an image from a preview.

use serde::{Deserialize, Serialize};

use crate::model::PreviewState;

/// Shown when even the chosen image fails to load on the client
pub const BROKEN_IMAGE_FALLBACK: &str = "/images/homepage/IMG_9921.jpg";

/// Feed item categories, each with its own default artwork
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    News,
    Scholarship,
    Competition,
    Program,
    Research,
}

impl Category {
    /// Parses a category name, falling back to `News` for anything unknown
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "scholarship" => Category::Scholarship,
            "competition" => Category::Competition,
            "program" => Category::Program,
            "research" => Category::Research,
            _ => Category::News,
        }
    }

    pub fn default_image(self) -> &'static str {
        match self {
            Category::News => "/images/homepage/IMG_9921.jpg",
            Category::Scholarship | Category::Research => "/images/homepage/IMG_9920.JPG",
            Category::Competition => "/images/homepage/IMG_9897.JPG",
            Category::Program => "/images/homepage/IMG_9953.jpg",
        }
    }
}

/// Picks the image a card should display
///
/// Order: the preview image once loaded, then the item's own image, then the
/// category default. Empty strings count as absent.
pub fn card_image<'a>(
    preview: &'a PreviewState,
    explicit: Option<&'a str>,
    category: Category,
) -> &'a str {
    if !preview.loading && !preview.image.is_empty() {
        return &preview.image;
    }

    match explicit {
        Some(image) if !image.is_empty() => image,
        _ => category.default_image(),
    }
}
