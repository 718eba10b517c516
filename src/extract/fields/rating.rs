//! Star rating and review count.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::dom::{Locatable, SelectorList};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));
static REVIEWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*reviews?\b").expect("valid reviews regex"));

/// First decimal number in `text`, kept only when it is a valid rating.
pub fn parse_rating(text: &str) -> Option<f32> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .filter(|r| (0.0..=5.0).contains(r))
}

/// Integer directly followed by "review"/"reviews".
pub fn parse_labelled_reviews(text: &str) -> Option<u32> {
    REVIEWS
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// First integer in `text` that is not part of a decimal.
pub fn parse_standalone_integer(text: &str) -> Option<u32> {
    NUMBER
        .find_iter(text)
        .find(|m| !m.as_str().contains('.'))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_rating<L: Locatable>(candidate: L, rating: &SelectorList) -> Option<f32> {
    rating
        .first_in(candidate)
        .and_then(|el| parse_rating(&el.text_content()))
}

/// Review count from the review element, falling back to a labelled count
/// inside the rating element.
pub fn extract_review_count<L: Locatable>(
    candidate: L,
    reviews: &SelectorList,
    rating: &SelectorList,
) -> Option<u32> {
    let review_text = reviews.first_in(candidate).map(|el| el.text_content());
    let rating_text = rating.first_in(candidate).map(|el| el.text_content());

    review_text
        .as_deref()
        .and_then(parse_labelled_reviews)
        .or_else(|| rating_text.as_deref().and_then(parse_labelled_reviews))
        .or_else(|| review_text.as_deref().and_then(parse_standalone_integer))
}
