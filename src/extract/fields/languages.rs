//! Spoken languages from a "Speaks ..." sentence.

use scraper::Selector;

use crate::extract::dom::Locatable;
use crate::utils::text::{dedup_preserving, title_case};

/// Word that may sit between a trigger and the list ("Languages spoken:").
const SPOKEN: &str = "spoken";

/// Text to read languages from: the first paragraph mentioning a trigger,
/// else the candidate's whole text when it mentions one.
pub fn language_source<L: Locatable>(
    candidate: L,
    paragraph: &Selector,
    triggers: &[String],
) -> Option<String> {
    let mentions = |text: &str| {
        let lower = text.to_lowercase();
        triggers.iter().any(|t| lower.contains(&t.to_lowercase()))
    };
    candidate
        .select_all(paragraph)
        .into_iter()
        .map(|p| p.text_content())
        .find(|t| mentions(t))
        .or_else(|| Some(candidate.text_content()).filter(|t| mentions(t)))
}

/// Languages listed after the earliest trigger word, up to the first
/// period. `"Speaks English and Mandarin."` gives `English, Mandarin`.
pub fn parse_languages(text: &str, triggers: &[String]) -> Vec<String> {
    let lower = text.to_ascii_lowercase();
    let Some((pos, len)) = triggers
        .iter()
        .filter_map(|t| {
            let t = t.to_ascii_lowercase();
            lower.find(&t).map(|pos| (pos, t.len()))
        })
        .min_by_key(|(pos, _)| *pos)
    else {
        return Vec::new();
    };

    let rest = &text[pos + len..];
    let rest = rest.split('.').next().unwrap_or_default();
    let rest = rest.trim_start();
    let rest = match rest.get(..SPOKEN.len()) {
        Some(word) if word.eq_ignore_ascii_case(SPOKEN) => &rest[SPOKEN.len()..],
        _ => rest,
    };
    let rest = rest.trim_start().trim_start_matches([':', '-']).trim_start();

    let normalized = rest
        .split_whitespace()
        .map(|w| if w.eq_ignore_ascii_case("and") { "," } else { w })
        .collect::<Vec<_>>()
        .join(" ");

    dedup_preserving(
        normalized
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(title_case)
            .collect(),
    )
}
