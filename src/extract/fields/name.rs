//! Practitioner names, titles and profile links.

use scraper::Selector;

use crate::extract::dom::{Locatable, SelectorList};
use crate::utils::text::collapse_whitespace;

/// A display name split into its title and the bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub raw: String,
    pub cleaned: String,
    pub title: String,
}

/// Honorific tables used when splitting names.
#[derive(Debug, Clone)]
pub struct Honorifics {
    strip: Vec<String>,
    titles: Vec<String>,
    default_title: String,
}

impl Honorifics {
    pub fn new(strip: &[String], titles: &[String], default_title: &str) -> Self {
        Self {
            strip: strip.iter().map(|s| s.to_lowercase()).collect(),
            titles: titles.iter().map(|s| s.to_lowercase()).collect(),
            default_title: default_title.to_string(),
        }
    }

    fn bare(word: &str) -> String {
        word.trim_end_matches('.').to_lowercase()
    }

    /// Strip leading honorifics from `raw`.
    ///
    /// Words are removed from the front while they are honorifics; the
    /// first one that is a professional title becomes `title`. Running the
    /// split again on `cleaned` returns `cleaned` unchanged.
    pub fn split(&self, raw: &str) -> NameParts {
        let raw = collapse_whitespace(raw);
        let words: Vec<&str> = raw.split(' ').filter(|w| !w.is_empty()).collect();

        let mut title = None;
        let mut start = 0;
        while start < words.len() {
            let bare = Self::bare(words[start]);
            if !self.strip.contains(&bare) {
                break;
            }
            if title.is_none() && self.titles.contains(&bare) {
                title = Some(words[start].to_string());
            }
            start += 1;
        }

        NameParts {
            cleaned: words[start..].join(" "),
            title: title.unwrap_or_else(|| self.default_title.clone()),
            raw,
        }
    }
}

/// Element holding the practitioner's name inside `candidate`.
///
/// A candidate that is itself a link with text is its own name element.
pub fn name_element<L: Locatable>(candidate: L, selectors: &SelectorList) -> Option<L> {
    selectors
        .first_where(candidate, |el| !el.text_content().is_empty())
        .or_else(|| {
            (candidate.tag_name() == "a" && !candidate.text_content().is_empty())
                .then_some(candidate)
        })
}

/// Raw href of the profile link: the name element itself when it is a
/// link, else its first descendant link.
pub fn profile_href<L: Locatable>(name_el: L, link: &Selector) -> Option<String> {
    let owned_href = |el: &L| {
        el.attribute("href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
    };
    if name_el.tag_name() == "a" {
        owned_href(&name_el)
    } else {
        name_el.select_first(link).and_then(|a| owned_href(&a))
    }
}
