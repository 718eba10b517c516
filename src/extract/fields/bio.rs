//! Free-text biography.

use crate::extract::dom::{Locatable, SelectorList};
use crate::utils::text::char_len;

/// First text block among `selectors` longer than `min_len` characters.
pub fn extract_bio<L: Locatable>(candidate: L, selectors: &SelectorList, min_len: usize) -> Option<String> {
    selectors
        .first_where(candidate, |el| char_len(&el.text_content()) > min_len)
        .map(|el| el.text_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_skips_short_paragraphs() {
        let long = "Dr Smith has worked in general practice for many years, with a focus on \
                    preventive care, chronic disease management and family health.";
        let html = Html::parse_fragment(&format!(
            r#"<div><p>Next available: Today</p><div class="bio"><p>{}</p></div></div>"#,
            long
        ));
        let selectors = SelectorList::parse(&[".server-html p", ".bio p", "p"]).unwrap();
        let bio = extract_bio(html.root_element(), &selectors, 100);
        assert_eq!(bio.as_deref(), Some(long));
    }

    #[test]
    fn test_absent_when_everything_is_short() {
        let html = Html::parse_fragment("<div><p>Short.</p></div>");
        let selectors = SelectorList::parse(&["p"]).unwrap();
        assert_eq!(extract_bio(html.root_element(), &selectors, 100), None);
    }
}
