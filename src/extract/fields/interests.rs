//! "Areas of interest" lists.

use scraper::Selector;

use crate::error::RuleError;
use crate::extract::dom::{parse_selector, Locatable};
use crate::utils::text::push_unique;

const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Compiled heading matcher for interest sections.
#[derive(Debug, Clone)]
pub struct InterestRules {
    headings: Selector,
    heading_tags: Vec<String>,
    phrases: Vec<String>,
    item: Selector,
}

impl InterestRules {
    pub fn new(heading_tags: &[String], phrases: &[String]) -> Result<Self, RuleError> {
        Ok(Self {
            headings: parse_selector(&heading_tags.join(", "))?,
            heading_tags: heading_tags.iter().map(|t| t.to_lowercase()).collect(),
            phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
            item: parse_selector("li")?,
        })
    }

    fn is_heading<L: Locatable>(&self, el: &L) -> bool {
        self.heading_tags.iter().any(|t| t == el.tag_name())
    }

    /// Items of the first list following a matching heading, stopping at
    /// the next heading.
    pub fn extract<L: Locatable>(&self, scope: L) -> Vec<String> {
        let Some(heading) = scope.select_all(&self.headings).into_iter().find(|h| {
            let text = h.text_content().to_lowercase();
            self.phrases.iter().any(|p| text.contains(p.as_str()))
        }) else {
            return Vec::new();
        };

        let list = heading
            .following_siblings()
            .into_iter()
            .take_while(|sib| !self.is_heading(sib))
            .find(|sib| LIST_TAGS.contains(&sib.tag_name()));

        let mut items = Vec::new();
        if let Some(list) = list {
            for li in list.select_all(&self.item) {
                let text = li.text_content();
                if !text.is_empty() {
                    push_unique(&mut items, text);
                }
            }
        }
        items
    }
}
