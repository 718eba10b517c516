//! DOM access capability used by the cascade and the field extractors.

use scraper::{ElementRef, Selector};

use crate::document::visible_text;
use crate::error::RuleError;

/// What the extractors need from a markup node.
///
/// Implemented for `scraper::ElementRef`; extractors are written against
/// this trait so they never touch the parser's node types directly.
pub trait Locatable: Copy {
    /// Lower-case tag name.
    fn tag_name(&self) -> &str;
    /// Visible text, whitespace collapsed.
    fn text_content(&self) -> String;
    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Child elements in document order.
    fn child_elements(&self) -> Vec<Self>;
    /// Ancestor elements, nearest first.
    fn ancestor_elements(&self) -> Vec<Self>;
    /// Following sibling elements, nearest first.
    fn following_siblings(&self) -> Vec<Self>;
    /// Descendants matching `selector`, in document order.
    fn select_all(&self, selector: &Selector) -> Vec<Self>;

    /// True when the node carries a non-empty `class` attribute.
    fn has_class(&self) -> bool {
        self.attribute("class").is_some_and(|c| !c.trim().is_empty())
    }

    /// First descendant matching `selector`.
    fn select_first(&self, selector: &Selector) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }
}

impl<'a> Locatable for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn text_content(&self) -> String {
        visible_text(*self)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn child_elements(&self) -> Vec<Self> {
        (**self).children().filter_map(ElementRef::wrap).collect()
    }

    fn ancestor_elements(&self) -> Vec<Self> {
        (**self).ancestors().filter_map(ElementRef::wrap).collect()
    }

    fn following_siblings(&self) -> Vec<Self> {
        (**self)
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn select_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }
}

/// Parse one CSS selector, reporting the offending text on failure.
pub fn parse_selector(selector: &str) -> Result<Selector, RuleError> {
    Selector::parse(selector).map_err(|e| RuleError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Ordered list of selectors tried one after another.
#[derive(Debug, Clone)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Compile every selector; any invalid entry fails the whole list.
    pub fn parse<S: AsRef<str>>(selectors: &[S]) -> Result<Self, RuleError> {
        let selectors = selectors
            .iter()
            .map(|s| parse_selector(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// First element matched by the earliest selector that matches anything.
    pub fn first_in<L: Locatable>(&self, scope: L) -> Option<L> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select_first(selector))
    }

    /// First element matched by the earliest selector for which `accept`
    /// holds on some match.
    pub fn first_where<L, F>(&self, scope: L, mut accept: F) -> Option<L>
    where
        L: Locatable,
        F: FnMut(&L) -> bool,
    {
        self.selectors.iter().find_map(|selector| {
            scope
                .select_all(selector)
                .into_iter()
                .find(|el| accept(el))
        })
    }

    /// Every element matched by any selector, without duplicates.
    pub fn all_in<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let mut found: Vec<ElementRef<'a>> = Vec::new();
        for selector in &self.selectors {
            for el in scope.select(selector) {
                if !found.iter().any(|f| f.id() == el.id()) {
                    found.push(el);
                }
            }
        }
        found
    }
}
