//! Ordered locator strategies for finding practitioner blocks.
//!
//! Strategies are tried in order and the first one that yields anything
//! wins. Results are never merged across strategies, so a markup change on
//! the site is absorbed by putting a new strategy ahead of the old ones.

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;

use super::dom::{parse_selector, Locatable};
use super::rules::Strategy;
use crate::document::ParsedDocument;
use crate::error::RuleError;
use crate::utils::text::{char_len, collapse_whitespace};

/// Text fragments this short are never treated as candidates.
const MIN_FRAGMENT_CHARS: usize = 4;

/// One practitioner's block: a markup node or a bare text fragment.
#[derive(Debug, Clone)]
pub enum Candidate<'a> {
    Element(ElementRef<'a>),
    Text(String),
}

impl<'a> Candidate<'a> {
    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self {
            Candidate::Element(el) => Some(*el),
            Candidate::Text(_) => None,
        }
    }
}

/// Outcome of running the cascade over one document.
#[derive(Debug)]
pub struct Located<'a> {
    /// Index of the strategy that produced the candidates.
    pub strategy: Option<usize>,
    pub candidates: Vec<Candidate<'a>>,
}

impl Located<'_> {
    fn empty() -> Self {
        Self {
            strategy: None,
            candidates: Vec::new(),
        }
    }
}

enum Compiled {
    Css(Selector),
    CssContaining {
        selector: Selector,
        keywords: Vec<String>,
    },
    LinkHref {
        contains: Vec<String>,
    },
    TextPattern(Regex),
}

/// A compiled, ready-to-run strategy list.
pub struct Cascade {
    strategies: Vec<(Strategy, Compiled)>,
    link: Selector,
}

impl Cascade {
    /// Compile every strategy; an invalid selector or pattern fails the
    /// whole cascade.
    pub fn compile(strategies: &[Strategy]) -> Result<Self, RuleError> {
        let mut compiled = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            let entry = match strategy {
                Strategy::Css { selector } => Compiled::Css(parse_selector(selector)?),
                Strategy::CssContaining { selector, keywords } => Compiled::CssContaining {
                    selector: parse_selector(selector)?,
                    keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
                },
                Strategy::LinkHref { contains } => Compiled::LinkHref {
                    contains: contains.clone(),
                },
                Strategy::TextPattern { pattern } => {
                    Compiled::TextPattern(Regex::new(pattern).map_err(|source| {
                        RuleError::Pattern {
                            pattern: pattern.clone(),
                            source,
                        }
                    })?)
                }
            };
            compiled.push((strategy.clone(), entry));
        }

        Ok(Self {
            strategies: compiled,
            link: parse_selector("a[href]")?,
        })
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run the strategies in order against `doc`.
    pub fn locate<'a>(&self, doc: &'a ParsedDocument) -> Located<'a> {
        let root = doc.root();
        let mut page_text: Option<String> = None;

        for (index, (strategy, compiled)) in self.strategies.iter().enumerate() {
            let candidates: Vec<Candidate<'a>> = match compiled {
                Compiled::Css(selector) => root
                    .select_all(selector)
                    .into_iter()
                    .map(Candidate::Element)
                    .collect(),
                Compiled::CssContaining { selector, keywords } => root
                    .select_all(selector)
                    .into_iter()
                    .filter(|el| {
                        let text = el.text_content().to_lowercase();
                        keywords.iter().any(|k| text.contains(k.as_str()))
                    })
                    .map(Candidate::Element)
                    .collect(),
                Compiled::LinkHref { contains } => self
                    .link_containers(root, contains)
                    .into_iter()
                    .map(Candidate::Element)
                    .collect(),
                Compiled::TextPattern(pattern) => {
                    let text = page_text.get_or_insert_with(|| doc.page_text());
                    text_fragments(pattern, text)
                        .into_iter()
                        .map(Candidate::Text)
                        .collect()
                }
            };

            if !candidates.is_empty() {
                debug!(
                    "{} candidates via {} on {}",
                    candidates.len(),
                    strategy.describe(),
                    doc.url
                );
                return Located {
                    strategy: Some(index),
                    candidates,
                };
            }
        }

        debug!("No candidates on {}", doc.url);
        Located::empty()
    }

    /// Nearest classed ancestor of every matching link, once per node.
    fn link_containers<'a>(&self, root: ElementRef<'a>, contains: &[String]) -> Vec<ElementRef<'a>> {
        let mut found: Vec<ElementRef<'a>> = Vec::new();
        for link in root.select_all(&self.link) {
            let Some(href) = link.attribute("href") else {
                continue;
            };
            if !contains.iter().all(|fragment| href.contains(fragment.as_str())) {
                continue;
            }
            let container = link
                .ancestor_elements()
                .into_iter()
                .find(|a| a.has_class())
                .unwrap_or(link);
            if !found.iter().any(|f| f.id() == container.id()) {
                found.push(container);
            }
        }
        found
    }
}

fn text_fragments(pattern: &Regex, text: &str) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
            continue;
        };
        let fragment = collapse_whitespace(m.as_str());
        if char_len(&fragment) < MIN_FRAGMENT_CHARS || fragments.contains(&fragment) {
            continue;
        }
        fragments.push(fragment);
    }
    fragments
}
