//! Clinic address and its suburb/state/postcode components.
//!
//! Three sources are consulted in order: a structured address element,
//! the page's meta description, then the clinic URL itself. The first
//! source that yields anything is used as a whole.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::ParsedDocument;
use crate::extract::dom::{Locatable, SelectorList};
use crate::utils::text::{collapse_whitespace, title_case};

static STATE_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\b([A-Z]{2,3})\s+(\d{4})$").expect("valid state regex")
});
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][A-Za-z']*(?:\s+[A-Z][A-Za-z']*)*),\s*([A-Z]{2,3})\s*(\d{4})")
        .expect("valid description regex")
});
static URL_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/medical-centres/([^/]+)-([A-Z]{2,3})-(\d{4})/[^/]+").expect("valid url regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub line: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

impl AddressParts {
    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.suburb.is_none() && self.state.is_none() && self.postcode.is_none()
    }

    fn from_components(suburb: String, state: &str, postcode: &str) -> Self {
        Self {
            line: Some(format!("{}, {} {}", suburb, state, postcode)),
            suburb: Some(suburb),
            state: Some(state.to_string()),
            postcode: Some(postcode.to_string()),
        }
    }
}

/// Resolve the address of the clinic page `doc`.
pub fn extract_address(doc: &ParsedDocument, selectors: &SelectorList) -> AddressParts {
    let structured = selectors
        .first_where(doc.root(), |el| !el.text_content().is_empty())
        .map(|el| from_structured(&el.text_content()))
        .unwrap_or_default();
    if !structured.is_empty() {
        return structured;
    }

    let described = doc
        .meta_content("description")
        .map(|d| from_description(&d))
        .unwrap_or_default();
    if !described.is_empty() {
        return described;
    }

    from_url(&doc.url)
}

/// Components of a free-form address such as
/// `Shop 2, 1 High St, Armadale, VIC 3143, Australia`.
pub fn from_structured(text: &str) -> AddressParts {
    let line = collapse_whitespace(text);
    if line.is_empty() {
        return AddressParts::default();
    }

    let segments: Vec<&str> = line.split(',').map(str::trim).collect();
    let mut parts = AddressParts {
        line: Some(line.clone()),
        ..Default::default()
    };

    for (i, segment) in segments.iter().enumerate() {
        let Some(caps) = STATE_POSTCODE.captures(segment) else {
            continue;
        };
        parts.state = Some(caps[2].to_string());
        parts.postcode = Some(caps[3].to_string());
        let inline = caps[1].trim();
        parts.suburb = if !inline.is_empty() {
            Some(inline.to_string())
        } else if i > 0 {
            Some(segments[i - 1].to_string()).filter(|s| !s.is_empty())
        } else {
            None
        };
        break;
    }
    parts
}

/// `Armadale, VIC 3143` inside a meta description.
pub fn from_description(text: &str) -> AddressParts {
    DESCRIPTION
        .captures(text)
        .map(|caps| AddressParts::from_components(caps[1].trim().to_string(), &caps[2], &caps[3]))
        .unwrap_or_default()
}

/// `/medical-centres/armadale-VIC-3143/<clinic>` in the clinic URL.
pub fn from_url(url: &str) -> AddressParts {
    URL_LOCATION
        .captures(url)
        .map(|caps| {
            let suburb = title_case(&caps[1].replace(['-', '_'], " "));
            AddressParts::from_components(suburb, &caps[2], &caps[3])
        })
        .unwrap_or_default()
}
