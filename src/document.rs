//! Parsed HTML pages.

use scraper::{ElementRef, Html, Selector};

use crate::utils::text::collapse_whitespace;

/// Elements whose text never counts as page content.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A fetched page: its URL and parsed markup.
///
/// `scraper::Html` is not `Send`, so a document should be consumed before
/// the next fetch is awaited.
pub struct ParsedDocument {
    pub url: String,
    pub html: Html,
}

impl ParsedDocument {
    /// Parse raw markup fetched from `url`.
    pub fn parse(url: impl Into<String>, markup: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(markup),
        }
    }

    /// Root `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Visible text of the whole page, whitespace collapsed, scripts and
    /// styles excluded.
    pub fn page_text(&self) -> String {
        visible_text(self.root())
    }

    /// Text of the `<title>` element.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|t| collapse_whitespace(&t.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    }

    /// `content` attribute of `<meta name="...">`.
    pub fn meta_content(&self, name: &str) -> Option<String> {
        let selector = Selector::parse("meta[name][content]").ok()?;
        self.html
            .select(&selector)
            .find(|m| {
                m.value()
                    .attr("name")
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .and_then(|m| m.value().attr("content"))
            .map(collapse_whitespace)
            .filter(|c| !c.is_empty())
    }
}

/// Text under `element`, skipping script-like subtrees.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    collapse_whitespace(&parts.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if NON_CONTENT_TAGS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(child_element, parts);
        } else if let Some(text) = child.value().as_text() {
            parts.push(&**text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <title>Armadale Family Clinic - Book Doctors Online with HotDoc</title>
        <meta name="Description" content="Book at Armadale, VIC 3143 today">
        <script>var doctors = "not content";</script>
        </head><body><h1>Armadale   Family
        Clinic</h1><style>.x{}</style><p>Bulk billing available</p></body></html>"#;

    #[test]
    fn test_page_text_skips_scripts() {
        let doc = ParsedDocument::parse("https://example.test", PAGE);
        let text = doc.page_text();
        assert!(text.contains("Armadale Family Clinic"));
        assert!(text.contains("Bulk billing available"));
        assert!(!text.contains("not content"));
        assert!(!text.contains(".x{}"));
    }

    #[test]
    fn test_title_and_meta() {
        let doc = ParsedDocument::parse("https://example.test", PAGE);
        assert_eq!(
            doc.title().as_deref(),
            Some("Armadale Family Clinic - Book Doctors Online with HotDoc")
        );
        assert_eq!(
            doc.meta_content("description").as_deref(),
            Some("Book at Armadale, VIC 3143 today")
        );
        assert_eq!(doc.meta_content("keywords"), None);
    }
}
