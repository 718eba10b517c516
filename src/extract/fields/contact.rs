//! Clinic name and contact details.

use crate::document::ParsedDocument;
use crate::extract::dom::{Locatable, SelectorList};

/// Clinic name from the page title (`"<Name> - Book Doctors Online ..."`),
/// else the first heading that is not the site's own name.
pub fn extract_clinic_name(doc: &ParsedDocument, selectors: &SelectorList, site_name: &str) -> Option<String> {
    if let Some(name) = doc
        .title()
        .and_then(|t| t.split_once(" - ").map(|(name, _)| name.trim().to_string()))
        .filter(|n| !n.is_empty())
    {
        return Some(name);
    }

    let site = site_name.to_lowercase();
    selectors
        .first_where(doc.root(), |el| {
            let text = el.text_content();
            !text.is_empty() && (site.is_empty() || !text.to_lowercase().contains(&site))
        })
        .map(|el| el.text_content())
}

/// Phone number from a `tel:` link or a dedicated element.
pub fn extract_phone(doc: &ParsedDocument, selectors: &SelectorList) -> Option<String> {
    let el = selectors.first_in(doc.root())?;
    let raw = match el.attribute("href") {
        Some(href) if !href.trim().is_empty() => href
            .trim()
            .trim_start_matches("tel:")
            .to_string(),
        _ => el.text_content(),
    };
    let cleaned = clean_phone(&raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Keep digits, `+`, parentheses, spaces and dashes.
pub fn clean_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | ' ' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Email from a `mailto:` link or a dedicated element.
pub fn extract_email(doc: &ParsedDocument, selectors: &SelectorList) -> Option<String> {
    let el = selectors.first_in(doc.root())?;
    let raw = match el.attribute("href") {
        Some(href) if !href.trim().is_empty() => {
            let address = href.trim().trim_start_matches("mailto:");
            address.split('?').next().unwrap_or(address).to_string()
        }
        _ => el.text_content(),
    };
    let email = raw.trim().to_string();
    (!email.is_empty()).then_some(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str, title: &str) -> ParsedDocument {
        ParsedDocument::parse(
            "https://www.hotdoc.com.au/medical-centres/x",
            &format!("<html><head><title>{}</title></head><body>{}</body></html>", title, body),
        )
    }

    #[test]
    fn test_name_from_title() {
        let d = doc("<h1>Ignored</h1>", "Armadale Family Clinic - Book Doctors Online with HotDoc");
        let sel = SelectorList::parse(&["h1"]).unwrap();
        assert_eq!(
            extract_clinic_name(&d, &sel, "HotDoc").as_deref(),
            Some("Armadale Family Clinic")
        );
    }

    #[test]
    fn test_name_heading_rejects_site_name() {
        let d = doc(
            r#"<h1 class="title">HotDoc</h1><div class="clinic-title"><h1>Fitzroy Medical</h1></div>"#,
            "Clinic page",
        );
        let sel = SelectorList::parse(&["h1.title", ".clinic-title h1"]).unwrap();
        assert_eq!(
            extract_clinic_name(&d, &sel, "HotDoc").as_deref(),
            Some("Fitzroy Medical")
        );
    }

    #[test]
    fn test_phone_and_email_links() {
        let d = doc(
            r#"<a href="tel:+61 3 9500 1234">Call us</a><a href="mailto:hello@clinic.test?subject=Hi">Email</a>"#,
            "x",
        );
        let phone = SelectorList::parse(&["a[href^=\"tel:\"]", ".phone-number"]).unwrap();
        let email = SelectorList::parse(&["a[href^=\"mailto:\"]"]).unwrap();
        assert_eq!(extract_phone(&d, &phone).as_deref(), Some("+61 3 9500 1234"));
        assert_eq!(extract_email(&d, &email).as_deref(), Some("hello@clinic.test"));
    }

    #[test]
    fn test_phone_from_text_element() {
        let d = doc(r#"<span class="phone-number">Ph: (03) 9500-1234</span>"#, "x");
        let phone = SelectorList::parse(&[".phone-number"]).unwrap();
        assert_eq!(extract_phone(&d, &phone).as_deref(), Some("(03) 9500-1234"));
    }

    #[test]
    fn test_clean_phone() {
        assert_eq!(clean_phone("tel. 1300 HOTDOC"), "1300");
    }
}
