//! Service keywords and bulk-billing detection over page text.

use crate::utils::text::{push_unique, title_case};

/// Title-cased service keywords found in `page_text`, in keyword order.
pub fn detect_services(page_text: &str, keywords: &[String]) -> Vec<String> {
    let lower = page_text.to_lowercase();
    let mut services = Vec::new();
    for keyword in keywords {
        if lower.contains(&keyword.to_lowercase()) {
            push_unique(&mut services, title_case(keyword));
        }
    }
    services
}

pub fn detect_bulk_billing(page_text: &str, keywords: &[String]) -> bool {
    let lower = page_text.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_services_in_keyword_order() {
        let text = "We offer Skin Checks, vaccination and MENTAL HEALTH care.";
        let found = detect_services(text, &words(&["vaccination", "mental health", "skin checks", "pathology"]));
        assert_eq!(found, vec!["Vaccination", "Mental Health", "Skin Checks"]);
    }

    #[test]
    fn test_bulk_billing() {
        let keywords = words(&["bulk bill", "bulk billing", "medicare"]);
        assert!(detect_bulk_billing("Medicare card required", &keywords));
        assert!(!detect_bulk_billing("Private fees apply", &keywords));
    }
}
