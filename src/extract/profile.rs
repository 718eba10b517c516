//! A practitioner's own profile page.

use scraper::ElementRef;

use super::dom::{Locatable, SelectorList};
use super::Extractor;
use crate::document::ParsedDocument;
use crate::models::ProfileDetails;
use crate::utils::text::push_unique;

impl Extractor {
    /// Details shown only on the profile page.
    pub fn profile(&self, doc: &ParsedDocument) -> ProfileDetails {
        let root = doc.root();
        let selectors = &self.profile;

        let mut interests = texts(root, &selectors.interests);
        if interests.is_empty() {
            interests = self.interests.extract(root);
        }

        ProfileDetails {
            bio: selectors
                .bio
                .first_where(root, |el| !el.text_content().is_empty())
                .map(|el| el.text_content()),
            languages: texts(root, &selectors.languages),
            interests,
            consultation_types: texts(root, &selectors.consultation_types),
        }
    }
}

fn texts(root: ElementRef<'_>, selectors: &SelectorList) -> Vec<String> {
    let mut out = Vec::new();
    for el in selectors.all_in(root) {
        let text = el.text_content();
        if !text.is_empty() {
            push_unique(&mut out, text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_page() {
        let doc = ParsedDocument::parse(
            "https://www.hotdoc.com.au/doctors/jane-smith",
            r#"<html><body>
               <div class="doctor-bio">Jane trained in Melbourne.</div>
               <ul class="languages"><li>English</li><li>Greek</li><li>English</li></ul>
               <ul class="appointment-types"><li>Telehealth</li></ul>
               <ul class="consultation-types"><li>Standard consult</li></ul>
               <h3>Clinical interests</h3><ul><li>Diabetes</li></ul>
               </body></html>"#,
        );
        let details = Extractor::hotdoc().unwrap().profile(&doc);
        assert_eq!(details.bio.as_deref(), Some("Jane trained in Melbourne."));
        assert_eq!(details.languages, vec!["English", "Greek"]);
        assert_eq!(details.consultation_types, vec!["Standard consult", "Telehealth"]);
        assert_eq!(details.interests, vec!["Diabetes"]);
    }

    #[test]
    fn test_empty_profile() {
        let doc = ParsedDocument::parse("https://example.test/p", "<html><body></body></html>");
        assert!(Extractor::hotdoc().unwrap().profile(&doc).is_empty());
    }
}
