//! The credentials line: specialties, gender and qualifications.
//!
//! HotDoc shows one comma-separated paragraph per practitioner, e.g.
//! `General Practitioner, Female, FRACGP, MBBS, BMedSci`.

use scraper::Selector;

use crate::extract::dom::Locatable;
use crate::models::Gender;
use crate::utils::text::push_unique;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub specialties: Vec<String>,
    pub qualifications: Vec<String>,
    pub gender: Gender,
}

/// Keyword tables for classifying credential tokens.
#[derive(Debug, Clone)]
pub struct CredentialRules {
    triggers: Vec<String>,
    specialty_keywords: Vec<String>,
    abbreviations: Vec<String>,
}

impl CredentialRules {
    pub fn new(triggers: &[String], specialty_keywords: &[String], abbreviations: &[String]) -> Self {
        Self {
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            specialty_keywords: specialty_keywords.iter().map(|k| k.to_lowercase()).collect(),
            abbreviations: abbreviations.to_vec(),
        }
    }

    /// First paragraph whose text mentions a trigger word.
    pub fn find_line<L: Locatable>(&self, candidate: L, paragraph: &Selector) -> Option<String> {
        candidate
            .select_all(paragraph)
            .into_iter()
            .map(|p| p.text_content())
            .find(|text| {
                let lower = text.to_lowercase();
                self.triggers.iter().any(|t| lower.contains(t.as_str()))
            })
    }

    /// Classify each comma token of `line`.
    pub fn split(&self, line: &str) -> Credentials {
        let mut out = Credentials::default();
        let mut gender_seen = false;

        for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(gender) = Gender::from_token(token) {
                if !gender_seen {
                    out.gender = gender;
                    gender_seen = true;
                }
                continue;
            }

            let lower = token.to_lowercase();
            if self.specialty_keywords.iter().any(|k| lower.contains(k.as_str())) {
                push_unique(&mut out.specialties, token.to_string());
            } else if self.is_qualification(token) {
                push_unique(&mut out.qualifications, token.to_string());
            }
        }
        out
    }

    fn is_qualification(&self, token: &str) -> bool {
        let leading_caps = token
            .chars()
            .take_while(|c| c.is_ascii_uppercase())
            .count();
        leading_caps >= 2
            || self
                .abbreviations
                .iter()
                .any(|a| a.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::dom::parse_selector;
    use crate::extract::rules::ExtractionRules;
    use scraper::Html;

    fn rules() -> CredentialRules {
        let r = ExtractionRules::default();
        CredentialRules::new(
            &r.credential_triggers,
            &r.specialty_keywords,
            &r.qualification_abbreviations,
        )
    }

    #[test]
    fn test_hotdoc_line() {
        let c = rules().split("General Practitioner, Female, FRACGP, MBBS, BMedSci");
        assert_eq!(c.specialties, vec!["General Practitioner"]);
        assert_eq!(c.gender, Gender::Female);
        assert_eq!(c.qualifications, vec!["FRACGP", "MBBS", "BMedSci"]);
    }

    #[test]
    fn test_unclassified_tokens_dropped_and_dups_removed() {
        let c = rules().split("Consultant Surgeon, male, Melbourne, MBBS, MBBS, phd, Female");
        assert_eq!(c.specialties, vec!["Consultant Surgeon"]);
        assert_eq!(c.gender, Gender::Male);
        assert_eq!(c.qualifications, vec!["MBBS", "phd"]);
    }

    #[test]
    fn test_find_line_picks_first_trigger_paragraph() {
        let html = Html::parse_fragment(
            r#"<div><p>Next available today</p><p>General Practitioner, Male, MBBS</p>
               <p>Specialist interests</p></div>"#,
        );
        let p = parse_selector("p").unwrap();
        let line = rules().find_line(html.root_element(), &p);
        assert_eq!(line.as_deref(), Some("General Practitioner, Male, MBBS"));
    }
}
