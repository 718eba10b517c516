//! Turning parsed pages into records.
//!
//! [`Extractor`] is the compiled form of an [`ExtractionRules`] table. It is
//! built once per run; compiling validates every selector and pattern so a
//! bad override is reported before any page is fetched.

pub mod cascade;
pub mod clinic;
pub mod dom;
pub mod fields;
pub mod practitioner;
pub mod profile;
pub mod rules;

use scraper::Selector;

pub use cascade::{Candidate, Cascade, Located};
pub use dom::{Locatable, SelectorList};
pub use rules::{ExtractionRules, ProfileRules, Strategy, RULES_VERSION};

use crate::error::RuleError;
use dom::parse_selector;
use fields::{CredentialRules, Honorifics, InterestRules};

struct ProfileSelectors {
    bio: SelectorList,
    languages: SelectorList,
    interests: SelectorList,
    consultation_types: SelectorList,
}

/// Compiled extraction rules.
pub struct Extractor {
    rules: ExtractionRules,
    site_name: String,
    cascade: Cascade,
    paragraph: Selector,
    link: Selector,
    names: SelectorList,
    honorifics: Honorifics,
    credentials: CredentialRules,
    bio: SelectorList,
    rating: SelectorList,
    reviews: SelectorList,
    interests: InterestRules,
    clinic_name: SelectorList,
    address: SelectorList,
    phone: SelectorList,
    email: SelectorList,
    profile: ProfileSelectors,
}

impl Extractor {
    /// Compile `rules`. `site_name` is rejected as a clinic name.
    pub fn new(rules: ExtractionRules, site_name: &str) -> Result<Self, RuleError> {
        let profile = ProfileSelectors {
            bio: SelectorList::parse(&rules.profile.bio_selectors)?,
            languages: SelectorList::parse(&rules.profile.language_selectors)?,
            interests: SelectorList::parse(&rules.profile.interest_selectors)?,
            consultation_types: SelectorList::parse(&rules.profile.consultation_selectors)?,
        };

        Ok(Self {
            cascade: Cascade::compile(&rules.practitioner_blocks)?,
            paragraph: parse_selector("p")?,
            link: parse_selector("a[href]")?,
            names: SelectorList::parse(&rules.name_selectors)?,
            honorifics: Honorifics::new(
                &rules.honorifics,
                &rules.professional_titles,
                &rules.default_title,
            ),
            credentials: CredentialRules::new(
                &rules.credential_triggers,
                &rules.specialty_keywords,
                &rules.qualification_abbreviations,
            ),
            bio: SelectorList::parse(&rules.bio_selectors)?,
            rating: SelectorList::parse(&rules.rating_selectors)?,
            reviews: SelectorList::parse(&rules.review_selectors)?,
            interests: InterestRules::new(&rules.interest_heading_tags, &rules.interest_headings)?,
            clinic_name: SelectorList::parse(&rules.clinic_name_selectors)?,
            address: SelectorList::parse(&rules.address_selectors)?,
            phone: SelectorList::parse(&rules.phone_selectors)?,
            email: SelectorList::parse(&rules.email_selectors)?,
            profile,
            site_name: site_name.to_string(),
            rules,
        })
    }

    /// Extractor over the built-in HotDoc rules.
    pub fn hotdoc() -> Result<Self, RuleError> {
        Self::new(ExtractionRules::default(), "HotDoc")
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }
}
