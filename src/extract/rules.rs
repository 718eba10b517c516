//! Extraction rule table.
//!
//! Every selector, keyword list and threshold the extractors use lives
//! here. The defaults target HotDoc's markup; a `[rules]` table in the
//! config file can replace any of them. Bump `version` when the defaults
//! change in a way that alters output.

use serde::{Deserialize, Serialize};

/// Current version of the built-in rule table.
pub const RULES_VERSION: u32 = 3;

/// One way of locating candidate blocks on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    /// Elements matching a CSS selector.
    Css { selector: String },
    /// Elements matching a CSS selector whose text mentions a keyword.
    CssContaining {
        selector: String,
        keywords: Vec<String>,
    },
    /// Links whose href contains every fragment; the candidate is the
    /// nearest classed ancestor of the link.
    LinkHref { contains: Vec<String> },
    /// Regex over the page text; each match is a text candidate.
    TextPattern { pattern: String },
}

impl Strategy {
    pub fn css(selector: &str) -> Self {
        Self::Css {
            selector: selector.to_string(),
        }
    }

    /// Short label for log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Css { selector } => format!("css `{}`", selector),
            Self::CssContaining { selector, .. } => format!("css+text `{}`", selector),
            Self::LinkHref { contains } => format!("link href {:?}", contains),
            Self::TextPattern { pattern } => format!("text /{}/", pattern),
        }
    }
}

/// Selector lists used on a practitioner's own profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRules {
    pub bio_selectors: Vec<String>,
    pub language_selectors: Vec<String>,
    pub interest_selectors: Vec<String>,
    pub consultation_selectors: Vec<String>,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            bio_selectors: strings(&[
                ".doctor-bio",
                ".biography",
                ".description",
                ".about-doctor",
                ".profile-description",
            ]),
            language_selectors: strings(&[
                ".languages li",
                ".spoken-languages li",
                ".language-list li",
            ]),
            interest_selectors: strings(&[
                ".interests li",
                ".special-interests li",
                ".clinical-interests li",
            ]),
            consultation_selectors: strings(&[
                ".consultation-types li",
                ".appointment-types li",
                ".service-types li",
            ]),
        }
    }
}

/// The full, replaceable rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    pub version: u32,

    /// Cascade for practitioner blocks on a clinic page.
    pub practitioner_blocks: Vec<Strategy>,

    pub name_selectors: Vec<String>,
    /// Tokens stripped from the front of a name.
    pub honorifics: Vec<String>,
    /// Honorifics that become the practitioner's title.
    pub professional_titles: Vec<String>,
    pub default_title: String,

    /// A paragraph mentioning one of these is the credentials line.
    pub credential_triggers: Vec<String>,
    pub specialty_keywords: Vec<String>,
    pub qualification_abbreviations: Vec<String>,
    pub language_triggers: Vec<String>,

    pub bio_selectors: Vec<String>,
    /// Minimum characters for a paragraph to count as a bio.
    pub bio_min_len: usize,

    pub rating_selectors: Vec<String>,
    pub review_selectors: Vec<String>,

    pub interest_heading_tags: Vec<String>,
    pub interest_headings: Vec<String>,

    pub clinic_name_selectors: Vec<String>,
    pub address_selectors: Vec<String>,
    pub phone_selectors: Vec<String>,
    pub email_selectors: Vec<String>,
    pub service_keywords: Vec<String>,
    pub bulk_billing_keywords: Vec<String>,

    pub profile: ProfileRules,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            version: RULES_VERSION,
            practitioner_blocks: default_practitioner_blocks(),
            name_selectors: strings(&[
                ".DoctorAvailabilityRow-doctorLink",
                ".DoctorAvailabilityRow-profileTitle a",
                ".DoctorAvailabilityRow-profileTitle",
                "h2 a",
                ".doctor-name",
                ".practitioner-name",
                ".provider-name",
                "h3",
                "h4",
                "h5",
                ".name",
                "[data-testid=\"doctor-name\"]",
            ]),
            honorifics: strings(&[
                "dr",
                "doctor",
                "prof",
                "professor",
                "mr",
                "ms",
                "mrs",
                "miss",
            ]),
            professional_titles: strings(&["dr", "doctor", "prof", "professor"]),
            default_title: "Dr.".to_string(),
            credential_triggers: strings(&[
                "practitioner",
                "doctor",
                "specialist",
                "fracgp",
                "mbbs",
            ]),
            specialty_keywords: strings(&["practitioner", "specialist", "surgeon", "consultant"]),
            qualification_abbreviations: strings(&[
                "MBBS", "MD", "FRACGP", "FRACS", "PhD", "BMBS", "BMedSci",
            ]),
            language_triggers: strings(&["speaks", "languages"]),
            bio_selectors: strings(&[".server-html p", ".bio p", ".description p", "p"]),
            bio_min_len: 100,
            rating_selectors: strings(&[".rating", ".stars", "[data-testid=\"rating\"]"]),
            review_selectors: strings(&[
                ".review-count",
                ".reviews",
                "[data-testid=\"review-count\"]",
            ]),
            interest_heading_tags: strings(&["h2", "h3", "h4", "h5"]),
            interest_headings: strings(&[
                "areas of interest",
                "special interests",
                "clinical interests",
            ]),
            clinic_name_selectors: strings(&[
                "h1.clinic-name",
                "h1[data-testid=\"clinic-name\"]",
                ".clinic-header h1",
                "h1.title",
                ".clinic-title h1",
                "h1",
            ]),
            address_selectors: strings(&[
                ".clinic-address",
                "[data-testid=\"clinic-address\"]",
                ".address-block",
                ".location-info .address",
                ".ClinicPage-Address",
                ".contact-address",
            ]),
            phone_selectors: strings(&[
                "a[href^=\"tel:\"]",
                ".phone-number",
                ".contact-phone",
                "[data-testid=\"phone\"]",
                ".ClinicPage-Phone",
            ]),
            email_selectors: strings(&["a[href^=\"mailto:\"]", ".email-address", ".contact-email"]),
            service_keywords: strings(&[
                "general practice",
                "family medicine",
                "bulk billing",
                "vaccination",
                "health check",
                "women's health",
                "men's health",
                "child health",
                "chronic disease",
                "mental health",
                "skin checks",
                "travel medicine",
                "sports medicine",
                "pathology",
                "radiology",
                "physiotherapy",
            ]),
            bulk_billing_keywords: strings(&["bulk bill", "bulk billing", "medicare"]),
            profile: ProfileRules::default(),
        }
    }
}

fn default_practitioner_blocks() -> Vec<Strategy> {
    let doctor_words = strings(&["doctor", "dr ", "practitioner", "gp", "specialist"]);
    vec![
        Strategy::css(".DoctorAvailabilityRow"),
        Strategy::css(".doctor-card"),
        Strategy::css(".practitioner-card"),
        Strategy::css(".provider-card"),
        Strategy::css(".doctor-profile"),
        Strategy::css("[data-testid=\"doctor-card\"]"),
        Strategy::css(".practitioner-list .practitioner"),
        Strategy::css(".doctor-item"),
        Strategy::CssContaining {
            selector: "[data-testid*=\"doctor\"], [data-testid*=\"practitioner\"]".to_string(),
            keywords: doctor_words.clone(),
        },
        Strategy::CssContaining {
            selector: "[class*=\"doctor\"], [class*=\"practitioner\"], [class*=\"provider\"]"
                .to_string(),
            keywords: doctor_words,
        },
        Strategy::LinkHref {
            contains: strings(&["/doctors/", "/medical-centres/"]),
        },
        Strategy::TextPattern {
            pattern: r"Dr\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)".to_string(),
        },
        Strategy::TextPattern {
            pattern: r"([A-Z][a-z]+\s+[A-Z][a-z]+)\s*,\s*(?:GP|Doctor|Practitioner|MBBS)"
                .to_string(),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
