//! Practitioner (doctor) records.

use std::fmt;
use std::sync::Arc;

use super::ClinicRecord;
use crate::utils::text::extend_unique;

/// Practitioner gender as stated on the credentials line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a single credentials token (`"male"`, `"Female"`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("male") {
            Some(Self::Male)
        } else if token.eq_ignore_ascii_case("female") {
            Some(Self::Female)
        } else {
            None
        }
    }

    /// Display label, `None` when unknown.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Male => Some("Male"),
            Self::Female => Some("Female"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Unknown"))
    }
}

/// A practitioner listed on a clinic page.
///
/// Records are values: enriching one from a profile page produces a new
/// record via [`PractitionerRecord::with_profile`].
#[derive(Debug, Clone, PartialEq)]
pub struct PractitionerRecord {
    pub raw_name: String,
    pub cleaned_name: String,
    pub title: String,
    pub specialties: Vec<String>,
    pub qualifications: Vec<String>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub consultation_types: Vec<String>,
    pub gender: Gender,
    pub bio: Option<String>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub profile_url: Option<String>,
    pub clinic: Arc<ClinicRecord>,
}

impl PractitionerRecord {
    /// Merge details read from the practitioner's own profile page.
    ///
    /// The listing's bio wins when present; list fields are extended without
    /// introducing duplicates.
    pub fn with_profile(self, details: ProfileDetails) -> Self {
        let mut merged = self;
        if merged.bio.is_none() {
            merged.bio = details.bio;
        }
        extend_unique(&mut merged.languages, details.languages);
        extend_unique(&mut merged.interests, details.interests);
        extend_unique(&mut merged.consultation_types, details.consultation_types);
        merged
    }
}

/// Fields read from a practitioner profile page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDetails {
    pub bio: Option<String>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub consultation_types: Vec<String>,
}

impl ProfileDetails {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.languages.is_empty()
            && self.interests.is_empty()
            && self.consultation_types.is_empty()
    }
}
