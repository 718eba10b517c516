//! Raw extractor output to canonical practitioner records.

use std::sync::Arc;

use crate::models::{ClinicRecord, Gender, PractitionerRecord};
use crate::utils::text::{collapse_whitespace, dedup_preserving};

/// Fields pulled from one candidate block, before any clean-up.
#[derive(Debug, Clone, Default)]
pub struct RawPractitioner {
    pub raw_name: String,
    pub cleaned_name: String,
    pub title: String,
    pub specialties: Vec<String>,
    pub qualifications: Vec<String>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub gender: Gender,
    pub bio: Option<String>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub profile_url: Option<String>,
}

/// Build the canonical record, or `None` when the block has no usable name.
pub fn normalize(raw: RawPractitioner, clinic: Arc<ClinicRecord>) -> Option<PractitionerRecord> {
    let cleaned_name = collapse_whitespace(&raw.cleaned_name);
    if cleaned_name.is_empty() {
        return None;
    }

    Some(PractitionerRecord {
        raw_name: collapse_whitespace(&raw.raw_name),
        cleaned_name,
        title: raw.title,
        specialties: dedup_preserving(raw.specialties),
        qualifications: dedup_preserving(raw.qualifications),
        languages: dedup_preserving(raw.languages),
        interests: dedup_preserving(raw.interests),
        consultation_types: Vec::new(),
        gender: raw.gender,
        bio: raw.bio.filter(|b| !b.trim().is_empty()),
        rating: raw.rating.filter(|r| (0.0..=5.0).contains(r)),
        review_count: raw.review_count,
        profile_url: raw.profile_url,
        clinic,
    })
}
