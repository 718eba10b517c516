//! Clinic-grouped JSON with the `"Not available"` placeholder.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::{create, NOT_AVAILABLE};
use crate::error::ExportError;
use crate::models::{ClinicRecord, PractitionerRecord};

/// A value or the placeholder string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrMissing<T> {
    Present(T),
    Missing(&'static str),
}

impl<T> OrMissing<T> {
    fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Present(v),
            None => Self::Missing(NOT_AVAILABLE),
        }
    }
}

fn text(value: Option<&str>) -> OrMissing<String> {
    OrMissing::from_option(
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from),
    )
}

fn list(values: &[String]) -> OrMissing<Vec<String>> {
    OrMissing::from_option((!values.is_empty()).then(|| values.to_vec()))
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupedDoctor {
    pub name: String,
    pub title: String,
    pub gender: OrMissing<String>,
    pub specialties: OrMissing<Vec<String>>,
    pub qualifications: OrMissing<Vec<String>>,
    pub languages: OrMissing<Vec<String>>,
    pub interests: OrMissing<Vec<String>>,
    pub consultation_types: OrMissing<Vec<String>>,
    pub bio: OrMissing<String>,
    pub rating: OrMissing<f32>,
    pub review_count: OrMissing<u32>,
    pub profile_url: OrMissing<String>,
}

impl From<&PractitionerRecord> for GroupedDoctor {
    fn from(record: &PractitionerRecord) -> Self {
        Self {
            name: record.cleaned_name.clone(),
            title: record.title.clone(),
            gender: text(record.gender.label()),
            specialties: list(&record.specialties),
            qualifications: list(&record.qualifications),
            languages: list(&record.languages),
            interests: list(&record.interests),
            consultation_types: list(&record.consultation_types),
            bio: text(record.bio.as_deref()),
            rating: OrMissing::from_option(record.rating),
            review_count: OrMissing::from_option(record.review_count),
            profile_url: text(record.profile_url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupedClinic {
    pub clinic_name: OrMissing<String>,
    pub address: OrMissing<String>,
    pub suburb: OrMissing<String>,
    pub state: OrMissing<String>,
    pub postcode: OrMissing<String>,
    pub phone: OrMissing<String>,
    pub email: OrMissing<String>,
    pub services: OrMissing<Vec<String>>,
    pub bulk_billing: bool,
    pub clinic_url: String,
    pub doctors: Vec<GroupedDoctor>,
}

impl GroupedClinic {
    fn new(clinic: &ClinicRecord) -> Self {
        Self {
            clinic_name: text(clinic.name.as_deref()),
            address: text(clinic.address_line.as_deref()),
            suburb: text(clinic.suburb.as_deref()),
            state: text(clinic.state.as_deref()),
            postcode: text(clinic.postcode.as_deref()),
            phone: text(clinic.phone.as_deref()),
            email: text(clinic.email.as_deref()),
            services: list(&clinic.services),
            bulk_billing: clinic.bulk_billing,
            clinic_url: clinic.source_url.clone(),
            doctors: Vec::new(),
        }
    }
}

/// Group records by clinic URL, clinics in first-seen order.
pub fn group_by_clinic(records: &[PractitionerRecord]) -> Vec<GroupedClinic> {
    let mut clinics: Vec<GroupedClinic> = Vec::new();
    for record in records {
        let url = record.clinic.source_url.as_str();
        let idx = match clinics.iter().position(|c| c.clinic_url == url) {
            Some(idx) => idx,
            None => {
                clinics.push(GroupedClinic::new(&record.clinic));
                clinics.len() - 1
            }
        };
        clinics[idx].doctors.push(GroupedDoctor::from(record));
    }
    clinics
}

pub(super) fn write(records: &[PractitionerRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, &group_by_clinic(records))?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
