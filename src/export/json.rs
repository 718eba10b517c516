//! Record-oriented JSON.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::create;
use crate::error::ExportError;
use crate::models::{ClinicRecord, PractitionerRecord};

/// One practitioner as written to the JSON export.
#[derive(Debug, Serialize)]
pub struct RecordExport<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub specialties: &'a [String],
    pub qualifications: &'a [String],
    pub languages: &'a [String],
    pub interests: &'a [String],
    pub consultation_types: &'a [String],
    pub gender: Option<&'static str>,
    pub bio: Option<&'a str>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub profile_url: Option<&'a str>,
    pub clinic_info: ClinicInfo<'a>,
}

#[derive(Debug, Serialize)]
pub struct ClinicInfo<'a> {
    pub clinic_name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub suburb: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postcode: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub services: &'a [String],
    pub bulk_billing: bool,
    pub clinic_url: &'a str,
}

impl<'a> From<&'a ClinicRecord> for ClinicInfo<'a> {
    fn from(clinic: &'a ClinicRecord) -> Self {
        Self {
            clinic_name: clinic.name.as_deref(),
            address: clinic.address_line.as_deref(),
            suburb: clinic.suburb.as_deref(),
            state: clinic.state.as_deref(),
            postcode: clinic.postcode.as_deref(),
            phone: clinic.phone.as_deref(),
            email: clinic.email.as_deref(),
            services: &clinic.services,
            bulk_billing: clinic.bulk_billing,
            clinic_url: &clinic.source_url,
        }
    }
}

impl<'a> From<&'a PractitionerRecord> for RecordExport<'a> {
    fn from(record: &'a PractitionerRecord) -> Self {
        Self {
            name: &record.cleaned_name,
            title: &record.title,
            specialties: &record.specialties,
            qualifications: &record.qualifications,
            languages: &record.languages,
            interests: &record.interests,
            consultation_types: &record.consultation_types,
            gender: record.gender.label(),
            bio: record.bio.as_deref(),
            rating: record.rating,
            review_count: record.review_count,
            profile_url: record.profile_url.as_deref(),
            clinic_info: ClinicInfo::from(record.clinic.as_ref()),
        }
    }
}

pub(super) fn write(records: &[PractitionerRecord], path: &Path) -> Result<(), ExportError> {
    let rows: Vec<RecordExport<'_>> = records.iter().map(RecordExport::from).collect();
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
