//! Flat CSV, one row per practitioner.

use std::path::Path;

use serde::Serialize;

use super::create;
use crate::error::ExportError;
use crate::models::PractitionerRecord;

#[derive(Debug, Serialize)]
struct Row<'a> {
    doctor_name: &'a str,
    title: &'a str,
    gender: &'static str,
    specialties: String,
    qualifications: String,
    languages: String,
    rating: Option<f32>,
    review_count: Option<u32>,
    bio: Option<&'a str>,
    interests: String,
    consultation_types: String,
    profile_url: Option<&'a str>,
    clinic_name: Option<&'a str>,
    clinic_address: Option<&'a str>,
    clinic_suburb: Option<&'a str>,
    clinic_state: Option<&'a str>,
    clinic_postcode: Option<&'a str>,
    clinic_phone: Option<&'a str>,
    clinic_email: Option<&'a str>,
    clinic_services: String,
    bulk_billing: bool,
    clinic_url: &'a str,
}

impl<'a> From<&'a PractitionerRecord> for Row<'a> {
    fn from(record: &'a PractitionerRecord) -> Self {
        let clinic = record.clinic.as_ref();
        Self {
            doctor_name: &record.cleaned_name,
            title: &record.title,
            gender: record.gender.label().unwrap_or(""),
            specialties: record.specialties.join(", "),
            qualifications: record.qualifications.join(", "),
            languages: record.languages.join(", "),
            rating: record.rating,
            review_count: record.review_count,
            bio: record.bio.as_deref(),
            interests: record.interests.join(", "),
            consultation_types: record.consultation_types.join(", "),
            profile_url: record.profile_url.as_deref(),
            clinic_name: clinic.name.as_deref(),
            clinic_address: clinic.address_line.as_deref(),
            clinic_suburb: clinic.suburb.as_deref(),
            clinic_state: clinic.state.as_deref(),
            clinic_postcode: clinic.postcode.as_deref(),
            clinic_phone: clinic.phone.as_deref(),
            clinic_email: clinic.email.as_deref(),
            clinic_services: clinic.services.join(", "),
            bulk_billing: clinic.bulk_billing,
            clinic_url: &clinic.source_url,
        }
    }
}

pub(super) fn write(records: &[PractitionerRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(create(path)?);
    for record in records {
        writer.serialize(Row::from(record))?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{clinic, practitioner};
    use super::*;

    #[test]
    fn test_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let c = clinic(Some("Armadale Clinic"), "https://example.test/a");
        write(&[practitioner("Jane Smith", &c)], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "doctor_name");
        assert!(headers.iter().any(|h| h == "clinic_postcode"));
        assert_eq!(headers.iter().last(), Some("clinic_url"));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let col = |name: &str| {
            let idx = headers.iter().position(|h| h == name).unwrap();
            rows[0][idx].to_string()
        };
        assert_eq!(col("qualifications"), "MBBS, FRACGP");
        assert_eq!(col("clinic_services"), "Skin Checks, Vaccinations");
        assert_eq!(col("bio"), "");
        assert_eq!(col("rating"), "4.8");
        assert_eq!(col("bulk_billing"), "true");
    }
}
