//! Plain-text report: one block per clinic, practitioners indented.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::grouped::{group_by_clinic, GroupedClinic, GroupedDoctor, OrMissing};
use crate::error::ExportError;
use crate::models::PractitionerRecord;

fn show<T: ToString>(value: &OrMissing<T>) -> String {
    match value {
        OrMissing::Present(v) => v.to_string(),
        OrMissing::Missing(placeholder) => placeholder.to_string(),
    }
}

fn show_list(value: &OrMissing<Vec<String>>) -> String {
    match value {
        OrMissing::Present(items) => items.join(", "),
        OrMissing::Missing(placeholder) => placeholder.to_string(),
    }
}

fn clinic_block(out: &mut String, clinic: &GroupedClinic) {
    let _ = writeln!(out, "{}", show(&clinic.clinic_name));
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Address:      {}", show(&clinic.address));
    let _ = writeln!(
        out,
        "Location:     {} {} {}",
        show(&clinic.suburb),
        show(&clinic.state),
        show(&clinic.postcode)
    );
    let _ = writeln!(out, "Phone:        {}", show(&clinic.phone));
    let _ = writeln!(out, "Email:        {}", show(&clinic.email));
    let _ = writeln!(out, "Services:     {}", show_list(&clinic.services));
    let _ = writeln!(
        out,
        "Bulk billing: {}",
        if clinic.bulk_billing { "Yes" } else { "No" }
    );
    let _ = writeln!(out, "URL:          {}", clinic.clinic_url);
    let _ = writeln!(out, "Doctors ({}):", clinic.doctors.len());
    for doctor in &clinic.doctors {
        doctor_block(out, doctor);
    }
    out.push('\n');
}

fn doctor_block(out: &mut String, doctor: &GroupedDoctor) {
    let _ = writeln!(out, "  - {} {}", doctor.title, doctor.name);
    let _ = writeln!(out, "      Specialties:    {}", show_list(&doctor.specialties));
    let _ = writeln!(out, "      Qualifications: {}", show_list(&doctor.qualifications));
    let _ = writeln!(out, "      Languages:      {}", show_list(&doctor.languages));
    let _ = writeln!(out, "      Interests:      {}", show_list(&doctor.interests));
    let _ = writeln!(
        out,
        "      Consultations:  {}",
        show_list(&doctor.consultation_types)
    );
    let _ = writeln!(out, "      Gender:         {}", show(&doctor.gender));
    let _ = writeln!(
        out,
        "      Rating:         {} ({} reviews)",
        show(&doctor.rating),
        show(&doctor.review_count)
    );
    let _ = writeln!(out, "      Profile:        {}", show(&doctor.profile_url));
    let _ = writeln!(out, "      Bio:            {}", show(&doctor.bio));
}

/// Render the report for `records`.
pub fn render_report(records: &[PractitionerRecord]) -> String {
    let clinics = group_by_clinic(records);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} practitioners across {} clinics\n",
        records.len(),
        clinics.len()
    );
    for clinic in &clinics {
        clinic_block(&mut out, clinic);
    }
    out
}

pub(super) fn write(records: &[PractitionerRecord], path: &Path) -> Result<(), ExportError> {
    fs::write(path, render_report(records)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{clinic, practitioner};
    use super::*;

    #[test]
    fn test_report_layout() {
        let c = clinic(Some("Armadale Clinic"), "https://example.test/a");
        let report = render_report(&[practitioner("Jane Smith", &c), practitioner("John Doe", &c)]);

        assert!(report.starts_with("2 practitioners across 1 clinics"));
        assert!(report.contains("Armadale Clinic\n===="));
        assert!(report.contains("Location:     Armadale VIC 3143"));
        assert!(report.contains("Email:        Not available"));
        assert!(report.contains("Bulk billing: Yes"));
        assert!(report.contains("Doctors (2):"));
        assert!(report.contains("  - Dr Jane Smith\n"));
        assert!(report.contains("      Qualifications: MBBS, FRACGP"));
        assert!(report.contains("      Languages:      Not available"));
        assert!(report.contains("      Rating:         4.8 (23 reviews)"));
        assert!(report.contains("      Consultations:  Not available"));
        assert!(report.contains("      Bio:            Not available"));
    }

    #[test]
    fn test_report_includes_profile_details() {
        let c = clinic(Some("Armadale Clinic"), "https://example.test/a");
        let mut record = practitioner("Jane Smith", &c);
        record.bio = Some("Family GP with an interest in skin health.".to_string());
        record.consultation_types = vec!["Telehealth".to_string(), "Home visits".to_string()];

        let report = render_report(&[record]);
        assert!(report.contains("      Consultations:  Telehealth, Home visits"));
        assert!(report.contains("      Bio:            Family GP with an interest in skin health."));
    }
}
