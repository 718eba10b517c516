//! Output writers for a run's records.
//!
//! The record-oriented JSON file is always written; CSV, clinic-grouped
//! JSON and the plain-text report are opt-in.

mod checkpoint;
mod grouped;
mod json;
mod table;
mod text;

pub use checkpoint::Checkpointer;
pub use grouped::{group_by_clinic, GroupedClinic, GroupedDoctor, OrMissing};
pub use json::{ClinicInfo, RecordExport};
pub use text::render_report;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::models::PractitionerRecord;

/// Placeholder for absent values in the grouped and report outputs.
pub const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Record-oriented JSON
    Json,
    /// One row per practitioner
    Csv,
    /// JSON grouped by clinic
    Grouped,
    /// Plain-text report grouped by clinic
    Text,
}

impl ExportFormat {
    /// Output file name for this format under a run's file stem.
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            Self::Json => format!("{}.json", stem),
            Self::Csv => format!("{}.csv", stem),
            Self::Grouped => format!("{}_clinics.json", stem),
            Self::Text => format!("{}_report.txt", stem),
        }
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>` in local time.
pub fn timestamped_stem(prefix: &str) -> String {
    format!("{}_{}", prefix, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write `records` in JSON plus every other requested format.
///
/// Returns the paths written, JSON first.
pub fn write_outputs(
    records: &[PractitionerRecord],
    dir: &Path,
    stem: &str,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut order = vec![ExportFormat::Json];
    for format in formats {
        if !order.contains(format) {
            order.push(*format);
        }
    }

    let mut written = Vec::with_capacity(order.len());
    for format in order {
        let path = dir.join(format.file_name(stem));
        match format {
            ExportFormat::Json => json::write(records, &path)?,
            ExportFormat::Csv => table::write(records, &path)?,
            ExportFormat::Grouped => grouped::write(records, &path)?,
            ExportFormat::Text => text::write(records, &path)?,
        }
        info!("Wrote {} records to {}", records.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

fn create(path: &Path) -> Result<fs::File, ExportError> {
    fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::models::{ClinicRecord, Gender, PractitionerRecord};

    pub fn clinic(name: Option<&str>, url: &str) -> Arc<ClinicRecord> {
        let mut clinic = ClinicRecord::new(url);
        clinic.name = name.map(String::from);
        clinic.suburb = Some("Armadale".to_string());
        clinic.state = Some("VIC".to_string());
        clinic.postcode = Some("3143".to_string());
        clinic.phone = Some("(03) 9500 1234".to_string());
        clinic.services = vec!["Skin Checks".to_string(), "Vaccinations".to_string()];
        clinic.bulk_billing = true;
        Arc::new(clinic)
    }

    pub fn practitioner(name: &str, clinic: &Arc<ClinicRecord>) -> PractitionerRecord {
        PractitionerRecord {
            raw_name: format!("Dr {}", name),
            cleaned_name: name.to_string(),
            title: "Dr".to_string(),
            specialties: vec!["General Practitioner".to_string()],
            qualifications: vec!["MBBS".to_string(), "FRACGP".to_string()],
            languages: vec![],
            interests: vec![],
            consultation_types: vec![],
            gender: Gender::Unknown,
            bio: None,
            rating: Some(4.8),
            review_count: Some(23),
            profile_url: None,
            clinic: Arc::clone(clinic),
        }
    }
}
