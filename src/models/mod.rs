//! Record types produced by the extraction pipeline.

mod clinic;
mod practitioner;

pub use clinic::ClinicRecord;
pub use practitioner::{Gender, PractitionerRecord, ProfileDetails};
