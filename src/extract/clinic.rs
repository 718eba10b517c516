//! Clinic-level fields of a clinic page.

use tracing::debug;

use super::fields::{address, contact, services};
use super::Extractor;
use crate::document::ParsedDocument;
use crate::models::ClinicRecord;

impl Extractor {
    /// Read the clinic record from its page.
    pub fn clinic(&self, doc: &ParsedDocument) -> ClinicRecord {
        let mut clinic = ClinicRecord::new(doc.url.clone());

        clinic.name = contact::extract_clinic_name(doc, &self.clinic_name, &self.site_name);

        let addr = address::extract_address(doc, &self.address);
        clinic.address_line = addr.line;
        clinic.suburb = addr.suburb;
        clinic.state = addr.state;
        clinic.postcode = addr.postcode;

        clinic.phone = contact::extract_phone(doc, &self.phone);
        clinic.email = contact::extract_email(doc, &self.email);

        let text = doc.page_text();
        clinic.services = services::detect_services(&text, &self.rules.service_keywords);
        clinic.bulk_billing = services::detect_bulk_billing(&text, &self.rules.bulk_billing_keywords);

        debug!(
            "Clinic {} ({}) at {}",
            clinic.display_name(),
            clinic.suburb.as_deref().unwrap_or("-"),
            doc.url
        );
        clinic
    }
}
