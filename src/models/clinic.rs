//! Clinic (medical centre) records.

/// One clinic page, as seen on a single visit.
///
/// `source_url` is the clinic's identity within a run. Every other field is
/// best-effort and `None` when the page did not provide it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicRecord {
    pub name: Option<String>,
    pub address_line: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Service keywords found on the page, de-duplicated in discovery order.
    pub services: Vec<String>,
    pub bulk_billing: bool,
    pub source_url: String,
}

impl ClinicRecord {
    /// Create an empty record for a clinic URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            name: None,
            address_line: None,
            suburb: None,
            state: None,
            postcode: None,
            phone: None,
            email: None,
            services: Vec::new(),
            bulk_billing: false,
            source_url: source_url.into(),
        }
    }

    /// Clinic name or a placeholder for log lines.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Clinic")
    }
}
