//! End-to-end run over a fixture site.
//!
//! Drives discovery, extraction, profile merging, checkpointing and every
//! export format without touching the network.

use std::collections::HashMap;

use async_trait::async_trait;

use clinic_scrape::discovery::{Discovery, Location};
use clinic_scrape::error::TransportError;
use clinic_scrape::export::{write_outputs, Checkpointer, ExportFormat};
use clinic_scrape::extract::Extractor;
use clinic_scrape::models::Gender;
use clinic_scrape::pipeline::{ClinicScraper, ScrapeOptions};
use clinic_scrape::scrapers::{PageFetcher, PageSource, Pacing};

const BASE: &str = "https://www.hotdoc.com.au";

const SEARCH: &str = r#"<html><body>
  <a href="/medical-centres/armadale-VIC-3143/armadale-family-clinic/doctors">Armadale Family Clinic</a>
  <a href="/medical-centres/armadale-VIC-3143/high-street-medical/doctors">High Street Medical</a>
  <a href="/medical-centres/armadale-VIC-3143/closed-clinic/doctors">Closed Clinic</a>
  <a href="/help">Help</a>
</body></html>"#;

const FAMILY_CLINIC: &str = r#"<html>
<head><title>Armadale Family Clinic - HotDoc</title></head>
<body>
  <h1>Armadale Family Clinic</h1>
  <div class="clinic-address">Shop 2, 1068 High Street, Armadale, VIC 3143</div>
  <a href="tel:0395001234">03 9500 1234</a>
  <p>We offer bulk billing for children and vaccinations.</p>
  <div class="DoctorAvailabilityRow">
    <div class="DoctorAvailabilityRow-profileTitle">
      <a class="DoctorAvailabilityRow-doctorLink" href="/doctors/armadale-VIC-3143/dr-jane-smith">Dr Jane Smith</a>
    </div>
    <p>General Practitioner, Female, FRACGP, MBBS</p>
    <span class="rating">4.8 stars (23 reviews)</span>
  </div>
  <div class="DoctorAvailabilityRow">
    <div class="DoctorAvailabilityRow-profileTitle">
      <a class="DoctorAvailabilityRow-doctorLink" href="/doctors/armadale-VIC-3143/dr-john-doe">Dr John Doe</a>
    </div>
    <p>General Practitioner, Male, MBBS</p>
  </div>
</body></html>"#;

const HIGH_STREET: &str = r#"<html>
<head><title>High Street Medical - HotDoc</title></head>
<body>
  <div class="doctor-card">
    <a class="doctor-name" href="/doctors/armadale-VIC-3143/prof-amy-lee">Prof Amy Lee</a>
    <p>Specialist Dermatologist, Female, FRACP</p>
    <p>Speaks English and Mandarin.</p>
  </div>
</body></html>"#;

const JANE_PROFILE: &str = r#"<html><body>
  <div class="doctor-bio">Jane has practised family medicine in Armadale for over fifteen years.</div>
  <ul class="languages"><li>English</li><li>Greek</li></ul>
  <ul class="consultation-types"><li>Telehealth</li></ul>
</body></html>"#;

struct FixtureSite(HashMap<String, &'static str>);

impl FixtureSite {
    fn new() -> Self {
        let pages = [
            ("/search?filters=&in=armadale-vic", SEARCH),
            (
                "/medical-centres/armadale-VIC-3143/armadale-family-clinic/doctors",
                FAMILY_CLINIC,
            ),
            (
                "/medical-centres/armadale-VIC-3143/high-street-medical/doctors",
                HIGH_STREET,
            ),
            ("/doctors/armadale-VIC-3143/dr-jane-smith", JANE_PROFILE),
        ];
        Self(
            pages
                .into_iter()
                .map(|(path, body)| (format!("{}{}", BASE, path), body))
                .collect(),
        )
    }
}

#[async_trait]
impl PageSource for FixtureSite {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        match self.0.get(url) {
            Some(body) => Ok(body.to_string()),
            None if url.contains("closed-clinic") => Err(TransportError::Status(500)),
            None => Err(TransportError::Status(404)),
        }
    }

    async fn exists(&self, url: &str) -> bool {
        self.0.contains_key(url)
    }
}

fn scraper(checkpoints: Checkpointer) -> ClinicScraper {
    ClinicScraper::new(
        PageFetcher::new(Box::new(FixtureSite::new()), Pacing::immediate(2)),
        Extractor::hotdoc().unwrap(),
        Discovery::new(BASE, 50),
        checkpoints,
        ScrapeOptions {
            profiles: true,
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_location_run_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut scraper = scraper(Checkpointer::new(dir.path(), "hotdoc", 2));

    let added = scraper
        .scrape_location(&Location::parse("Armadale, VIC"))
        .await;
    assert_eq!(added, 3);

    let ctx = scraper.finish().await;
    assert_eq!(ctx.visited_count(), 3);
    let records = ctx.records();

    let jane = &records[0];
    assert_eq!(jane.cleaned_name, "Jane Smith");
    assert_eq!(jane.title, "Dr");
    assert_eq!(jane.gender, Gender::Female);
    assert_eq!(jane.specialties, vec!["General Practitioner"]);
    assert_eq!(jane.qualifications, vec!["FRACGP", "MBBS"]);
    assert_eq!(jane.rating, Some(4.8));
    assert_eq!(jane.review_count, Some(23));
    assert_eq!(jane.languages, vec!["English", "Greek"]);
    assert_eq!(jane.consultation_types, vec!["Telehealth"]);
    assert!(jane.bio.as_deref().unwrap().starts_with("Jane has practised"));
    assert_eq!(jane.clinic.name.as_deref(), Some("Armadale Family Clinic"));
    assert_eq!(jane.clinic.suburb.as_deref(), Some("Armadale"));
    assert_eq!(jane.clinic.postcode.as_deref(), Some("3143"));
    assert!(jane.clinic.bulk_billing);

    // Profile page missing: the listing record is kept unchanged.
    let john = &records[1];
    assert_eq!(john.gender, Gender::Male);
    assert!(john.languages.is_empty());

    let amy = &records[2];
    assert_eq!(amy.cleaned_name, "Amy Lee");
    assert_eq!(amy.title, "Prof");
    assert_eq!(amy.specialties, vec!["Specialist Dermatologist"]);
    assert_eq!(amy.qualifications, vec!["FRACP"]);
    assert_eq!(amy.languages, vec!["English", "Mandarin"]);
    assert_eq!(amy.clinic.name.as_deref(), Some("High Street Medical"));
    assert_eq!(amy.clinic.state.as_deref(), Some("VIC"));

    let stats = ctx.stats();
    assert_eq!(stats.total_practitioners, 3);
    assert_eq!(stats.distinct_clinics, 2);
    assert_eq!(stats.by_state.get("VIC"), Some(&3));

    // Two records after the first clinic, nothing further reached four.
    assert!(dir.path().join("hotdoc_partial_2.json").exists());
    assert!(!dir.path().join("hotdoc_partial_3.json").exists());

    let out = dir.path().join("out");
    let written = write_outputs(
        records,
        &out,
        "run",
        &[ExportFormat::Csv, ExportFormat::Grouped, ExportFormat::Text],
    )
    .unwrap();
    assert_eq!(written.len(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("run.json")).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["clinic_info"]["clinic_name"], "Armadale Family Clinic");
    assert_eq!(json[1]["bio"], serde_json::Value::Null);

    let grouped: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("run_clinics.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(grouped.as_array().unwrap().len(), 2);
    assert_eq!(grouped[0]["doctors"].as_array().unwrap().len(), 2);
    assert_eq!(grouped[1]["email"], "Not available");
    assert_eq!(grouped[0]["doctors"][1]["bio"], "Not available");

    let report = std::fs::read_to_string(out.join("run_report.txt")).unwrap();
    assert!(report.contains("High Street Medical"));
    assert!(report.contains("  - Prof Amy Lee"));
}

#[tokio::test]
async fn test_single_url_skips_revisits() {
    let mut scraper = scraper(Checkpointer::disabled());
    let url = format!(
        "{}/medical-centres/armadale-VIC-3143/high-street-medical/doctors",
        BASE
    );
    assert_eq!(scraper.scrape_url(&url).await.unwrap(), 1);
    assert_eq!(scraper.scrape_url(&url).await.unwrap(), 0);

    let err = scraper
        .scrape_url(&format!("{}/medical-centres/armadale-VIC-3143/closed-clinic/doctors", BASE))
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("closed-clinic"));

    assert_eq!(scraper.finish().await.len(), 1);
}
