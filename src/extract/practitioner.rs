//! Practitioner blocks on a clinic page.

use std::sync::Arc;

use scraper::ElementRef;
use tracing::debug;
use url::Url;

use super::cascade::Candidate;
use super::dom::Locatable;
use super::fields::{bio, languages, name, rating};
use super::Extractor;
use crate::document::ParsedDocument;
use crate::models::{ClinicRecord, PractitionerRecord};
use crate::normalize::{normalize, RawPractitioner};

impl Extractor {
    /// Every admitted practitioner on `doc`, each sharing `clinic`.
    pub fn practitioners(
        &self,
        doc: &ParsedDocument,
        clinic: &Arc<ClinicRecord>,
    ) -> Vec<PractitionerRecord> {
        let located = self.cascade.locate(doc);
        let base = Url::parse(&doc.url).ok();

        let records: Vec<PractitionerRecord> = located
            .candidates
            .iter()
            .filter_map(|candidate| {
                let raw = match candidate {
                    Candidate::Element(el) => self.read_block(*el, base.as_ref()),
                    Candidate::Text(text) => self.read_fragment(text),
                };
                normalize(raw, Arc::clone(clinic))
            })
            .collect();

        debug!(
            "{} of {} candidates admitted on {}",
            records.len(),
            located.candidates.len(),
            doc.url
        );
        records
    }

    /// Bare name fragment from a text strategy.
    fn read_fragment(&self, text: &str) -> RawPractitioner {
        let parts = self.honorifics.split(text);
        RawPractitioner {
            raw_name: parts.raw,
            cleaned_name: parts.cleaned,
            title: parts.title,
            ..Default::default()
        }
    }

    fn read_block(&self, block: ElementRef<'_>, base: Option<&Url>) -> RawPractitioner {
        let mut raw = RawPractitioner::default();

        match name::name_element(block, &self.names) {
            Some(name_el) => {
                let parts = self.honorifics.split(&name_el.text_content());
                raw.raw_name = parts.raw;
                raw.cleaned_name = parts.cleaned;
                raw.title = parts.title;
                raw.profile_url = name::profile_href(name_el, &self.link)
                    .and_then(|href| resolve(base, &href));
            }
            None => raw.title = self.rules.default_title.clone(),
        }

        if let Some(line) = self.credentials.find_line(block, &self.paragraph) {
            let creds = self.credentials.split(&line);
            raw.specialties = creds.specialties;
            raw.qualifications = creds.qualifications;
            raw.gender = creds.gender;
        }

        if let Some(text) =
            languages::language_source(block, &self.paragraph, &self.rules.language_triggers)
        {
            raw.languages = languages::parse_languages(&text, &self.rules.language_triggers);
        }

        raw.bio = bio::extract_bio(block, &self.bio, self.rules.bio_min_len);
        raw.interests = self.interests.extract(block);
        raw.rating = rating::extract_rating(block, &self.rating);
        raw.review_count = rating::extract_review_count(block, &self.reviews, &self.rating);
        raw
    }
}

/// Absolute URL for `href`, relative to the page it was found on.
pub(crate) fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(String::from),
        None => Url::parse(href).ok().map(String::from),
    }
}
