//! Run-scoped accumulation and summary statistics.

use std::collections::{BTreeMap, HashSet};

use crate::models::PractitionerRecord;

/// Everything accumulated during one run: admitted records and the URLs
/// already processed.
#[derive(Debug, Default)]
pub struct RunContext {
    records: Vec<PractitionerRecord>,
    visited: HashSet<String>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url` as processed. Returns `false` if it already was.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn add_records(&mut self, records: impl IntoIterator<Item = PractitionerRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[PractitionerRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PractitionerRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> Statistics {
        Statistics::compute(&self.records)
    }
}

/// Frequency tallies over a set of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_practitioners: usize,
    pub distinct_clinics: usize,
    pub rated_count: usize,
    pub average_rating: Option<f32>,
    pub by_state: BTreeMap<String, usize>,
    pub by_specialty: BTreeMap<String, usize>,
    pub with_bio: usize,
}

impl Statistics {
    pub fn compute(records: &[PractitionerRecord]) -> Self {
        let mut stats = Statistics {
            total_practitioners: records.len(),
            ..Default::default()
        };

        let mut clinics: HashSet<&str> = HashSet::new();
        let mut rating_sum = 0.0_f64;

        for record in records {
            if let Some(name) = record.clinic.name.as_deref() {
                clinics.insert(name);
            }
            if let Some(rating) = record.rating {
                stats.rated_count += 1;
                rating_sum += f64::from(rating);
            }
            if let Some(state) = record.clinic.state.as_deref() {
                *stats.by_state.entry(state.to_string()).or_default() += 1;
            }
            for specialty in &record.specialties {
                *stats.by_specialty.entry(specialty.clone()).or_default() += 1;
            }
            if record.bio.as_deref().is_some_and(|b| !b.trim().is_empty()) {
                stats.with_bio += 1;
            }
        }

        stats.distinct_clinics = clinics.len();
        if stats.rated_count > 0 {
            stats.average_rating = Some((rating_sum / stats.rated_count as f64) as f32);
        }
        stats
    }

    /// The `n` most common specialties, most frequent first; ties by name.
    pub fn top_specialties(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .by_specialty
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicRecord, Gender};
    use std::sync::Arc;

    fn clinic(name: Option<&str>, state: Option<&str>) -> Arc<ClinicRecord> {
        let mut c = ClinicRecord::new(format!("https://example.test/{}", name.unwrap_or("anon")));
        c.name = name.map(String::from);
        c.state = state.map(String::from);
        Arc::new(c)
    }

    fn record(
        name: &str,
        clinic: &Arc<ClinicRecord>,
        specialties: &[&str],
        rating: Option<f32>,
        bio: Option<&str>,
    ) -> PractitionerRecord {
        PractitionerRecord {
            raw_name: name.to_string(),
            cleaned_name: name.to_string(),
            title: "Dr.".to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            qualifications: vec![],
            languages: vec![],
            interests: vec![],
            consultation_types: vec![],
            gender: Gender::Unknown,
            bio: bio.map(String::from),
            rating,
            review_count: None,
            profile_url: None,
            clinic: Arc::clone(clinic),
        }
    }

    #[test]
    fn test_statistics() {
        let armadale = clinic(Some("Armadale Clinic"), Some("VIC"));
        let bondi = clinic(Some("Bondi Clinic"), Some("NSW"));
        let nameless = clinic(None, Some("NSW"));

        let records = vec![
            record("A", &armadale, &["General Practitioner"], Some(4.0), Some("Bio")),
            record("B", &armadale, &["General Practitioner", "Surgeon"], Some(5.0), None),
            record("C", &bondi, &["Surgeon"], None, Some("  ")),
            record("D", &nameless, &[], None, None),
        ];
        let stats = Statistics::compute(&records);

        assert_eq!(stats.total_practitioners, 4);
        assert_eq!(stats.distinct_clinics, 2);
        assert_eq!(stats.rated_count, 2);
        assert_eq!(stats.average_rating, Some(4.5));
        assert_eq!(stats.by_state.get("NSW"), Some(&2));
        assert_eq!(stats.by_state.get("VIC"), Some(&2));
        assert_eq!(stats.by_specialty.get("Surgeon"), Some(&2));
        assert_eq!(stats.with_bio, 1);
        assert_eq!(
            stats.top_specialties(1),
            vec![("General Practitioner", 2)]
        );
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::compute(&[]);
        assert_eq!(stats.total_practitioners, 0);
        assert_eq!(stats.average_rating, None);
        assert!(stats.top_specialties(5).is_empty());
    }

    #[test]
    fn test_mark_visited_once() {
        let mut ctx = RunContext::new();
        assert!(ctx.mark_visited("https://example.test/a"));
        assert!(!ctx.mark_visited("https://example.test/a"));
        assert!(ctx.is_visited("https://example.test/a"));
        assert_eq!(ctx.visited_count(), 1);
    }
}
