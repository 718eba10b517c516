//! Free-text locations such as `"Sydney, NSW"`.

/// Locations scraped by `--all`.
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Sydney, NSW",
    "Melbourne, VIC",
    "Brisbane, QLD",
    "Perth, WA",
    "Adelaide, SA",
    "Canberra, ACT",
    "Darwin, NT",
    "Hobart, TAS",
    "Gold Coast, QLD",
    "Newcastle, NSW",
    "Wollongong, NSW",
    "Geelong, VIC",
    "Townsville, QLD",
    "Cairns, QLD",
    "Ballarat, VIC",
    "Bendigo, VIC",
    "Mandurah, WA",
    "Mackay, QLD",
    "Rockhampton, QLD",
    "Bundaberg, QLD",
    "Coffs Harbour, NSW",
    "Wagga Wagga, NSW",
    "Shepparton, VIC",
    "Port Macquarie, NSW",
    "Tamworth, NSW",
];

/// Postcode ranges (start inclusive, end exclusive) for cities with a
/// known HotDoc URL layout.
const POSTCODE_RANGES: &[(&str, &str, u32, u32)] = &[
    ("NSW", "sydney", 2000, 2250),
    ("NSW", "newcastle", 2300, 2320),
    ("NSW", "wollongong", 2500, 2530),
    ("VIC", "melbourne", 3000, 3210),
    ("VIC", "geelong", 3220, 3230),
    ("VIC", "ballarat", 3350, 3360),
    ("QLD", "brisbane", 4000, 4180),
    ("QLD", "gold-coast", 4210, 4230),
    ("QLD", "townsville", 4810, 4820),
    ("WA", "perth", 6000, 6200),
    ("WA", "mandurah", 6210, 6220),
    ("SA", "adelaide", 5000, 5100),
    ("TAS", "hobart", 7000, 7050),
    ("ACT", "canberra", 2600, 2650),
    ("NT", "darwin", 800, 850),
];

/// Postcodes tried per matched city.
const POSTCODES_PER_CITY: usize = 10;

/// Clinic slugs tried per postcode; `{suburb}` is replaced.
const CLINIC_PATTERNS: &[&str] = &[
    "medical-centre",
    "family-clinic",
    "health-centre",
    "doctors",
    "clinic",
    "{suburb}-medical-centre",
    "{suburb}-family-clinic",
    "{suburb}-health-centre",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
    /// Lower-case, hyphenated place name.
    suburb: String,
    /// Upper-case state code when the location has one.
    state: Option<String>,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let (place, state) = match raw.split_once(',') {
            Some((place, state)) => {
                let state = state.trim().to_uppercase();
                (place, (!state.is_empty()).then_some(state))
            }
            None => (raw.as_str(), None),
        };
        let suburb = place
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        Self {
            suburb,
            state,
            raw,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn suburb(&self) -> &str {
        &self.suburb
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Slug used by the search endpoints: spaces to hyphens, commas
    /// dropped, lower-cased (`"Gold Coast, QLD"` -> `"gold-coast-qld"`).
    pub fn search_slug(&self) -> String {
        self.raw.replace(' ', "-").replace(',', "").to_lowercase()
    }

    /// Whether a directory link plausibly belongs to this location.
    /// Locations without a state match everything.
    pub fn matches_url(&self, url: &str) -> bool {
        let Some(state) = &self.state else {
            return true;
        };
        let url = url.to_lowercase();
        let suburb_match = !self.suburb.is_empty() && url.contains(&self.suburb);
        suburb_match || url.contains(&state.to_lowercase())
    }

    /// Guessed clinic URLs built from the postcode table.
    pub fn generated_urls(&self, base_url: &str) -> Vec<String> {
        let Some(state) = &self.state else {
            return Vec::new();
        };
        if self.suburb.is_empty() {
            return Vec::new();
        }
        let Some(&(_, _, start, end)) = POSTCODE_RANGES.iter().find(|(s, city, _, _)| {
            *s == state.as_str() && (city.contains(self.suburb.as_str()) || self.suburb.contains(city))
        }) else {
            return Vec::new();
        };

        let base = base_url.trim_end_matches('/');
        let mut urls = Vec::new();
        for postcode in (start..end).take(POSTCODES_PER_CITY) {
            let location = format!("{}-{}-{:04}", self.suburb, state, postcode);
            for pattern in CLINIC_PATTERNS {
                let clinic = pattern.replace("{suburb}", &self.suburb);
                urls.push(format!(
                    "{}/medical-centres/{}/{}/doctors",
                    base, location, clinic
                ));
            }
        }
        urls
    }
}
