//! Geographic reference data used for location inference.
//!
//! The province/city table comes from an external reference file and is
//! loaded once; the regional abbreviations and central-government name
//! fragments are fixed. A `Vocabulary` is immutable after construction and
//! carries precompiled boundary patterns for every name it knows.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};

/// Province assigned when only a central-government body is mentioned.
pub const CAPITAL_REGION: &str = "Jakarta";

/// Regional abbreviations used in Indonesian news prose. Treated as extra
/// province names: a match assigns the abbreviation itself.
pub const REGIONAL_ABBREVIATIONS: &[&str] = &[
    "DKI", "DIY", "NTB", "NTT", // Special regions / Nusa Tenggara
    "Jabar", "Jateng", "Jatim", // Java
    "Sumut", "Sumbar", "Sumsel", "Babel", "Kepri", // Sumatra
    "Kalbar", "Kalteng", "Kalsel", "Kaltim", "Kaltara", // Kalimantan
    "Sulut", "Sulteng", "Sulsel", "Sultra", "Sulbar", // Sulawesi
];

/// Name fragments of national institutions. Any of these, with neither a
/// city nor a province in the text, places the case in the capital.
pub const CENTRAL_GOVERNMENTS: &[&str] = &[
    "kementerian",
    "kementrian",
    "dpr ri",
    "dpd ri",
    "mahkamah",
    "kpu",
    "bpk",
    "bpkp",
    "ma",
    "mk",
    "komisi yudisial",
    "kejaksaan agung",
    "ojk",
    "bank indonesia",
    "otoritas jasa keuangan",
    "bumn",
];

// ── Boundary matching ────────────────────────────────────────────────

/// A vocabulary name compiled into a whitespace-bounded matcher.
///
/// The name must be preceded by whitespace or the start of the text and
/// followed by whitespace or the end. Matching is done against
/// already-lowercased text.
#[derive(Debug, Clone)]
pub struct BoundaryPattern {
    name: String,
    re: Regex,
}

impl BoundaryPattern {
    pub fn new(name: &str) -> Self {
        let escaped = regex::escape(&name.to_lowercase());
        let re = Regex::new(&format!(r"(?:^|\s){escaped}(?:\s|$)"))
            .expect("escaped literal is a valid pattern");
        BoundaryPattern {
            name: name.to_string(),
            re,
        }
    }

    /// The name as it appears in the reference data (original casing).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of non-overlapping occurrences in `lowered`.
    pub fn count(&self, lowered: &str) -> usize {
        self.re.find_iter(lowered).count()
    }
}

// ── Vocabulary ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CityEntry {
    pub pattern: BoundaryPattern,
    pub province: String,
}

/// Read-only province/city tables plus the fixed agency list.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    provinces: Vec<BoundaryPattern>,
    cities: Vec<CityEntry>,
    city_index: HashMap<String, usize>,
    agencies: Vec<BoundaryPattern>,
}

impl Vocabulary {
    /// Build from `(province, city)` pairs in table order.
    ///
    /// Provinces keep first-seen order and are followed by
    /// [`REGIONAL_ABBREVIATIONS`]. A city listed twice keeps its first
    /// province.
    pub fn from_pairs<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let mut province_names: Vec<String> = Vec::new();
        let mut cities = Vec::new();
        let mut city_index = HashMap::new();

        for (province, city) in pairs {
            let (province, city) = (province.as_ref(), city.as_ref());
            if !province_names.iter().any(|p| p == province) {
                province_names.push(province.to_string());
            }
            if city_index.contains_key(city) {
                continue;
            }
            city_index.insert(city.to_string(), cities.len());
            cities.push(CityEntry {
                pattern: BoundaryPattern::new(city),
                province: province.to_string(),
            });
        }

        for abbr in REGIONAL_ABBREVIATIONS {
            if !province_names.iter().any(|p| p == abbr) {
                province_names.push(abbr.to_string());
            }
        }

        Vocabulary {
            provinces: province_names.iter().map(|p| BoundaryPattern::new(p)).collect(),
            cities,
            city_index,
            agencies: CENTRAL_GOVERNMENTS
                .iter()
                .map(|a| BoundaryPattern::new(a))
                .collect(),
        }
    }

    /// Parse reference data: one `province,city` pair per line.
    pub fn parse(content: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || Error::MalformedVocabulary {
                line: idx + 1,
                content: line.to_string(),
            };
            let (province, city) = line.split_once(',').ok_or_else(malformed)?;
            let (province, city) = (province.trim(), city.trim());
            if province.is_empty() || city.is_empty() {
                return Err(malformed());
            }
            pairs.push((province.to_string(), city.to_string()));
        }
        Ok(Self::from_pairs(pairs))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab = Self::parse(&content)?;
        tracing::info!(
            provinces = vocab.provinces.len(),
            cities = vocab.cities.len(),
            "loaded vocabulary from {}",
            path.display()
        );
        Ok(vocab)
    }

    /// Province patterns in table order, abbreviations last.
    pub fn provinces(&self) -> &[BoundaryPattern] {
        &self.provinces
    }

    pub fn cities(&self) -> &[CityEntry] {
        &self.cities
    }

    pub fn agencies(&self) -> &[BoundaryPattern] {
        &self.agencies
    }

    /// Province owning `city`, if the city is in the table.
    pub fn province_of(&self, city: &str) -> Option<&str> {
        self.city_index
            .get(city)
            .map(|&i| self.cities[i].province.as_str())
    }
}
