//! The enriched corruption-case entity.
//!
//! A `CaseRecord` is built from raw row fields; construction cleans the
//! text fields, extracts the year, normalizes the accused name and infers
//! the location. Category assignment is a separate explicit step
//! ([`CaseRecord::fill_category`]).

use std::fmt;

use case_types::{CaseSummary, QuerySet, VerdictSummary};
use sha2::{Digest, Sha256};

use crate::category::Category;
use crate::location::fill_location;
use crate::names::clean_accused;
use crate::vocab::Vocabulary;
use crate::year::extract_year;

// ── Construction input ─────────────────────────────────────────────

/// Court and enforcement details present only in the extended schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictExtras {
    pub punishment: Option<String>,
    pub verdict_date: Option<String>,
    pub arrest_date: Option<String>,
    pub state_damage: Option<String>,
}

/// Raw fields for one case. Optional fields that are already known skip
/// the corresponding inference step.
#[derive(Debug, Clone, Default)]
pub struct CaseInput {
    pub key: i64,
    pub description: String,
    pub accused: String,
    pub organization: String,
    pub source: String,
    pub category: Option<Category>,
    pub year: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub extras: Option<VerdictExtras>,
    /// Pre-serialized search result, passed through untouched.
    pub search_result: Option<String>,
}

// ── Case record ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CaseRecord {
    key: i64,
    /// Raw description + accused + organization, before any cleaning.
    /// All inference reads this, not the cleaned fields.
    original_text: String,
    description: String,
    accused: String,
    organization: String,
    source: String,
    category: Option<Category>,
    year: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) province: Option<String>,
    extras: Option<VerdictExtras>,
    search_result: Option<String>,
}

impl CaseRecord {
    pub fn new(input: CaseInput, vocab: &Vocabulary) -> Self {
        let original_text = format!(
            "{} {} {}",
            input.description, input.accused, input.organization
        );
        let mut record = CaseRecord {
            key: input.key,
            original_text,
            description: input.description.replace('\n', " ").trim().to_string(),
            accused: input.accused.replace('\n', "").trim().to_string(),
            organization: input.organization.replace('\n', "").trim().to_string(),
            source: input.source,
            category: input.category,
            year: input.year,
            city: input.city,
            province: input.province,
            extras: input.extras,
            search_result: input.search_result,
        };

        if record.year.is_none() {
            record.year = extract_year(&record.description);
        }
        record.accused = clean_accused(&record.accused);
        fill_location(&mut record, vocab);
        record
    }

    /// Assign the first category (in the given order) whose evidence
    /// appears in the description. No-op when a category is already set.
    pub fn fill_category(&mut self, ordered: &[Category]) {
        if self.category.is_some() {
            return;
        }
        self.category = ordered.iter().find(|c| c.matches(&self.description)).cloned();
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn accused(&self) -> &str {
        &self.accused
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn extras(&self) -> Option<&VerdictExtras> {
        self.extras.as_ref()
    }

    pub fn search_result(&self) -> Option<&str> {
        self.search_result.as_deref()
    }

    // ── Duplicate detection ───────────────────────────────────────

    /// Whether `other` describes the same real-world case: same category
    /// (both absent counts as the same) and accused names within a
    /// length-scaled edit distance.
    ///
    /// Not transitive, so this is deliberately not `PartialEq`.
    pub fn same_case(&self, other: &CaseRecord) -> bool {
        if self.category != other.category {
            return false;
        }
        let a = self.accused.to_lowercase();
        let b = other.accused.to_lowercase();
        let len = a.chars().count().max(b.chars().count());
        strsim::levenshtein(&a, &b) <= duplicate_threshold(len)
    }

    // ── Derived strings ───────────────────────────────────────────

    /// Verdict, arrest-operation and state-damage queries, in that order.
    pub fn search_queries(&self) -> [String; 3] {
        let category = self.category.as_ref().map(Category::name).unwrap_or("");
        let year = self.year.as_deref().unwrap_or("");
        let tail = format!("{category} {} {} {year}", self.accused, self.organization);
        [
            format!("vonis korupsi {tail}"),
            format!("operasi tangkap tangan ott korupsi {tail}"),
            format!("kerugian negara korupsi {tail}"),
        ]
    }

    /// Stable identifier for a (case, URL) pair: first word of the
    /// accused name, lowercased, plus 128 bits of the URL's SHA-256.
    pub fn derived_key(&self, url: &str) -> String {
        let first = self
            .accused
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        let digest = Sha256::digest(url.as_bytes());
        format!("{first}_{}", hex::encode(&digest[..16]))
    }

    /// Fields in output-column order. The extended layout is used when
    /// the record carries verdict extras.
    pub fn row_fields(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut fields = vec![
            self.key.to_string(),
            self.category
                .as_ref()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            opt(&self.year),
            self.accused.clone(),
            self.organization.clone(),
            opt(&self.city),
            opt(&self.province),
        ];
        if let Some(extras) = &self.extras {
            fields.push(opt(&extras.punishment));
            fields.push(opt(&extras.verdict_date));
            fields.push(opt(&extras.arrest_date));
            fields.push(opt(&extras.state_damage));
        }
        fields.push(opt(&self.search_result));
        fields.push(self.description.clone());
        fields.push(self.source.clone());
        fields
    }

    pub fn to_summary(&self) -> CaseSummary {
        CaseSummary {
            key: self.key,
            category: self.category.as_ref().map(|c| c.name().to_string()),
            year: self.year.clone(),
            accused: self.accused.clone(),
            organization: self.organization.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            verdict: self.extras.as_ref().map(|e| VerdictSummary {
                punishment: e.punishment.clone(),
                verdict_date: e.verdict_date.clone(),
                arrest_date: e.arrest_date.clone(),
                state_damage: e.state_damage.clone(),
            }),
            description: self.description.clone(),
            source: self.source.clone(),
        }
    }

    pub fn to_query_set(&self) -> QuerySet {
        let [verdict, arrest, damages] = self.search_queries();
        QuerySet {
            key: self.key,
            verdict,
            arrest,
            damages,
        }
    }
}

/// Single line of double-quoted, comma-separated fields. Embedded quotes
/// and commas are not escaped.
impl fmt::Display for CaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .row_fields()
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect();
        f.write_str(&quoted.join(","))
    }
}

/// Every pair `(i, j)` with `i < j` whose records are the same case.
///
/// Quadratic in the batch size. Pairs are reported independently; no
/// grouping is attempted since `same_case` is not transitive.
pub fn find_duplicates(records: &[CaseRecord]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in records.iter().enumerate() {
        for (j, b) in records.iter().enumerate().skip(i + 1) {
            if a.same_case(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Maximum edit distance for two names of (longer) length `len`.
fn duplicate_threshold(len: usize) -> usize {
    match len {
        0..=5 => 1,
        6..=12 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::default_categories;

    fn vocab() -> Vocabulary {
        Vocabulary::from_pairs([("Jawa Timur", "Surabaya"), ("Jawa Barat", "Bandung")])
    }

    fn case(key: i64, accused: &str) -> CaseRecord {
        CaseRecord::new(
            CaseInput {
                key,
                description: "menerima hadiah".to_string(),
                accused: accused.to_string(),
                organization: "Dinas PU".to_string(),
                source: "kpk".to_string(),
                ..Default::default()
            },
            &vocab(),
        )
    }

    #[test]
    fn test_construction_cleans_fields() {
        let r = CaseRecord::new(
            CaseInput {
                key: 7,
                description: "  kasus\nproyek 2017 ".to_string(),
                accused: "Dr. Budi\n Santoso, SE (alias Bule)".to_string(),
                organization: "\nPemkot\n ".to_string(),
                source: "berita".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.description(), "kasus proyek 2017");
        assert_eq!(r.accused(), "Budi Santoso");
        assert_eq!(r.organization(), "Pemkot");
        assert_eq!(r.year(), Some("2017"));
        assert_eq!(
            r.original_text(),
            "  kasus\nproyek 2017  Dr. Budi\n Santoso, SE (alias Bule) \nPemkot\n "
        );
    }

    #[test]
    fn test_inference_reads_original_text() {
        // The city only appears inside the parenthetical that gets cleaned away
        let r = CaseRecord::new(
            CaseInput {
                key: 8,
                description: "menerima hadiah".to_string(),
                accused: "Andi (Kadis Bandung )".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.accused(), "Andi");
        assert_eq!(r.city(), Some("Bandung"));
    }

    #[test]
    fn test_explicit_year_kept() {
        let r = CaseRecord::new(
            CaseInput {
                description: "tahun 2015".to_string(),
                year: Some("2014".to_string()),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.year(), Some("2014"));
    }

    #[test]
    fn test_fill_category_first_match_in_order() {
        let mut r = CaseRecord::new(
            CaseInput {
                description: "gratifikasi untuk proyek jembatan".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        assert!(r.category().is_none());
        r.fill_category(&default_categories());
        assert_eq!(r.category().map(Category::name), Some("suap"));
    }

    #[test]
    fn test_fill_category_respects_given_order() {
        let mut cats = default_categories();
        cats.reverse();
        let mut r = CaseRecord::new(
            CaseInput {
                description: "gratifikasi untuk proyek jembatan".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        r.fill_category(&cats);
        assert_eq!(r.category().map(Category::name), Some("pengadaan"));
    }

    #[test]
    fn test_fill_category_keeps_existing_and_absent_when_no_match() {
        let izin = Category::new("izin", 1, &["ijin"]);
        let mut r = CaseRecord::new(
            CaseInput {
                description: "menerima hadiah".to_string(),
                category: Some(izin.clone()),
                ..Default::default()
            },
            &vocab(),
        );
        r.fill_category(&default_categories());
        assert_eq!(r.category(), Some(&izin));

        let mut r = CaseRecord::new(
            CaseInput {
                description: "tidak ada petunjuk".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        r.fill_category(&default_categories());
        assert!(r.category().is_none());
    }

    #[test]
    fn test_same_case_reflexive() {
        let r = case(1, "Budi Santoso");
        assert!(r.same_case(&r));
    }

    #[test]
    fn test_same_case_short_names() {
        let budi = case(1, "Budi");
        assert!(budi.same_case(&case(2, "Budy")));
        assert!(budi.same_case(&case(3, "Bud")));
        assert!(budi.same_case(&case(4, "BUDI")));
        assert!(!budi.same_case(&case(5, "Bodo")));
    }

    #[test]
    fn test_same_case_threshold_bands() {
        // 12 characters: threshold 2
        let a = case(1, "Agus Salimah");
        assert!(a.same_case(&case(2, "Agus Salimmh")));
        assert!(a.same_case(&case(3, "Agus Salmah")));
        assert!(!a.same_case(&case(4, "Agos Selimeh")));
        // 13+ characters: threshold 3
        let b = case(5, "Bambang Sutrisno");
        assert!(b.same_case(&case(6, "Bembang Sutresna")));
        assert!(!b.same_case(&case(7, "Bembong Sutresna")));
    }

    #[test]
    fn test_same_case_symmetric_across_bands() {
        let five = case(1, "Rudii");
        let six = case(2, "Rudiaa");
        assert_eq!(five.same_case(&six), six.same_case(&five));
    }

    #[test]
    fn test_same_case_requires_equal_category() {
        let mut a = case(1, "Budi");
        let b = case(2, "Budi");
        a.fill_category(&default_categories());
        assert!(a.category().is_some());
        assert!(!a.same_case(&b));
    }

    #[test]
    fn test_find_duplicates_pairs() {
        let records = vec![
            case(1, "Budi"),
            case(2, "Andi Wijaya"),
            case(3, "Budy"),
            case(4, "Bud"),
        ];
        assert_eq!(find_duplicates(&records), [(0, 2), (0, 3), (2, 3)]);
    }

    #[test]
    fn test_search_queries_order_and_template() {
        let mut r = CaseRecord::new(
            CaseInput {
                description: "menerima suap 2019".to_string(),
                accused: "Budi".to_string(),
                organization: "Dinas PU".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        r.fill_category(&default_categories());
        assert_eq!(
            r.search_queries(),
            [
                "vonis korupsi suap Budi Dinas PU 2019",
                "operasi tangkap tangan ott korupsi suap Budi Dinas PU 2019",
                "kerugian negara korupsi suap Budi Dinas PU 2019",
            ]
        );
    }

    #[test]
    fn test_search_queries_with_absent_fields() {
        let r = case(1, "Budi");
        assert_eq!(r.search_queries()[0], "vonis korupsi  Budi Dinas PU ");
    }

    #[test]
    fn test_derived_key() {
        let r = case(1, "Budi Santoso");
        assert_eq!(
            r.derived_key("https://www.kpk.go.id/id/berita/siaran-pers"),
            "budi_303ec7e22128e6a5d8bc91545c75acbc"
        );
    }

    #[test]
    fn test_display_base_layout() {
        let r = CaseRecord::new(
            CaseInput {
                key: 3,
                description: "proyek di Surabaya 2016".to_string(),
                accused: "Budi".to_string(),
                organization: "Pemkot".to_string(),
                source: "kpk".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(
            r.to_string(),
            r#""3","","2016","Budi","Pemkot","Surabaya","Jawa Timur","","proyek di Surabaya 2016","kpk""#
        );
    }

    #[test]
    fn test_display_extended_layout() {
        let r = CaseRecord::new(
            CaseInput {
                key: 4,
                description: "kasus".to_string(),
                accused: "Andi".to_string(),
                source: "kpk".to_string(),
                extras: Some(VerdictExtras {
                    punishment: Some("4 tahun".to_string()),
                    arrest_date: Some("2018-01-02".to_string()),
                    ..Default::default()
                }),
                search_result: Some("[]".to_string()),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(
            r.to_string(),
            r#""4","","","Andi","","","","4 tahun","","2018-01-02","","[]","kasus","kpk""#
        );
    }

    #[test]
    fn test_summary_carries_extras() {
        let r = CaseRecord::new(
            CaseInput {
                key: 9,
                extras: Some(VerdictExtras {
                    state_damage: Some("Rp 1 miliar".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            &vocab(),
        );
        let s = r.to_summary();
        assert_eq!(s.key, 9);
        assert_eq!(
            s.verdict.and_then(|v| v.state_damage).as_deref(),
            Some("Rp 1 miliar")
        );
    }
}
