//! Corruption-type categories and keyword evidence matching.

use std::hash::{Hash, Hasher};

/// A corruption-type label with the keyword evidence that signals it.
///
/// Identity is the canonical name: two categories with the same name are
/// equal regardless of confidence or evidence.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    confidence: i32,
    /// Lowercase substrings; always contains `name`.
    evidences: Vec<String>,
    search_query: String,
}

impl Category {
    pub fn new(name: &str, confidence: i32, evidences: &[&str]) -> Self {
        let mut all: Vec<String> = evidences.iter().map(|e| e.to_lowercase()).collect();
        let lowered = name.to_lowercase();
        if !all.contains(&lowered) {
            all.push(lowered);
        }
        Category {
            name: name.to_string(),
            confidence,
            evidences: all,
            search_query: name.to_string(),
        }
    }

    /// Override the phrase used when this category is searched for.
    pub fn with_search_query(mut self, query: &str) -> Self {
        self.search_query = query.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confidence(&self) -> i32 {
        self.confidence
    }

    pub fn evidences(&self) -> &[String] {
        &self.evidences
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Case-insensitive substring test against every evidence keyword.
    pub fn matches(&self, description: &str) -> bool {
        let lowered = description.to_lowercase();
        self.evidences.iter().any(|e| lowered.contains(e.as_str()))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sort most reliable first. Stable, so equal confidences keep input order.
pub fn sort_by_confidence(categories: &mut [Category]) {
    categories.sort_by_key(|c| std::cmp::Reverse(c.confidence));
}

/// The built-in category list, sorted by descending confidence.
///
/// Confidence is the count of correctly labelled cases minus the count of
/// mislabelled ones in a hand-checked sample.
pub fn default_categories() -> Vec<Category> {
    let mut all = vec![
        Category::new(
            "pengadaan",
            205 - 17,
            &["pembangunan", "proyek", "fiktif", "pekerjaan"],
        ),
        Category::new("izin", 23, &["ijin", "surat"]).with_search_query("perizinan"),
        Category::new(
            "suap",
            661 - 97,
            &["penyuapan", "hadiah", "janji", "nerima", "gratifikasi"],
        ),
        Category::new(
            "pungli",
            26 - 1,
            &["pungut", "pemungutan", "meminta", "pembayaran"],
        ),
        Category::new("anggaran", 48 - 2, &["guna"]),
        Category::new("tppu", 34 - 3, &["cuci", "laundry"]).with_search_query("pencucian uang"),
        Category::new("rintangi", 10, &["ringtangi"]).with_search_query("merintangi kpk"),
    ];
    sort_by_confidence(&mut all);
    all
}

/// Look up a category by canonical name.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}
