//! City/province inference by frequency of whole-word vocabulary matches.
//!
//! Resolution order:
//!   1. city: most frequent known city in the text
//!   2. province: most frequent known province (or abbreviation)
//!   3. province from the city table when only the city was found
//!   4. capital region when a central-government body is named and
//!      nothing else matched
//!
//! Values already present on the record are never replaced.

use crate::record::CaseRecord;
use crate::vocab::{BoundaryPattern, CAPITAL_REGION, Vocabulary};

pub fn fill_location(record: &mut CaseRecord, vocab: &Vocabulary) {
    let lowered = record.original_text().to_lowercase();

    if record.city.is_none() {
        record.city =
            most_frequent(vocab.cities().iter().map(|c| &c.pattern), &lowered).map(str::to_string);
    }

    if record.province.is_none() {
        record.province = most_frequent(vocab.provinces().iter(), &lowered).map(str::to_string);
    }

    if record.province.is_none()
        && let Some(city) = &record.city
    {
        record.province = vocab.province_of(city).map(str::to_string);
    }

    if record.province.is_none()
        && record.city.is_none()
        && let Some(agency) = vocab.agencies().iter().find(|a| a.count(&lowered) > 0)
    {
        tracing::trace!(key = record.key(), agency = agency.name(), "central government match");
        record.province = Some(CAPITAL_REGION.to_string());
    }
}

/// Name with the highest positive count; ties go to the earliest pattern.
fn most_frequent<'a>(
    patterns: impl Iterator<Item = &'a BoundaryPattern>,
    lowered: &str,
) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for p in patterns {
        let n = p.count(lowered);
        if n > 0 && best.is_none_or(|(_, top)| n > top) {
            best = Some((p.name(), n));
        }
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use crate::record::{CaseInput, CaseRecord};
    use crate::vocab::Vocabulary;

    fn vocab() -> Vocabulary {
        Vocabulary::from_pairs([
            ("Jawa Timur", "Surabaya"),
            ("Jawa Timur", "Malang"),
            ("Jawa Timur", "Batu"),
            ("Jawa Barat", "Bandung"),
            ("Jawa Barat", "Bogor"),
            ("Sumatera Utara", "Medan"),
        ])
    }

    fn record(description: &str) -> CaseRecord {
        CaseRecord::new(
            CaseInput {
                key: 1,
                description: description.to_string(),
                accused: "Budi".to_string(),
                organization: "Dinas PU".to_string(),
                source: "test".to_string(),
                ..Default::default()
            },
            &vocab(),
        )
    }

    #[test]
    fn test_city_as_standalone_word() {
        let r = record("proyek di Surabaya senilai 5 miliar");
        assert_eq!(r.city(), Some("Surabaya"));
        assert_eq!(r.province(), Some("Jawa Timur"));
    }

    #[test]
    fn test_city_inside_longer_word_ignored() {
        let r = record("tambang batubara ilegal");
        assert_eq!(r.city(), None);
    }

    #[test]
    fn test_most_frequent_city_wins() {
        let r = record("dari Malang ke Bandung lalu Bandung lagi");
        assert_eq!(r.city(), Some("Bandung"));
        assert_eq!(r.province(), Some("Jawa Barat"));
    }

    #[test]
    fn test_tie_goes_to_table_order() {
        let r = record("Bogor dan Surabaya");
        assert_eq!(r.city(), Some("Surabaya"));
    }

    #[test]
    fn test_province_in_text_beats_city_table() {
        let r = record("pejabat Jawa Barat ditangkap di Surabaya");
        assert_eq!(r.city(), Some("Surabaya"));
        assert_eq!(r.province(), Some("Jawa Barat"));
    }

    #[test]
    fn test_abbreviation_counts_as_province() {
        let r = record("kasus di Pemprov Jatim");
        assert_eq!(r.city(), None);
        assert_eq!(r.province(), Some("Jatim"));
    }

    #[test]
    fn test_explicit_values_win() {
        let r = CaseRecord::new(
            CaseInput {
                key: 2,
                description: "proyek di Surabaya".to_string(),
                city: Some("Kediri".to_string()),
                province: Some("Jawa Tengah".to_string()),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.city(), Some("Kediri"));
        assert_eq!(r.province(), Some("Jawa Tengah"));
    }

    #[test]
    fn test_explicit_city_outside_table_leaves_province_absent() {
        let r = CaseRecord::new(
            CaseInput {
                key: 3,
                description: "tanpa lokasi".to_string(),
                city: Some("Kediri".to_string()),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.province(), None);
    }

    #[test]
    fn test_central_government_falls_back_to_capital() {
        let r = record("pejabat kementerian keuangan menerima hadiah");
        assert_eq!(r.city(), None);
        assert_eq!(r.province(), Some("Jakarta"));
    }

    #[test]
    fn test_organization_and_accused_are_searched() {
        let r = CaseRecord::new(
            CaseInput {
                key: 4,
                description: "menerima hadiah".to_string(),
                accused: "Andi".to_string(),
                organization: "DPR RI".to_string(),
                ..Default::default()
            },
            &vocab(),
        );
        assert_eq!(r.province(), Some("Jakarta"));
    }

    #[test]
    fn test_no_signal_leaves_both_absent() {
        let r = record("menerima hadiah dari kontraktor");
        assert_eq!(r.city(), None);
        assert_eq!(r.province(), None);
    }
}
