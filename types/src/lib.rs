use serde::{Deserialize, Serialize};

// ── Enriched case ────────────────────────────────────────────────────────

/// One enriched case as emitted by `korupsi enrich --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub key: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub accused: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Present only for rows read with the extended schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<VerdictSummary>,
    pub description: String,
    pub source: String,
}

/// Court and enforcement details carried by the extended schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerdictSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punishment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_damage: Option<String>,
}

// ── Duplicate report ─────────────────────────────────────────────────────

/// Two records judged to describe the same real-world case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub left: i64,
    pub right: i64,
    pub left_accused: String,
    pub right_accused: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ── Search queries ───────────────────────────────────────────────────────

/// The three lookup queries built for a case, in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySet {
    pub key: i64,
    pub verdict: String,
    pub arrest: String,
    pub damages: String,
}
