use regex::Regex;
use std::sync::LazyLock;

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   Dr. Budi Santoso, SE (alias Bule)
//   Ir. H. Ahmad Fauzi, S.Kom, M.Si
//   Rahmat Hidayat alias Dayat
//   Siti Aminah (Kepala Dinas PU)
//
// Order matters: the parenthetical and the alias tail go first so that
// any title inside them disappears with the whole span.

// Step 1: parenthetical aside, greedy up to the last closing paren
static RE_PARENTHESES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*\)").unwrap());

// Step 2: "alias ..." to the end of the name
static RE_ALIAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)alias.*").unwrap());

// Step 3: formal academic degree, e.g. ", S.Kom", ", S.H", ",M.Si"
static RE_ACADEMIC_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s{0,2}[A-Z]\.[A-Z]+[a-z]*").unwrap());

// Step 4: informal two-letter degree, e.g. ", SE", ", SH"
static RE_ACADEMIC_TITLE_INFORMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s{0,2}[A-Z]{2}").unwrap());

// Step 5: honorific prefix, e.g. "Dr.", "Ir.", "H.", "Prof."
static RE_HONORIFIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]{0,3}\.").unwrap());

/// Reduce an accused person's name to the bare personal name.
pub fn clean_accused(raw: &str) -> String {
    let cleaned = RE_PARENTHESES.replace_all(raw, "");
    let cleaned = RE_ALIAS.replace_all(&cleaned, "");
    let cleaned = RE_ACADEMIC_TITLE.replace_all(&cleaned, "");
    let cleaned = RE_ACADEMIC_TITLE_INFORMAL.replace_all(&cleaned, "");
    let cleaned = RE_HONORIFIC.replace_all(&cleaned, "");
    cleaned.trim().replace('.', "")
}
