/// First whitespace-delimited token that looks like a 21st-century year.
///
/// A token qualifies when it is exactly four characters, starts with "20"
/// and parses as an integer. Anything else is skipped, so "20xx" or
/// "2019," never match.
pub fn extract_year(description: &str) -> Option<String> {
    description
        .split_whitespace()
        .find(|token| {
            token.chars().count() == 4 && token.starts_with("20") && token.parse::<u16>().is_ok()
        })
        .map(str::to_string)
}
