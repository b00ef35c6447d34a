//! Placeholder scanning

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::sanitizer::sanitize;

/// A colon followed by one or more ASCII word characters.
static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":([A-Za-z0-9_]+)").unwrap());

/// Extract the named parameters referenced by `sql`.
///
/// Names are returned in order of first appearance in the sanitized text,
/// without duplicates. Occurrences inside comments or string literals are
/// ignored. Blank input yields an empty list.
pub fn extract_params(sql: &str) -> Vec<String> {
    if sql.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = sanitize(sql);

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for caps in PARAM_RE.captures_iter(&cleaned) {
        let Some(m) = caps.get(1) else { continue };
        let name = m.as_str();
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    tracing::debug!(count = names.len(), params = ?names, "extracted SQL parameters");
    names
}

/// [`extract_params`] for SQL that may be absent.
pub fn extract_params_opt(sql: Option<&str>) -> Vec<String> {
    sql.map(extract_params).unwrap_or_default()
}
