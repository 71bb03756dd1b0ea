//! Province resolver: maps the scraper's free-form province value onto the
//! canonical province list.
//!
//! The scraper emits `province` as a plain string, a delimited string, an
//! array of strings, or the sentinel `"all"`. Matching against canonical
//! names is a best-effort heuristic (bidirectional substring containment),
//! not a foreign-key relationship; a short province name that happens to be
//! a substring of unrelated text will false-positive. `ResolverMode::Exact`
//! is the stricter alternative, `Containment` is the behavior-parity default.

use serde_json::Value;

use crate::config::ResolverMode;

/// Candidate segments of a province field.
///
/// Strings are split on `, / | ;` with empty segments dropped; arrays
/// contribute their non-empty string elements as-is; anything else
/// non-null is stringified whole.
pub fn candidates(field: &Value) -> Vec<String> {
    match field {
        Value::String(s) => s
            .split([',', '/', '|', ';'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Whether a candidate segment attributes to a canonical province name.
pub fn matches_province(candidate: &str, name: &str, mode: ResolverMode) -> bool {
    match mode {
        ResolverMode::Containment => candidate.contains(name) || name.contains(candidate),
        ResolverMode::Exact => candidate == name,
    }
}

/// Resolve a province field to canonical province names.
///
/// Any candidate containing `"all"` (case-insensitive) short-circuits the
/// whole record to every canonical province. Otherwise each candidate
/// attributes to at most the first canonical name it matches, and a
/// candidate matching nothing is silently dropped. The result is
/// duplicate-free and ordered by first attribution.
pub fn resolve(field: &Value, canonical: &[String], mode: ResolverMode) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::new();

    for candidate in candidates(field) {
        if candidate.to_lowercase().contains("all") {
            return canonical.to_vec();
        }

        let matched = canonical
            .iter()
            .find(|name| matches_province(&candidate, name, mode));

        if let Some(name) = matched
            && !resolved.iter().any(|r| r == name)
        {
            resolved.push(name.clone());
        }
    }

    resolved
}
