//! Turns raw scan payloads into fully populated [`ScanResult`] values.
//!
//! The service is loose about its output: fields go missing, alerts use
//! alternate key names and counts may arrive as strings. Nothing in here
//! fails; every absent value falls back to an empty default.

use serde_json::Value;

use crate::model::{Finding, ScanLevel, ScanResult, Severity, empty_summary};

fn first_str<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| item.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn parse_count(value: &Value) -> Option<u32> {
    if let Some(number) = value.as_u64() {
        return u32::try_from(number).ok();
    }

    value
        .as_str()
        .and_then(|text| text.trim().parse::<u32>().ok())
}

// keeps the first occurrence of each entry, skipping blanks and non-strings
fn unique_strings<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for value in values.filter_map(Value::as_str).map(str::trim) {
        if value.is_empty() || out.iter().any(|existing| existing == value) {
            continue;
        }

        out.push(value.to_string());
    }

    out
}

fn string_list(item: &Value, plural: &str, singular: &str) -> Vec<String> {
    match item.get(plural) {
        Some(Value::Array(items)) => unique_strings(items.iter()),
        Some(single @ Value::String(_)) => unique_strings(std::iter::once(single)),
        _ => item
            .get(singular)
            .map(|single| unique_strings(std::iter::once(single)))
            .unwrap_or_default(),
    }
}

pub fn normalize_finding(item: &Value) -> Finding {
    Finding {
        name: first_str(item, &["name", "alert"])
            .unwrap_or("Unknown")
            .to_string(),
        risk: first_str(item, &["risk", "riskdesc", "severity"])
            .map(Severity::from_label)
            .unwrap_or(Severity::Low),
        urls: string_list(item, "urls", "url"),
        params: string_list(item, "params", "param"),
        solution: first_str(item, &["solution", "solutions"])
            .unwrap_or_default()
            .to_string(),
        extra_suggestion: first_str(item, &["extra_suggestion", "extraSuggestion"])
            .map(ToString::to_string),
        description: first_str(item, &["description", "desc"])
            .unwrap_or_default()
            .to_string(),
        reference: first_str(item, &["reference", "references"])
            .unwrap_or_default()
            .to_string(),
    }
}

/// Builds a [`ScanResult`] from a success payload. `target` and `level` are
/// the values that were submitted and are used when the payload omits them.
pub fn normalize_scan(payload: &Value, target: &str, level: ScanLevel) -> ScanResult {
    let mut summary = empty_summary();

    if let Some(counts) = payload.get("summary").and_then(Value::as_object) {
        for (label, value) in counts {
            let Some(count) = parse_count(value) else {
                continue;
            };

            let severity = Severity::from_label(label);

            // unknown labels are folded into Low by the parser; only keep the
            // exact buckets so an "Informational" key does not clobber Low
            if label.trim().eq_ignore_ascii_case(severity.as_str()) {
                summary.insert(severity, count);
            }
        }
    }

    let vulnerabilities = payload
        .get("vulnerabilities")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(normalize_finding)
                .collect::<Vec<Finding>>()
        })
        .unwrap_or_default();

    let level = payload
        .get("level")
        .and_then(parse_count)
        .and_then(|value| u8::try_from(value).ok())
        .and_then(|value| ScanLevel::try_from(value).ok())
        .unwrap_or(level);

    ScanResult {
        target: first_str(payload, &["target"]).unwrap_or(target).to_string(),
        level,
        summary,
        vulnerabilities,
        ai_summary: first_str(payload, &["ai_summary", "aiSummary"]).map(ToString::to_string),
        timestamp: first_str(payload, &["timestamp"]).map(ToString::to_string),
    }
}
