//! Small label-formatting helpers shared by the legacy and context-aware
//! projection transforms. Labels are de-duplicated post-hoc rather than
//! while building the sequence.

use crate::value::Value;

/// Build one `<prefix>:<formatted>` label, substituting the first `%s` in
/// `template` with `value`.
pub fn apply_template(prefix: &str, template: &str, value: &str) -> String {
    format!("{prefix}:{}", template.replacen("%s", value, 1))
}

/// Extract a flat list of strings from `value`'s `key` section, ignoring
/// non-string elements.
pub fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_seq)
        .map(|seq| seq.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// De-duplicate, preserving first occurrence.
pub fn dedup_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
