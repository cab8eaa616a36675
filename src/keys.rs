//! Stable string key derivation from file paths, relative to a base
//! directory with the YAML extension stripped. Stack-keys and import-keys
//! use the same derivation (`relative_key`) but are kept as plain
//! `String`s — both end up as `IndexMap<String, _>` keys throughout the
//! stack processor, and a wrapper type would only add conversions at
//! every call site without catching any real mix-up.

use std::path::Path;

/// The default extension assumed for an import entry that specifies none
/// (`.yml` is also honoured when present).
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Derive a stable key from `path` relative to `base`: forward-slash
/// separators, `.yaml`/`.yml` stripped.
pub fn relative_key(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let rel = rel.to_string_lossy().replace('\\', "/");
    strip_yaml_extension(&rel)
}

pub fn strip_yaml_extension(s: &str) -> String {
    if let Some(stripped) = s.strip_suffix(".yaml") {
        stripped.to_string()
    } else if let Some(stripped) = s.strip_suffix(".yml") {
        stripped.to_string()
    } else {
        s.to_string()
    }
}

/// Append the default extension to an import entry that specifies none.
pub fn with_default_extension(entry: &str) -> String {
    let has_ext = Path::new(entry)
        .extension()
        .map(|e| !e.is_empty())
        .unwrap_or(false);
    if has_ext {
        entry.to_string()
    } else {
        format!("{entry}.{DEFAULT_EXTENSION}")
    }
}
