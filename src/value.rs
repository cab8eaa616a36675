//! The recursive document value type shared by every stage of the compiler.
//!
//! Loaders parse into this type, the merger folds it, the stack processor
//! reshapes it, and the CLI serialises it back out. Keeping one type at the
//! center means none of the core algorithms need to know which text format
//! (YAML today) the documents came from.

use indexmap::IndexMap;

/// A parsed document node: null, a scalar, an ordered sequence, or an
/// ordered string-keyed mapping.
///
/// `Map` uses `IndexMap` rather than `HashMap` so that key order from the
/// source document survives merges and is reproduced on serialisation
/// (spec requires "stable key ordering" in the emitted documents).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn empty_map() -> Value {
        Value::Map(IndexMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True for an absent/null value, an empty map, an empty sequence, or an
    /// empty string. Used throughout the dependency and backend derivation
    /// rules, which repeatedly ask "is this section non-empty".
    pub fn is_empty_section(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Map(m) => m.is_empty(),
            Value::Seq(s) => s.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Look up `key` in this value if it is a map, returning `None` both
    /// when the key is absent and when this value isn't a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Look up a dotted path of keys, e.g. `get_path(&["terraform", "vars"])`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut cur = self;
        for seg in path {
            cur = cur.get(seg)?;
        }
        Some(cur)
    }

    /// The section at `key`, defaulting to an empty map when absent or null
    /// (the common case throughout the stack processor: every optional
    /// section behaves as an empty map rather than requiring special-casing
    /// at every call site).
    pub fn section(&self, key: &str) -> Value {
        match self.get(key) {
            Some(v) if !v.is_null() => v.clone(),
            _ => Value::empty_map(),
        }
    }

    pub fn string_section(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(v: serde_yaml::Value) -> Self {
        match v {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Value::Seq(seq.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    let key = yaml_key_to_string(k);
                    out.insert(key, Value::from(v));
                }
                Value::Map(out)
            }
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Non-string mapping keys are stringified at the load boundary, per the
/// data model's "all mappings are string-keyed at the outer level" rule.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Int(i) => serde_yaml::Value::Number((*i).into()),
            Value::Float(f) => serde_yaml::Value::Number((*f).into()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::Seq(seq) => serde_yaml::Value::Sequence(seq.iter().map(Into::into).collect()),
            Value::Map(map) => {
                let mut out = serde_yaml::Mapping::new();
                for (k, v) in map {
                    out.insert(serde_yaml::Value::String(k.clone()), v.into());
                }
                serde_yaml::Value::Mapping(out)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Seq(seq) => serde_json::Value::Array(seq.iter().map(Into::into).collect()),
            Value::Map(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.into());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

/// Build a `Value::Seq` of strings, used for the `imports`/`deps`/`stacks`
/// sections which are always flat string lists.
pub fn string_seq<I: IntoIterator<Item = S>, S: Into<String>>(items: I) -> Value {
    Value::Seq(items.into_iter().map(|s| Value::String(s.into())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_defaults_to_empty_map_when_absent() {
        let v = Value::empty_map();
        assert_eq!(v.section("vars"), Value::empty_map());
    }

    #[test]
    fn section_defaults_to_empty_map_when_null() {
        let mut m = IndexMap::new();
        m.insert("vars".to_string(), Value::Null);
        let v = Value::Map(m);
        assert_eq!(v.section("vars"), Value::empty_map());
    }

    #[test]
    fn is_empty_section_checks_variants() {
        assert!(Value::Null.is_empty_section());
        assert!(Value::empty_map().is_empty_section());
        assert!(Value::Seq(vec![]).is_empty_section());
        assert!(Value::String(String::new()).is_empty_section());
        assert!(!Value::Bool(false).is_empty_section());
        assert!(!Value::Int(0).is_empty_section());
    }

    #[test]
    fn get_path_walks_nested_maps() {
        let yaml = "terraform:\n  vars:\n    region: us-east-1\n";
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let v: Value = parsed.into();
        let region = v.get_path(&["terraform", "vars", "region"]).unwrap();
        assert_eq!(region.as_str(), Some("us-east-1"));
    }

    #[test]
    fn non_string_keys_are_stringified() {
        let yaml = "1: one\ntrue: yes\n";
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let v: Value = parsed.into();
        let map = v.as_map().unwrap();
        assert_eq!(map.get("1").and_then(Value::as_str), Some("one"));
        assert_eq!(map.get("true").and_then(Value::as_str), Some("yes"));
    }
}
