use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

/// Play variables in the order they appear in the playbook.
pub type Variables = IndexMap<String, VarValue>;

/// A loosely-typed playbook variable.
///
/// YAML `null` has no variant: a variable set to `null` is treated as if it
/// were never declared (see [`VarValue::from_yaml`]).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum VarValue {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    Sequence(Vec<VarValue>),
    Mapping(IndexMap<String, VarValue>),
}

impl VarValue {
    /// Converts a parsed YAML node. Returns `None` for `null`.
    pub fn from_yaml(value: YamlValue) -> Option<Self> {
        match value {
            YamlValue::Null => None,
            YamlValue::Bool(b) => Some(VarValue::Bool(b)),
            YamlValue::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => VarValue::Integer(i),
                (None, Some(u)) => VarValue::Unsigned(u),
                (None, None) => VarValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            YamlValue::String(s) => Some(VarValue::String(s)),
            YamlValue::Sequence(items) => Some(VarValue::Sequence(
                items.into_iter().filter_map(VarValue::from_yaml).collect(),
            )),
            YamlValue::Mapping(mapping) => Some(VarValue::Mapping(variables_from_mapping(mapping))),
            YamlValue::Tagged(tagged) => VarValue::from_yaml(tagged.value),
        }
    }

    pub fn as_sequence(&self) -> Option<&[VarValue]> {
        match self {
            VarValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Bool(b) => write!(f, "{}", b),
            VarValue::Integer(i) => write!(f, "{}", i),
            VarValue::Unsigned(u) => write!(f, "{}", u),
            VarValue::Float(x) => write!(f, "{}", x),
            VarValue::String(s) => f.write_str(s),
            VarValue::Sequence(_) | VarValue::Mapping(_) => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

/// Converts a YAML mapping into [`Variables`], dropping `null` entries and
/// rendering non-string keys as text.
pub fn variables_from_mapping(mapping: serde_yaml::Mapping) -> Variables {
    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let value = VarValue::from_yaml(value)?;
            Some((key_text(&key)?, value))
        })
        .collect()
}

/// Renders a scalar YAML node as text. Collections and `null` yield `None`.
pub fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => scalar_text(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn key_text(key: &YamlValue) -> Option<String> {
    scalar_text(key).or_else(|| {
        serde_yaml::to_string(key)
            .ok()
            .map(|rendered| rendered.trim_end().to_string())
    })
}
