use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current parameter values of a block, keyed by parameter name.
/// Insertion order follows the element's schema.
pub type Parameters = IndexMap<String, ParamValue>;

/// A single parameter value as stored on a block instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "Boolean",
            ParamValue::Number(_) => "Number",
            ParamValue::Text(_) => "Text",
            ParamValue::List(_) => "List",
        }
    }

    /// Text form used by generation rules and placeholder substitution.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ParamValue::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.trim().is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Bool(_) | ParamValue::Number(_) => false,
        }
    }

    /// Truthiness for boolean parameters. Text values `true`, `1`, `yes`
    /// and `on` count as set, so manifests may use either form.
    pub fn as_flag(&self) -> bool {
        match self {
            ParamValue::Bool(b) => *b,
            ParamValue::Number(n) => *n != 0.0,
            ParamValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ),
            ParamValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok(),
            ParamValue::Bool(_) | ParamValue::List(_) => None,
        }
    }

    /// List entries. Text is split on newlines, dropping blank lines.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            ParamValue::List(items) => items.clone(),
            ParamValue::Text(s) => s
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => {
                if n.is_finite() && *n == n.floor() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(items: &[&str]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}
