pub mod interaction;
pub mod structure;
pub mod style;

use std::borrow::Cow;

use crate::value::{ParamValue, Parameters};

/// A pure function from an element's parameters to its source fragment.
pub type GenerationRule = fn(&Args<'_>) -> String;

/// Read access to a block's parameter map with per-rule defaults for
/// anything missing.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    params: &'a Parameters,
}

impl<'a> Args<'a> {
    pub fn new(params: &'a Parameters) -> Self {
        Args { params }
    }

    pub fn get(&self, name: &str) -> Option<&'a ParamValue> {
        self.params.get(name)
    }

    pub fn text(&self, name: &str, default: &'a str) -> Cow<'a, str> {
        match self.params.get(name) {
            Some(value) => value.as_text(),
            None => Cow::Borrowed(default),
        }
    }

    /// Like `text`, but an empty or whitespace-only value also falls back.
    pub fn text_or(&self, name: &str, fallback: &'a str) -> Cow<'a, str> {
        match self.params.get(name) {
            Some(value) if !value.is_empty() => match value.as_text() {
                Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
                Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
            },
            _ => Cow::Borrowed(fallback),
        }
    }

    pub fn selector(&self, fallback: &'a str) -> Cow<'a, str> {
        self.text_or("selector", fallback)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(ParamValue::as_flag)
    }

    pub fn number(&self, name: &str, default: f64) -> f64 {
        self.params
            .get(name)
            .and_then(ParamValue::as_number)
            .unwrap_or(default)
    }

    pub fn list(&self, name: &str) -> Vec<String> {
        self.params
            .get(name)
            .map(ParamValue::as_list)
            .unwrap_or_default()
    }
}

/// The literal placeholder for a parameter: `{{name}}`.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// True if `template` mentions at least one parameter as a placeholder.
pub fn has_placeholders(template: &str, params: &Parameters) -> bool {
    params.keys().any(|name| template.contains(&placeholder(name)))
}

/// Replace every `{{name}}` with the value's text. Placeholders naming no
/// parameter are left as they are.
pub fn substitute_placeholders(template: &str, params: &Parameters) -> String {
    let mut code = template.to_string();
    for (name, value) in params {
        code = code.replace(&placeholder(name), &value.as_text());
    }
    code
}
