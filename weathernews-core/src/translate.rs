use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lookup table keyed by the English text, so an empty table renders English.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The translated string, or the key itself when none exists.
    pub fn translate(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Translate `template` and substitute each `{name}` with its value.
    ///
    /// Substitution is a single pass: braces inside a value are copied
    /// verbatim, and unknown placeholders are left in place.
    pub fn fill(&self, template: &str, args: &[(&str, &str)]) -> String {
        let translated = self.translate(template);
        let mut out = String::with_capacity(translated.len());
        let mut rest = translated.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let name = &after[..close];
                args.iter().find(|(n, _)| *n == name).map(|(_, value)| (close, *value))
            });

            match arg {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
