//! Scalar placeholder substitution

use crate::template::values::FieldValues;
use regex::{Captures, Regex, RegexBuilder};
use std::sync::OnceLock;

/// Matches any `{{TAG}}` that is not a block marker (`{{#..}}` / `{{/..}}`)
fn any_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([^{}#/\s][^{}]*?)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Build a case-insensitive matcher for one specific tag
///
/// Returns `None` only when the tag is too large for the regex engine.
pub(crate) fn tag_pattern(tag: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(tag.trim())))
        .case_insensitive(true)
        .build()
        .map_err(|e| log::warn!("Skipping tag '{}': {}", tag, e))
        .ok()
}

/// Replace every `{{TAG}}` whose tag is present in `values`
///
/// Single pass over the document, so replacement text is never re-scanned.
/// Unset values render as an empty string. Placeholders whose tag is absent
/// from `values` are left untouched.
pub fn substitute(document: &str, values: &FieldValues) -> String {
    if values.is_empty() {
        return document.to_string();
    }

    any_placeholder()
        .replace_all(document, |caps: &Captures| match values.lookup(&caps[1]) {
            Some(value) => value.unwrap_or_default().to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
