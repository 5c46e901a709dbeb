//! Repeated-block expansion (`{{#NAME}} ... {{/NAME}}`)

use super::containers::remove_blank_field;
use super::placeholder::substitute;
use crate::template::values::{is_blank, FieldValues};
use regex::{Regex, RegexBuilder};

/// Build the matcher for one named block region
///
/// Non-greedy and case-insensitive, with `.` spanning newlines, so the first
/// open marker pairs with the nearest close marker.
fn block_pattern(name: &str) -> Option<Regex> {
    let name = regex::escape(name.trim());
    RegexBuilder::new(&format!(
        r"\{{\{{\s*#{name}\s*\}}\}}(.*?)\{{\{{\s*/{name}\s*\}}\}}"
    ))
    .case_insensitive(true)
    .dot_matches_new_line(true)
    .build()
    .map_err(|e| log::warn!("Skipping block '{}': {}", name, e))
    .ok()
}

/// Expand the first `{{#NAME}}...{{/NAME}}` region once per row
///
/// The whole region, markers included, is replaced by the concatenated row
/// fragments. An empty row sequence removes the region entirely. A document
/// without a complete region is returned unchanged.
pub fn expand_block(document: &str, name: &str, rows: &[FieldValues]) -> String {
    let Some(pattern) = block_pattern(name) else {
        return document.to_string();
    };
    let Some(caps) = pattern.captures(document) else {
        log::debug!("Block '{}' not found in template", name);
        return document.to_string();
    };
    let (Some(region), Some(inner)) = (caps.get(0), caps.get(1)) else {
        return document.to_string();
    };

    let mut expanded = String::new();
    for row in rows {
        expanded.push_str(&render_row(inner.as_str(), row));
    }

    let mut output = String::with_capacity(document.len() + expanded.len());
    output.push_str(&document[..region.start()]);
    output.push_str(&expanded);
    output.push_str(&document[region.end()..]);
    output
}

/// Render one row of a block body
fn render_row(inner: &str, row: &FieldValues) -> String {
    let mut fragment = inner.to_string();

    for (tag, value) in row.iter() {
        if is_blank(value) {
            fragment = remove_blank_field(&fragment, tag);
        }
    }

    strip_blank_lines(&substitute(&fragment, row))
}

/// Drop lines that contain only whitespace
fn strip_blank_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}
