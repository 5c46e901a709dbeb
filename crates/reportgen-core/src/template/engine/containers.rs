//! Removal of markup around blank fields

use super::placeholder::tag_pattern;
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use std::sync::OnceLock;

/// Opening tag of an element that may be dropped with its blank field
fn container_open() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"<(div|p|span|li)\b[^>]*>")
            .case_insensitive(true)
            .build()
            .expect("container pattern is valid")
    })
}

fn container_close(name: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"</{}\s*>", regex::escape(name)))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Remove every occurrence of `{{tag}}` together with its innermost container
///
/// Falls back to deleting the bare placeholder when no container encloses it.
pub(crate) fn remove_blank_field(fragment: &str, tag: &str) -> String {
    let Some(placeholder) = tag_pattern(tag) else {
        return fragment.to_string();
    };

    let mut output = fragment.to_string();
    while let Some(found) = placeholder.find(&output) {
        let range = enclosing_container(&output, found.range()).unwrap_or(found.range());
        output.replace_range(range, "");
    }
    output
}

/// Byte range of the innermost container element around `placeholder`
///
/// Candidates are the container openings before the placeholder, nearest
/// first. A candidate qualifies when it is not closed before the placeholder
/// and a matching close tag follows it.
fn enclosing_container(text: &str, placeholder: Range<usize>) -> Option<Range<usize>> {
    let openings: Vec<(Range<usize>, String)> = container_open()
        .captures_iter(&text[..placeholder.start])
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            Some((whole.range(), name))
        })
        .collect();

    for (opening, name) in openings.into_iter().rev() {
        let close = container_close(&name)?;
        if close.is_match(&text[opening.end..placeholder.start]) {
            continue;
        }
        if let Some(end) = close.find(&text[placeholder.end..]) {
            return Some(opening.start..placeholder.end + end.end());
        }
    }
    None
}
