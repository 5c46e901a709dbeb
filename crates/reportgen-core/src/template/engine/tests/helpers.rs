//! Shared test helpers for template engine tests

use crate::template::values::FieldValues;

/// Header fields of a typical delivery note
pub(super) fn header_fields() -> FieldValues {
    FieldValues::new()
        .with("CLIENT", "ACME Corp")
        .with("DATE", "15/01/2026")
        .with("TEMPLATE_NAME", "Delivery note")
}

/// Build a row from `(tag, value)` pairs, with `None` for unset values
pub(super) fn row(pairs: &[(&str, Option<&str>)]) -> FieldValues {
    let mut values = FieldValues::new();
    for (tag, value) in pairs {
        values.insert(*tag, value.map(str::to_string));
    }
    values
}
