//! Report profiles
//!
//! A profile names a template and declares the simple fields and tables a
//! report is built from. Profiles are produced elsewhere and read here as
//! already-valid JSON.

mod model;
mod request;

pub use model::{EnabledIf, FieldConfig, Profile, TableConfig};
pub use request::{ReportData, ReportRequest, DATE_FIELD_TYPE, TEMPLATE_NAME_TAG};
