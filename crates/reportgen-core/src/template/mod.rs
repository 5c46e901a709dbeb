//! Template module - HTML report filling
//!
//! Turns an HTML document containing placeholder tags and repeated-block
//! markers into a finished report.
//!
//! ## Syntax
//!
//! - Scalar placeholders: `{{TAG}}` or `{{ TAG }}`, matched case-insensitively
//! - Repeated blocks: `{{#NAME}} ... {{/NAME}}`, expanded once per data row
//!
//! Replacement text is inserted literally: values are never re-scanned for
//! placeholders and HTML-significant characters are not escaped.
//!
//! ## Known limitations
//!
//! - Blocks do not nest, and only the first block with a given name is expanded.
//! - Blank-field cleanup removes the innermost `div`, `p`, `span` or `li`
//!   element around the placeholder. It is a textual heuristic and does not
//!   understand nested elements of the same name.
//! - Simple fields are substituted before blocks are expanded. A simple-field
//!   value that itself reads `{{COL}}` and sits inside a block region is
//!   therefore filled again with the row's `COL` value.

pub mod document;
pub mod engine;
pub mod error;
pub mod values;

pub use document::TemplateDocument;
pub use engine::{expand_block, render, substitute, TemplateEngine};
pub use error::TemplateError;
pub use values::{Block, FieldValues};
