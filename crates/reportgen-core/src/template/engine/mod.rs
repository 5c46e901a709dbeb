//! Template engine implementation

mod blocks;
mod containers;
mod placeholder;

use crate::template::document::TemplateDocument;
use crate::template::error::TemplateError;
use crate::template::values::{Block, FieldValues};
use std::path::Path;

pub use blocks::expand_block;
pub use placeholder::substitute;

/// Template engine filling simple fields and repeated blocks
pub struct TemplateEngine;

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self
    }

    /// Render a template string
    ///
    /// Simple fields are substituted once over the whole document, then each
    /// block is expanded in the order given. Block order is the caller's
    /// responsibility, typically the declaration order of the profile.
    pub fn render(&self, document: &str, fields: &FieldValues, blocks: &[Block]) -> String {
        let mut output = substitute(document, fields);
        for block in blocks {
            output = expand_block(&output, &block.name, &block.rows);
        }
        output
    }

    /// Render a loaded template document
    pub fn render_document(
        &self,
        document: &TemplateDocument,
        fields: &FieldValues,
        blocks: &[Block],
    ) -> String {
        self.render(document.as_str(), fields, blocks)
    }

    /// Load and render a template file
    ///
    /// A missing or unreadable template is an error, never a blank report.
    pub fn render_file(
        &self,
        path: impl AsRef<Path>,
        fields: &FieldValues,
        blocks: &[Block],
    ) -> Result<String, TemplateError> {
        let document = TemplateDocument::load(path)?;
        Ok(self.render_document(&document, fields, blocks))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to render a template string
pub fn render(document: &str, fields: &FieldValues, blocks: &[Block]) -> String {
    TemplateEngine::new().render(document, fields, blocks)
}

#[cfg(test)]
mod tests;
