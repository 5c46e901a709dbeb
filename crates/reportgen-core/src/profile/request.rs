//! Assembling a render from a profile and collected values

use super::model::{FieldConfig, Profile, TableConfig};
use crate::error::{ReportgenError, Result};
use crate::template::{Block, FieldValues, TemplateEngine};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Automatic tag holding the profile name
pub const TEMPLATE_NAME_TAG: &str = "TEMPLATE_NAME";

/// Field type whose values are reformatted by [`ReportRequest::format_dates`]
pub const DATE_FIELD_TYPE: &str = "DATE";

/// How the host hands over date values
const ISO_DATE: &str = "%Y-%m-%d";

/// Values collected by the host for one report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub fields: FieldValues,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<FieldValues>>,
}

impl ReportData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            ReportgenError::Generic(format!("Invalid report data {}: {}", path.display(), e))
        })
    }
}

/// A profile plus the values to fill it with
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub profile: Profile,
    pub profile_path: PathBuf,
    pub fields: FieldValues,
    pub tables: Vec<Block>,
}

impl ReportRequest {
    pub fn new(profile: Profile, profile_path: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            profile_path: profile_path.into(),
            fields: FieldValues::new(),
            tables: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: FieldValues) -> Self {
        self.fields = fields;
        self
    }

    /// Set the rows of one table, replacing earlier rows for the same name
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<FieldValues>) -> Self {
        let name = name.into();
        self.tables.retain(|b| !b.name.eq_ignore_ascii_case(&name));
        self.tables.push(Block::new(name, rows));
        self
    }

    pub fn with_data(self, data: ReportData) -> Self {
        let mut request = self.with_fields(data.fields);
        for (name, rows) in data.tables {
            request = request.with_table(name, rows);
        }
        request
    }

    /// Rewrite ISO `YYYY-MM-DD` values of `DATE` fields and columns using
    /// `format` (a chrono format string)
    ///
    /// Values that are not ISO dates are left as typed.
    pub fn format_dates(mut self, format: &str) -> Self {
        reformat_dates(&mut self.fields, &self.profile.simple_fields, format);
        for block in &mut self.tables {
            let Some(table) = self.profile.table(&block.name) else {
                continue;
            };
            for row in &mut block.rows {
                reformat_dates(row, &table.columns, format);
            }
        }
        self
    }

    /// Simple fields as rendered
    ///
    /// Declared fields without a value render empty, and `TEMPLATE_NAME`
    /// defaults to the profile name.
    pub fn resolved_fields(&self) -> FieldValues {
        let mut fields = self.fields.clone();
        for field in &self.profile.simple_fields {
            if !fields.contains(&field.tag) {
                fields.insert(field.tag.clone(), None);
            }
        }
        fields.insert_if_absent(TEMPLATE_NAME_TAG, self.profile.display_name());
        fields
    }

    /// Blocks in expansion order
    ///
    /// Tables declared by the profile come first, in declaration order, with
    /// missing or disabled cells blanked. Undeclared tables follow in the
    /// order they were supplied.
    pub fn resolved_blocks(&self) -> Vec<Block> {
        let supplied = |name: &str| {
            self.tables
                .iter()
                .find(|b| b.name.eq_ignore_ascii_case(name))
        };

        let mut blocks: Vec<Block> = self
            .profile
            .tables
            .iter()
            .map(|table| {
                let rows = supplied(&table.table_name)
                    .map(|b| b.rows.iter().map(|row| prepare_row(table, row)).collect())
                    .unwrap_or_default();
                Block::new(table.table_name.clone(), rows)
            })
            .collect();

        blocks.extend(
            self.tables
                .iter()
                .filter(|b| self.profile.table(&b.name).is_none())
                .cloned(),
        );
        blocks
    }

    /// Render against an already-loaded template
    pub fn render_template(&self, template: &str) -> String {
        TemplateEngine::new().render(template, &self.resolved_fields(), &self.resolved_blocks())
    }

    /// Load the profile's template and render it
    pub fn render(&self) -> Result<String> {
        self.render_from(&self.profile.template_file(&self.profile_path))
    }

    /// Render using the template at `template_path` instead of the one next
    /// to the profile
    pub fn render_from(&self, template_path: &Path) -> Result<String> {
        log::debug!(
            "Rendering '{}' with {}",
            self.profile.display_name(),
            template_path.display()
        );
        let html = TemplateEngine::new().render_file(
            template_path,
            &self.resolved_fields(),
            &self.resolved_blocks(),
        )?;
        Ok(html)
    }
}

fn reformat_dates(values: &mut FieldValues, configs: &[FieldConfig], format: &str) {
    for config in configs {
        if !config.field_type.eq_ignore_ascii_case(DATE_FIELD_TYPE) {
            continue;
        }
        let Some(raw) = values.get(&config.tag) else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), ISO_DATE) {
            let formatted = date.format(format).to_string();
            values.insert(config.tag.clone(), Some(formatted));
        }
    }
}

/// Fill declared columns missing from `row` and blank disabled ones
fn prepare_row(table: &TableConfig, row: &FieldValues) -> FieldValues {
    let mut prepared = row.clone();
    for column in &table.columns {
        if !prepared.contains(&column.tag) {
            prepared.insert(column.tag.clone(), None);
        } else if !column.is_enabled(row) {
            prepared.blank(&column.tag);
        }
    }
    prepared
}
