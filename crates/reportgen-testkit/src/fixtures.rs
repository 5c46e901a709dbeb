//! Sample files for report and catalog tests
//!
//! Every writer creates missing parent directories and returns the path of
//! the file it wrote.

use std::path::{Path, PathBuf};

/// Catalog with one independent and one dependent field
pub const SAMPLE_CATALOG: &str = r#"{
  "make": {
    "options": ["Toyota", "Ford"]
  },
  "model": {
    "dependsOn": "make",
    "options": [
      { "value": "Corolla", "parents": ["Toyota"] },
      { "value": "Focus", "parents": ["Ford"] },
      { "value": "Yaris", "parents": ["Toyota"] }
    ]
  },
  "version": 3
}"#;

/// Delivery-note template using a simple field, a repeated block and a
/// column that may be blanked
pub const SAMPLE_TEMPLATE: &str = r#"<html>
<body>
<h1>{{TEMPLATE_NAME}}</h1>
<p>Client: {{CLIENT}}</p>
<ul>
{{#ITEMS}}
<li>{{NAME}}<span> serial {{SERIAL}}</span></li>
{{/ITEMS}}
</ul>
</body>
</html>
"#;

/// Profile pointing at `delivery.html` next to it
pub const SAMPLE_PROFILE: &str = r#"{
  "profileName": "Delivery note",
  "templatePath": "delivery.html",
  "simpleFields": [
    { "tag": "CLIENT", "label": "Client", "type": "TEXT" }
  ],
  "tables": [
    {
      "tableName": "ITEMS",
      "columns": [
        { "tag": "NAME", "label": "Name", "type": "TEXT" },
        { "tag": "KIND", "label": "Kind", "type": "TEXT" },
        { "tag": "SERIAL", "label": "Serial", "type": "TEXT",
          "enabledIf": { "tag": "KIND", "values": ["Equipment"] } }
      ]
    }
  ]
}"#;

/// Values for [`SAMPLE_PROFILE`]
pub const SAMPLE_DATA: &str = r#"{
  "fields": { "CLIENT": "ACME" },
  "tables": {
    "ITEMS": [
      { "NAME": "Drill", "KIND": "Equipment", "SERIAL": "D-42" },
      { "NAME": "Gloves", "KIND": "Consumable", "SERIAL": "ignored" }
    ]
  }
}"#;

/// Write `content` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

pub fn write_catalog(dir: &Path, name: &str) -> PathBuf {
    write_file(dir, name, SAMPLE_CATALOG)
}

/// Write the sample profile, template and data into `dir`
///
/// Returns `(profile, data)` paths.
pub fn write_report_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    write_file(dir, "delivery.html", SAMPLE_TEMPLATE);
    let profile = write_file(dir, "delivery.json", SAMPLE_PROFILE);
    let data = write_file(dir, "data.json", SAMPLE_DATA);
    (profile, data)
}
