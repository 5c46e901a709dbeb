// Core modules
pub mod config;
pub mod error;
pub mod lock;
pub mod options;
pub mod profile;
pub mod sync;
pub mod template;

// Re-export commonly used types
pub use error::{ReportgenError, Result};
pub use options::{AddOutcome, OptionsCatalog, OptionsStore};
pub use sync::{ConnectionState, SyncStatus};
pub use template::{Block, FieldValues, TemplateEngine};
