//! Options store backing dynamic dropdown values
//!
//! A catalog maps field names to their allowed values. A field may declare
//! `dependsOn`, in which case each value lists the parent values it is
//! allowed under.
//!
//! ```json
//! {
//!   "brand": { "options": ["Ford", "Toyota"] },
//!   "model": {
//!     "dependsOn": "brand",
//!     "options": [{ "value": "Corolla", "parents": ["Toyota"] }]
//!   }
//! }
//! ```

mod model;
mod store;

pub use model::{CatalogEntry, FieldOptions, OptionEntry, OptionsCatalog};
pub use store::{AddOutcome, OptionsStore};
