//! CLI command implementations

pub mod options;
pub mod render;
pub mod status;
