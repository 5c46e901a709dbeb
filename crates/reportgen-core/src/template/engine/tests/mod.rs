//! Tests for template engine
//!
//! Organized into focused submodules by concern.

use super::*;

// Test helper functions
mod helpers;
