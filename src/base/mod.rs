//! Foundation types for the StageScript analyses.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other stagescript modules.

mod file_id;

pub use file_id::FileId;
pub use text_size::{TextRange, TextSize};

// Re-export the crate for callers that need the full API
pub use text_size;
