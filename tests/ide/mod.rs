//! Analysis tests
//!
//! Tests for:
//! - Definitions visible at a position
//! - Input-slot inference

pub mod tests_definitions;
pub mod tests_input_slots;
