//! # stagescript-base
//!
//! Core library for StageScript semantic analysis: position-sensitive
//! definition resolution and input-slot inference for the visual editor.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → analyses (definitions at a position, input slots)
//!   ↓
//! project   → compiled snapshots, file roles, asset index
//!   ↓
//! hir       → resolved semantic model (types, objects, vocabulary)
//!   ↓
//! syntax    → arena-indexed AST handed over by the compiler
//!   ↓
//! base      → primitives (FileId, TextRange)
//! ```
//!
//! Parsing and type checking happen in the external compiler; this crate
//! consumes its results through [`project::SnapshotBuilder`] and answers
//! editor queries through [`ide::AnalysisHost`].

// ============================================================================
// MODULES (dependency order: base → syntax → hir → project → ide)
// ============================================================================

/// Foundation types: FileId, TextRange
pub mod base;

/// Syntax: arena-indexed AST, spans, tree construction
pub mod syntax;

/// High-level IR: resolved types, objects, the runtime vocabulary
pub mod hir;

/// IDE features: definition resolution, input-slot inference
pub mod ide;

/// Project state: compiled snapshots, file roles, the asset index
pub mod project;

// Re-export foundation types
pub use base::{FileId, TextRange, TextSize};
