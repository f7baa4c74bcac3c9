//! Resolved semantic model handed over by the compiler.
//!
//! The compiler (an external collaborator) resolves names and types and
//! hands the results over as plain tables:
//!
//! - [`TypeTable`] / [`ObjectTable`] — arenas of resolved types and
//!   declared objects, shared across all files of a snapshot
//! - [`TypeInfo`] — per-file maps from AST nodes to types, constant
//!   values, and defined/used objects
//! - [`Vocabulary`] — the fixed-identity runtime registry (entity base
//!   types, resource-name aliases, constant groups, color constructors),
//!   built once per snapshot and passed by reference into the analyses

mod objects;
mod typeinfo;
mod types;
pub mod vocab;

pub use objects::{ConstValue, Object, ObjectId, ObjectKind, ObjectTable, ScopePath};
pub use typeinfo::{TypeAndValue, TypeInfo};
pub use types::{
    AliasType, BasicKind, FieldSpec, NamedType, ParamSpec, Signature, StructType, Type, TypeId,
    TypeTable,
};
pub use vocab::{ColorConstructor, Vocabulary};
