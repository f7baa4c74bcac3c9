//! IDE analyses: position-sensitive definition resolution and input-slot
//! inference.
//!
//! Everything in this module is a pure function of a [`Snapshot`]
//! (plus a position), reached through [`Analysis`]:
//!
//! - [`Analysis::definitions`] — the names visible at a position, from
//!   the builtin universe through the implicit receiver down to block
//!   locals, deduplicated by definition identity with overload groups
//!   expanded
//! - [`Analysis::input_slots`] — the editable value and address
//!   positions of one document, typed by [`TypeCategory`] and annotated
//!   with substitutable in-scope names
//!
//! [`Snapshot`]: crate::project::Snapshot

mod analysis;
mod classify;
mod collect;
mod derive;
mod position;
mod resources;
mod scope;
mod slot;

pub use analysis::{Analysis, AnalysisHost, QueryError};
pub use classify::{Classifier, TypeCategory};
pub use collect::collect_input_slots;
pub use position::node_path_at;
pub use resources::{resolve_resource, sprite_context};
pub use scope::{definitions_at, scope_chain, Definition, ScopeEntry};
pub use slot::{ColorValue, InputKind, InputSlot, SlotInput, SlotKind, SlotValue};
