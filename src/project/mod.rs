//! Project state: the compiled snapshot and the asset index.
//!
//! A [`Snapshot`] is the immutable unit the analyses run against: parsed
//! trees, per-file resolution results, the shared type/object tables, the
//! fixed vocabulary, and the asset index. Snapshots are assembled by the
//! compiler adapter through [`SnapshotBuilder`] and never mutated after
//! [`SnapshotBuilder::finish`].

mod assets;
mod snapshot;

pub use assets::{AssetIndex, ResourceKind, ResourceUri};
pub use snapshot::{FileRole, ParsedFile, Snapshot, SnapshotBuilder, PROGRAM_FILE};
