//! The host/snapshot analysis entry points.
//!
//! [`AnalysisHost`] owns the current snapshot; [`Analysis`] is a cheap
//! handle pinned to one snapshot, so in-flight queries are never affected
//! by a concurrent snapshot swap.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::base::TextSize;
use crate::project::{Snapshot, SnapshotBuilder};

use super::collect::collect_input_slots;
use super::scope::{definitions_at, Definition};
use super::slot::InputSlot;

/// A query was malformed before any analysis could run.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("expected exactly one document, got {0}")]
    ExpectedOneDocument(usize),
    #[error("unknown document: {0}")]
    FileNotFound(String),
}

/// Owns the snapshot the editor is currently analyzing.
pub struct AnalysisHost {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// A host over an empty snapshot (vocabulary only, no files).
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(SnapshotBuilder::new().finish())),
        }
    }

    /// Install a freshly compiled snapshot. Analyses already pinned to
    /// the previous snapshot keep running against it.
    pub fn set_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.write() = Arc::new(snapshot);
        tracing::debug!("snapshot installed");
    }

    /// A handle pinned to the current snapshot.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            snapshot: Arc::clone(&self.snapshot.read()),
        }
    }
}

/// A read-only view over one snapshot.
pub struct Analysis {
    snapshot: Arc<Snapshot>,
}

impl Analysis {
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// All definitions visible at a position, outermost scope first,
    /// with dispatch members expanded per overload.
    pub fn definitions(&self, path: &str, offset: TextSize) -> Vec<Definition> {
        definitions_at(&self.snapshot, path, offset)
    }

    /// The input slots of a single document.
    ///
    /// The query addresses documents by path and requires exactly one.
    /// `Ok(None)` means the document is known but its parse failed, so no
    /// slot information exists.
    pub fn input_slots(&self, docs: &[&str]) -> Result<Option<Vec<InputSlot>>, QueryError> {
        let [path] = docs else {
            return Err(QueryError::ExpectedOneDocument(docs.len()));
        };
        if self.snapshot.file(path).is_none() {
            return Err(QueryError::FileNotFound(path.to_string()));
        }
        Ok(collect_input_slots(&self.snapshot, path))
    }
}
