//! Interned file identifiers.

/// A compact identifier for a source file in a snapshot.
///
/// FileIds are assigned densely when a snapshot is built and are only
/// meaningful within that snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    /// Create a FileId from a raw index.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file#{}", self.0)
    }
}
