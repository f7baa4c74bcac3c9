//! Per-file resolution results: the `TypeOf`/`ObjectOf` collaborator
//! surface.

use rustc_hash::FxHashMap;

use crate::syntax::NodeId;

use super::objects::{ConstValue, ObjectId};
use super::types::TypeId;

/// The resolved type of an expression plus its constant value, if the
/// expression is constant.
#[derive(Clone, Debug)]
pub struct TypeAndValue {
    pub ty: TypeId,
    pub value: Option<ConstValue>,
}

/// Resolution results for one file.
///
/// Best-effort by contract: a file that failed to type-check still carries
/// whatever entries the compiler recovered, and every lookup returns
/// `Option`.
#[derive(Debug, Default)]
pub struct TypeInfo {
    types: FxHashMap<NodeId, TypeAndValue>,
    defs: FxHashMap<NodeId, ObjectId>,
    uses: FxHashMap<NodeId, ObjectId>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, node: NodeId, ty: TypeId, value: Option<ConstValue>) {
        self.types.insert(node, TypeAndValue { ty, value });
    }

    /// Record that an identifier node declares an object.
    pub fn record_def(&mut self, ident: NodeId, object: ObjectId) {
        self.defs.insert(ident, object);
    }

    /// Record that an identifier node refers to an object.
    pub fn record_use(&mut self, ident: NodeId, object: ObjectId) {
        self.uses.insert(ident, object);
    }

    pub fn type_of(&self, node: NodeId) -> Option<&TypeAndValue> {
        self.types.get(&node)
    }

    pub fn def_of(&self, ident: NodeId) -> Option<ObjectId> {
        self.defs.get(&ident).copied()
    }

    pub fn use_of(&self, ident: NodeId) -> Option<ObjectId> {
        self.uses.get(&ident).copied()
    }

    /// The object an identifier defines or refers to.
    pub fn object_of(&self, ident: NodeId) -> Option<ObjectId> {
        self.def_of(ident).or_else(|| self.use_of(ident))
    }
}
