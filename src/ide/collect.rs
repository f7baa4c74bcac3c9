//! File-wide input-slot collection.
//!
//! One walk over the syntax tree pairs call arguments with parameters,
//! turns assignment targets into address slots, and surfaces remaining
//! variable references. Each derived slot then gets its substitutable
//! names from the scope chain at its own position.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::hir::TypeId;
use crate::project::Snapshot;
use crate::syntax::{Node, NodeId};

use super::classify::{Classifier, TypeCategory};
use super::derive::{derive_address_slot, derive_value_slot, DeriveCtx};
use super::scope::scope_chain;
use super::slot::{InputSlot, SlotKind};

/// All input slots of `path`, in source order.
///
/// `None` when the file is unknown or its parse failed; an empty vector
/// when the file simply contains no editable positions.
pub fn collect_input_slots(snapshot: &Snapshot, path: &str) -> Option<Vec<InputSlot>> {
    let file = snapshot.file(path)?;
    let tree = file.tree.as_ref()?;
    let ctx = DeriveCtx { snapshot, path, tree, info: &file.info };

    let mut collector = Collector {
        ctx: &ctx,
        slots: Vec::new(),
        claimed: FxHashSet::default(),
    };
    collector.walk(tree.root());

    let mut slots = collector.slots;
    slots.sort_by_key(|slot| (slot.range.start(), slot.range.end()));

    let classifier = Classifier::new(&snapshot.types, &snapshot.vocab);
    for slot in &mut slots {
        let mut names: IndexSet<SmolStr> = IndexSet::new();
        for entry in scope_chain(snapshot, path, slot.range.start()) {
            let eligible = match slot.kind {
                SlotKind::Address => entry.assignable,
                SlotKind::Value => entry.value_ty.is_some_and(|ty| {
                    slot.accept == TypeCategory::Unknown
                        || classifier.classify(ty) == slot.accept
                }),
            };
            if eligible {
                names.insert(entry.local_name);
            }
        }
        slot.predefined_names = names.into_iter().collect();
    }

    tracing::debug!(path, slots = slots.len(), "collected input slots");
    Some(slots)
}

struct Collector<'a, 'c> {
    ctx: &'c DeriveCtx<'a>,
    slots: Vec<InputSlot>,
    /// Nodes already consumed by a slot; the walk does not descend into
    /// them, so a folded color call never also surfaces its components.
    claimed: FxHashSet<NodeId>,
}

impl Collector<'_, '_> {
    fn walk(&mut self, node: NodeId) {
        if self.claimed.contains(&node) {
            return;
        }
        let tree = self.ctx.tree;
        match tree.node(node) {
            Node::CallExpr(call) => self.visit_call(call),
            Node::AssignStmt(assign) => self.visit_assign(assign),
            Node::VarDecl(decl) => self.visit_var_decl(decl),
            Node::IncDecStmt(inc_dec) => self.address(inc_dec.expr),
            Node::RangeForStmt(range_for) if !range_for.define => {
                for target in [range_for.key, range_for.value].into_iter().flatten() {
                    self.address(target);
                }
            }
            Node::Ident(_) => {
                self.fallback_ident(node);
                return;
            }
            _ => {}
        }
        tree.node(node).for_each_child(|child| self.walk(child));
    }

    /// Pair arguments with parameters of the resolved callee. Pointer
    /// parameters take the argument by address; everything else is a
    /// value slot typed by the parameter.
    fn visit_call(&mut self, call: &crate::syntax::CallExpr) {
        let tree = self.ctx.tree;
        let snapshot = self.ctx.snapshot;
        let target = match tree.node(call.callee) {
            Node::Ident(_) => call.callee,
            Node::SelectorExpr(selector) => selector.sel,
            _ => return,
        };
        let Some(object_id) = self.ctx.info.use_of(target) else {
            return;
        };
        let object = snapshot.objects.get(object_id);
        let Some(sig) = snapshot.types.signature(object.ty) else {
            return;
        };
        for (index, &arg) in call.args.iter().enumerate() {
            // Receivers are implicit in both call shapes, so pairing
            // always skips a declared receiver parameter.
            let Some(param) = sig.param_for_arg(index, true) else {
                continue;
            };
            if snapshot.types.is_pointer(param.ty) {
                self.address(arg);
            } else {
                self.value(arg, Some(param.ty));
            }
        }
    }

    fn visit_assign(&mut self, assign: &crate::syntax::AssignStmt) {
        if assign.op.writes_lhs() {
            for &lhs in &assign.lhs {
                self.address(lhs);
            }
        }
        for (index, &rhs) in assign.rhs.iter().enumerate() {
            let declared = assign
                .lhs
                .get(index)
                .and_then(|&lhs| self.declared_type(lhs));
            self.value(rhs, declared);
        }
    }

    fn visit_var_decl(&mut self, decl: &crate::syntax::VarDecl) {
        for (index, &value) in decl.values.iter().enumerate() {
            let declared = decl
                .names
                .get(index)
                .and_then(|&name| self.declared_type(name));
            self.value(value, declared);
        }
    }

    /// A variable reference in plain expression position still reads as
    /// an editable value, even when its type has no category.
    fn fallback_ident(&mut self, node: NodeId) {
        let Some(object_id) = self.ctx.info.use_of(node) else {
            return;
        };
        let object = self.ctx.snapshot.objects.get(object_id);
        if object.is_var() {
            let classifier = Classifier::new(&self.ctx.snapshot.types, &self.ctx.snapshot.vocab);
            let slot = InputSlot::predefined(
                TypeCategory::Unknown,
                classifier.classify(object.ty),
                object.name.clone(),
                self.ctx.tree.range(node),
            );
            self.claimed.insert(node);
            self.slots.push(slot);
            return;
        }
        self.value(node, None);
    }

    fn value(&mut self, expr: NodeId, declared: Option<TypeId>) {
        if let Some(slot) = derive_value_slot(self.ctx, expr, declared) {
            self.claimed.insert(expr);
            self.slots.push(slot);
        }
    }

    fn address(&mut self, expr: NodeId) {
        if let Some(slot) = derive_address_slot(self.ctx, expr) {
            self.claimed.insert(expr);
            self.slots.push(slot);
        }
    }

    /// The type an assignment target declares for its paired value, from
    /// the recorded expression type or the target's object.
    fn declared_type(&self, ident: NodeId) -> Option<TypeId> {
        let info = self.ctx.info;
        info.type_of(ident).map(|tv| tv.ty).or_else(|| {
            info.object_of(ident)
                .map(|id| self.ctx.snapshot.objects.get(id).ty)
        })
    }
}
