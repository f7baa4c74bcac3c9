//! Position-sensitive scope resolution.
//!
//! Builds the chain of names visible at a byte position, from the
//! predeclared universe out to the innermost enclosing block. The chain
//! is an ordered union: each definition appears once, keyed by its
//! identity (scope path, qualified name, overload id), and an inner
//! declaration never removes the outer definition it shadows. Member
//! lookup prefers the shallowest embedding depth.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::TextSize;
use crate::hir::{ObjectId, ObjectKind, ScopePath, TypeId, TypeInfo};
use crate::project::Snapshot;
use crate::syntax::{AssignOp, Node, NodeId, SyntaxTree};

use super::position::node_path_at;

/// A resolved definition, identified by scope path and qualified name.
///
/// Members carry their owner (`Sprite.goto`); concrete overloads of a
/// dispatch member are distinguished by `overload_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Definition {
    pub scope: ScopePath,
    pub name: SmolStr,
    pub overload_id: Option<SmolStr>,
}

/// One name visible at a position.
#[derive(Clone, Debug)]
pub struct ScopeEntry {
    pub def: Definition,
    /// The unqualified name the position refers to the definition by.
    pub local_name: SmolStr,
    /// The value type, for names usable in value position (variables,
    /// constants, fields). `None` for functions and type names.
    pub value_ty: Option<TypeId>,
    /// Whether the name denotes assignable storage.
    pub assignable: bool,
}

/// All definitions visible at `offset` in `path`, outermost scope first.
///
/// Overload-dispatch members expand to one definition per concrete
/// overload. An unknown file degrades to the position-independent scopes;
/// a file whose parse failed additionally keeps its receiver scope.
pub fn definitions_at(snapshot: &Snapshot, path: &str, offset: TextSize) -> Vec<Definition> {
    scope_chain(snapshot, path, offset)
        .into_iter()
        .map(|entry| entry.def)
        .collect()
}

/// The scope chain at `offset` in `path`: builtin scope, runtime
/// package names, program globals, implicit-receiver members, then block
/// locals, deduplicated by definition identity. A block local that
/// shadows a builtin or global leaves the outer definition in the chain.
pub fn scope_chain(snapshot: &Snapshot, path: &str, offset: TextSize) -> Vec<ScopeEntry> {
    let mut levels: Vec<Vec<Candidate>> = Vec::new();

    levels.push(
        snapshot
            .vocab
            .builtins()
            .iter()
            .map(|&id| Candidate::Object(id))
            .collect(),
    );
    levels.push(
        snapshot
            .vocab
            .runtime_names()
            .into_iter()
            .map(Candidate::Object)
            .collect(),
    );
    levels.push(
        snapshot
            .program_globals()
            .iter()
            .map(|&id| Candidate::Object(id))
            .collect(),
    );

    if let Some(file) = snapshot.file(path) {
        let role = snapshot.role(path);
        levels.push(receiver_members(snapshot, snapshot.receiver_type(&role)));
        if let Some(tree) = &file.tree {
            levels.extend(local_levels(tree, &file.info, offset));
        }
    }

    let mut entries = Vec::new();
    let mut seen_defs: FxHashSet<Definition> = FxHashSet::default();
    for level in &levels {
        for candidate in level {
            candidate.expand(snapshot, &mut seen_defs, &mut entries);
        }
    }

    tracing::debug!(
        path,
        offset = u32::from(offset),
        entries = entries.len(),
        "resolved scope chain"
    );
    entries
}

/// A name before expansion into definitions. Struct fields are not arena
/// objects, so they carry their spec inline.
enum Candidate {
    Object(ObjectId),
    Field {
        scope: ScopePath,
        owner: SmolStr,
        name: SmolStr,
        ty: TypeId,
    },
}

impl Candidate {
    fn expand(
        &self,
        snapshot: &Snapshot,
        seen: &mut FxHashSet<Definition>,
        out: &mut Vec<ScopeEntry>,
    ) {
        let mut push = |def: Definition, local_name: SmolStr, value_ty, assignable| {
            if seen.insert(def.clone()) {
                out.push(ScopeEntry { def, local_name, value_ty, assignable });
            }
        };
        match self {
            Candidate::Object(id) => {
                let object = snapshot.objects.get(*id);
                if let ObjectKind::Func { overloads } = &object.kind {
                    if !overloads.is_empty() {
                        for &overload in overloads {
                            let concrete = snapshot.objects.get(overload);
                            push(
                                Definition {
                                    scope: concrete.scope,
                                    name: concrete.qualified_name(),
                                    overload_id: concrete.overload_id.clone(),
                                },
                                object.name.clone(),
                                None,
                                false,
                            );
                        }
                        return;
                    }
                }
                let value_ty = match object.kind {
                    ObjectKind::Var | ObjectKind::Const(_) | ObjectKind::Field => Some(object.ty),
                    ObjectKind::Func { .. } | ObjectKind::TypeName => None,
                };
                push(
                    Definition {
                        scope: object.scope,
                        name: object.qualified_name(),
                        overload_id: None,
                    },
                    object.name.clone(),
                    value_ty,
                    object.is_var(),
                );
            }
            Candidate::Field { scope, owner, name, ty } => {
                push(
                    Definition {
                        scope: *scope,
                        name: SmolStr::from(format!("{owner}.{name}")),
                        overload_id: None,
                    },
                    name.clone(),
                    Some(*ty),
                    true,
                );
            }
        }
    }
}

/// Members reachable on the implicit receiver: the root type's own
/// surface plus exported members of embedded types, breadth-first so the
/// shallowest embedding depth wins a name collision. Traversal stops at
/// receiver-boundary types; their own members still contribute.
fn receiver_members(snapshot: &Snapshot, root: TypeId) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
    let mut visited: FxHashSet<TypeId> = FxHashSet::default();
    let mut queue: VecDeque<(TypeId, bool)> = VecDeque::new();
    queue.push_back((root, true));

    while let Some((ty, is_root)) = queue.pop_front() {
        if !visited.insert(ty) {
            continue;
        }
        let Some(named) = snapshot.types.as_named(ty) else {
            continue;
        };
        for &method in &named.methods {
            let object = snapshot.objects.get(method);
            if !is_root && !object.exported {
                continue;
            }
            if seen.insert(object.name.clone()) {
                out.push(Candidate::Object(method));
            }
        }
        if let Some(strukt) = snapshot.types.underlying_struct(named.underlying) {
            for field in &strukt.fields {
                if !is_root && !field.exported {
                    continue;
                }
                if field.embedded {
                    if !named.receiver_boundary && snapshot.types.as_named(field.ty).is_some() {
                        queue.push_back((field.ty, false));
                    }
                    continue;
                }
                if seen.insert(field.name.clone()) {
                    out.push(Candidate::Field {
                        scope: named.scope,
                        owner: named.name.clone(),
                        name: field.name.clone(),
                        ty: field.ty,
                    });
                }
            }
        }
    }
    out
}

/// Block-local declaration levels along the path to `offset`, outermost
/// first. A declaration only becomes visible after its statement ends;
/// parameters of an enclosing function are visible throughout its body.
fn local_levels(tree: &SyntaxTree, info: &TypeInfo, offset: TextSize) -> Vec<Vec<Candidate>> {
    let mut levels = Vec::new();
    let path = node_path_at(tree, offset);
    for &node in path.iter().rev() {
        let mut level = Vec::new();
        match tree.node(node) {
            Node::File(file) => {
                collect_stmt_decls(tree, info, &file.stmts, offset, &mut level);
            }
            Node::Block(block) => {
                collect_stmt_decls(tree, info, &block.stmts, offset, &mut level);
            }
            Node::FuncDecl(decl) => {
                for &param in &decl.params {
                    push_def(tree, info, param, &mut level);
                }
            }
            Node::FuncLit(lit) => {
                for &param in &lit.params {
                    push_def(tree, info, param, &mut level);
                }
            }
            Node::RangeForStmt(range_for) if range_for.define => {
                for ident in [range_for.key, range_for.value].into_iter().flatten() {
                    push_def(tree, info, ident, &mut level);
                }
            }
            _ => {}
        }
        if !level.is_empty() {
            levels.push(level);
        }
    }
    levels
}

fn collect_stmt_decls(
    tree: &SyntaxTree,
    info: &TypeInfo,
    stmts: &[NodeId],
    offset: TextSize,
    out: &mut Vec<Candidate>,
) {
    for &stmt in stmts {
        if tree.range(stmt).end() > offset {
            continue;
        }
        match tree.node(stmt) {
            Node::VarDecl(decl) => {
                for &name in &decl.names {
                    push_def(tree, info, name, out);
                }
            }
            Node::AssignStmt(assign) if assign.op == AssignOp::Define => {
                for &lhs in &assign.lhs {
                    push_def(tree, info, lhs, out);
                }
            }
            _ => {}
        }
    }
}

fn push_def(tree: &SyntaxTree, info: &TypeInfo, ident: NodeId, out: &mut Vec<Candidate>) {
    if let Some(name) = tree.ident_name(ident) {
        if name == "_" {
            return;
        }
    }
    if let Some(object) = info.def_of(ident) {
        out.push(Candidate::Object(object));
    }
}
