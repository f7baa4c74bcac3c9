//! Syntax: the arena-indexed AST handed over by the compiler.
//!
//! The analyses in [`crate::ide`] are read-only consumers of an
//! already-produced tree. Nodes live in a flat arena ([`SyntaxTree`]),
//! are addressed by [`NodeId`], and carry exact source spans as
//! [`TextRange`](crate::base::TextRange). Parent back-links are computed
//! once when the tree is sealed, so ancestor walks are O(depth).
//!
//! [`TreeBuilder`] is the construction API used by the compiler adapter
//! and by tests; it performs no parsing itself.

mod ast;
mod builder;

pub use ast::{
    AssignOp, AssignStmt, BasicLit, BinOp, BinaryExpr, Block, CallExpr, ExprStmt, File, FuncDecl,
    FuncLit, Ident, IfStmt, IncDecStmt, LitKind, Node, NodeId, ParenExpr, RangeForStmt, ReturnStmt,
    SelectorExpr, SyntaxTree, UnaryExpr, UnaryOp, VarDecl,
};
pub use builder::TreeBuilder;

use crate::base::{TextRange, TextSize};

/// Shorthand for building a [`TextRange`] from raw byte offsets.
pub fn span(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}
