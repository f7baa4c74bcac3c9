//! Construction API for [`SyntaxTree`].
//!
//! The compiler adapter allocates nodes leaves-first and seals the tree
//! with [`TreeBuilder::finish`], which computes parent back-links in one
//! pass over the root's reachable children.

use smol_str::SmolStr;

use crate::base::TextRange;

use super::ast::*;

/// Incrementally allocates nodes into an arena and seals them into a
/// [`SyntaxTree`].
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    ranges: Vec<TextRange>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node, range: TextRange) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.ranges.push(range);
        id
    }

    pub fn ident(&mut self, name: impl Into<SmolStr>, range: TextRange) -> NodeId {
        self.push(Node::Ident(Ident { name: name.into() }), range)
    }

    pub fn basic_lit(
        &mut self,
        kind: LitKind,
        text: impl Into<SmolStr>,
        range: TextRange,
    ) -> NodeId {
        self.push(Node::BasicLit(BasicLit { kind, text: text.into() }), range)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId, range: TextRange) -> NodeId {
        self.push(Node::UnaryExpr(UnaryExpr { op, operand }), range)
    }

    pub fn binary(&mut self, op: BinOp, lhs: NodeId, rhs: NodeId, range: TextRange) -> NodeId {
        self.push(Node::BinaryExpr(BinaryExpr { op, lhs, rhs }), range)
    }

    pub fn paren(&mut self, expr: NodeId, range: TextRange) -> NodeId {
        self.push(Node::ParenExpr(ParenExpr { expr }), range)
    }

    pub fn selector(&mut self, recv: NodeId, sel: NodeId, range: TextRange) -> NodeId {
        self.push(Node::SelectorExpr(SelectorExpr { recv, sel }), range)
    }

    pub fn call(&mut self, callee: NodeId, args: Vec<NodeId>, range: TextRange) -> NodeId {
        self.push(Node::CallExpr(CallExpr { callee, args }), range)
    }

    pub fn func_lit(&mut self, params: Vec<NodeId>, body: NodeId, range: TextRange) -> NodeId {
        self.push(Node::FuncLit(FuncLit { params, body }), range)
    }

    pub fn block(&mut self, stmts: Vec<NodeId>, range: TextRange) -> NodeId {
        self.push(Node::Block(Block { stmts }), range)
    }

    pub fn expr_stmt(&mut self, expr: NodeId, range: TextRange) -> NodeId {
        self.push(Node::ExprStmt(ExprStmt { expr }), range)
    }

    pub fn assign(
        &mut self,
        op: AssignOp,
        lhs: Vec<NodeId>,
        rhs: Vec<NodeId>,
        range: TextRange,
    ) -> NodeId {
        self.push(Node::AssignStmt(AssignStmt { op, lhs, rhs }), range)
    }

    pub fn inc_dec(&mut self, expr: NodeId, inc: bool, range: TextRange) -> NodeId {
        self.push(Node::IncDecStmt(IncDecStmt { expr, inc }), range)
    }

    pub fn range_for(
        &mut self,
        key: Option<NodeId>,
        value: Option<NodeId>,
        subject: NodeId,
        body: NodeId,
        define: bool,
        range: TextRange,
    ) -> NodeId {
        self.push(
            Node::RangeForStmt(RangeForStmt { key, value, subject, body, define }),
            range,
        )
    }

    pub fn if_stmt(
        &mut self,
        cond: NodeId,
        then_block: NodeId,
        else_branch: Option<NodeId>,
        range: TextRange,
    ) -> NodeId {
        self.push(Node::IfStmt(IfStmt { cond, then_block, else_branch }), range)
    }

    pub fn return_stmt(&mut self, results: Vec<NodeId>, range: TextRange) -> NodeId {
        self.push(Node::ReturnStmt(ReturnStmt { results }), range)
    }

    pub fn var_decl(
        &mut self,
        names: Vec<NodeId>,
        ty: Option<NodeId>,
        values: Vec<NodeId>,
        range: TextRange,
    ) -> NodeId {
        self.push(Node::VarDecl(VarDecl { names, ty, values }), range)
    }

    pub fn func_decl(
        &mut self,
        name: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
        range: TextRange,
    ) -> NodeId {
        self.push(Node::FuncDecl(FuncDecl { name, params, body }), range)
    }

    /// Seal the arena with a `File` root and compute parent back-links.
    pub fn finish(mut self, stmts: Vec<NodeId>, file_range: TextRange) -> SyntaxTree {
        let root = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::File(File { stmts }));
        self.ranges.push(file_range);

        let mut parents = vec![None; self.nodes.len()];
        let mut work = vec![root];
        while let Some(id) = work.pop() {
            self.nodes[id.raw() as usize].for_each_child(|child| {
                parents[child.raw() as usize] = Some(id);
                work.push(child);
            });
        }

        SyntaxTree { nodes: self.nodes, ranges: self.ranges, parents, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::span;

    #[test]
    fn test_parent_links_computed_on_finish() {
        let mut b = TreeBuilder::new();
        let callee = b.ident("echo", span(0, 4));
        let arg = b.basic_lit(LitKind::Int, "1", span(5, 6));
        let call = b.call(callee, vec![arg], span(0, 6));
        let stmt = b.expr_stmt(call, span(0, 6));
        let tree = b.finish(vec![stmt], span(0, 7));

        assert_eq!(tree.parent(arg), Some(call));
        assert_eq!(tree.parent(callee), Some(call));
        assert_eq!(tree.parent(call), Some(stmt));
        assert_eq!(tree.parent(stmt), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_ancestors_innermost_first() {
        let mut b = TreeBuilder::new();
        let id = b.ident("x", span(0, 1));
        let stmt = b.expr_stmt(id, span(0, 1));
        let tree = b.finish(vec![stmt], span(0, 2));

        let chain: Vec<_> = tree.ancestors(id).collect();
        assert_eq!(chain, vec![id, stmt, tree.root()]);
    }
}
