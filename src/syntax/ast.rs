//! AST node definitions and the node arena.

use smol_str::SmolStr;

use crate::base::TextRange;

/// Index of a node inside its [`SyntaxTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A source file: the ordered top-level statements and declarations.
///
/// StageScript files have an implicit entry body, so plain statements
/// (event-handler registrations, commands) appear at the top level next
/// to declarations.
#[derive(Clone, Debug)]
pub struct File {
    pub stmts: Vec<NodeId>,
}

/// `func name(params) { body }`
#[derive(Clone, Debug)]
pub struct FuncDecl {
    /// `Ident` node naming the function.
    pub name: NodeId,
    /// Parameter `Ident` nodes. Parameter types live in the type info.
    pub params: Vec<NodeId>,
    /// `Block` node.
    pub body: NodeId,
}

/// `var a, b T = x, y` — also used as a declaration statement inside blocks.
#[derive(Clone, Debug)]
pub struct VarDecl {
    /// Declared `Ident` nodes.
    pub names: Vec<NodeId>,
    /// Optional type expression (an `Ident` naming the type).
    pub ty: Option<NodeId>,
    /// Initializer expressions, possibly empty.
    pub values: Vec<NodeId>,
}

/// `{ stmts }`
#[derive(Clone, Debug)]
pub struct Block {
    pub stmts: Vec<NodeId>,
}

/// An expression used in statement position.
#[derive(Clone, Debug)]
pub struct ExprStmt {
    pub expr: NodeId,
}

/// Assignment operator, including the declaring form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=` — declares its left-hand names.
    Define,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
}

impl AssignOp {
    /// Whether the left-hand side is written through (simple or compound
    /// assignment). `:=` declares instead.
    pub fn writes_lhs(self) -> bool {
        !matches!(self, AssignOp::Define)
    }
}

/// `lhs op rhs` for any [`AssignOp`].
#[derive(Clone, Debug)]
pub struct AssignStmt {
    pub op: AssignOp,
    pub lhs: Vec<NodeId>,
    pub rhs: Vec<NodeId>,
}

/// `x++` / `x--`
#[derive(Clone, Debug)]
pub struct IncDecStmt {
    pub expr: NodeId,
    /// true for `++`, false for `--`.
    pub inc: bool,
}

/// `for key, value <- subject { body }` (range clause).
#[derive(Clone, Debug)]
pub struct RangeForStmt {
    pub key: Option<NodeId>,
    pub value: Option<NodeId>,
    pub subject: NodeId,
    pub body: NodeId,
    /// Whether the clause declares its key/value names.
    pub define: bool,
}

/// `if cond { .. } else ..`
#[derive(Clone, Debug)]
pub struct IfStmt {
    pub cond: NodeId,
    pub then_block: NodeId,
    /// Either a `Block` or another `IfStmt`.
    pub else_branch: Option<NodeId>,
}

/// `return results`
#[derive(Clone, Debug)]
pub struct ReturnStmt {
    pub results: Vec<NodeId>,
}

/// An identifier token.
#[derive(Clone, Debug)]
pub struct Ident {
    pub name: SmolStr,
}

impl Ident {
    /// The blank placeholder name.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// The lexical kind of a basic literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    String,
    Char,
}

/// A basic literal with its raw source text (quotes and radix prefixes
/// included).
#[derive(Clone, Debug)]
pub struct BasicLit {
    pub kind: LitKind,
    pub text: SmolStr,
}

/// Unary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+`
    Pos,
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `^` (bitwise complement)
    BitNot,
}

/// `op operand`
#[derive(Clone, Debug)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: NodeId,
}

/// Binary operator. The slot analyses never fold binary expressions; the
/// operator is carried for completeness of the handed-over tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// `lhs op rhs`
#[derive(Clone, Debug)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub lhs: NodeId,
    pub rhs: NodeId,
}

/// `( expr )`
#[derive(Clone, Debug)]
pub struct ParenExpr {
    pub expr: NodeId,
}

/// `recv.sel`
#[derive(Clone, Debug)]
pub struct SelectorExpr {
    pub recv: NodeId,
    /// `Ident` node for the selected member.
    pub sel: NodeId,
}

/// `callee(args)` — command-style calls without parentheses arrive in the
/// same shape.
#[derive(Clone, Debug)]
pub struct CallExpr {
    pub callee: NodeId,
    pub args: Vec<NodeId>,
}

/// `(params) => { body }` — a closure literal, e.g. an event-handler body.
#[derive(Clone, Debug)]
pub struct FuncLit {
    pub params: Vec<NodeId>,
    pub body: NodeId,
}

/// One AST node. A closed sum so the analyses can match exhaustively with
/// an explicit unhandled arm.
#[derive(Clone, Debug)]
pub enum Node {
    File(File),
    FuncDecl(FuncDecl),
    VarDecl(VarDecl),
    Block(Block),
    ExprStmt(ExprStmt),
    AssignStmt(AssignStmt),
    IncDecStmt(IncDecStmt),
    RangeForStmt(RangeForStmt),
    IfStmt(IfStmt),
    ReturnStmt(ReturnStmt),
    Ident(Ident),
    BasicLit(BasicLit),
    UnaryExpr(UnaryExpr),
    BinaryExpr(BinaryExpr),
    ParenExpr(ParenExpr),
    SelectorExpr(SelectorExpr),
    CallExpr(CallExpr),
    FuncLit(FuncLit),
}

impl Node {
    /// Visit every direct child, in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        match self {
            Node::File(n) => n.stmts.iter().copied().for_each(&mut f),
            Node::FuncDecl(n) => {
                f(n.name);
                n.params.iter().copied().for_each(&mut f);
                f(n.body);
            }
            Node::VarDecl(n) => {
                n.names.iter().copied().for_each(&mut f);
                if let Some(ty) = n.ty {
                    f(ty);
                }
                n.values.iter().copied().for_each(&mut f);
            }
            Node::Block(n) => n.stmts.iter().copied().for_each(&mut f),
            Node::ExprStmt(n) => f(n.expr),
            Node::AssignStmt(n) => {
                n.lhs.iter().copied().for_each(&mut f);
                n.rhs.iter().copied().for_each(&mut f);
            }
            Node::IncDecStmt(n) => f(n.expr),
            Node::RangeForStmt(n) => {
                if let Some(k) = n.key {
                    f(k);
                }
                if let Some(v) = n.value {
                    f(v);
                }
                f(n.subject);
                f(n.body);
            }
            Node::IfStmt(n) => {
                f(n.cond);
                f(n.then_block);
                if let Some(e) = n.else_branch {
                    f(e);
                }
            }
            Node::ReturnStmt(n) => n.results.iter().copied().for_each(&mut f),
            Node::Ident(_) | Node::BasicLit(_) => {}
            Node::UnaryExpr(n) => f(n.operand),
            Node::BinaryExpr(n) => {
                f(n.lhs);
                f(n.rhs);
            }
            Node::ParenExpr(n) => f(n.expr),
            Node::SelectorExpr(n) => {
                f(n.recv);
                f(n.sel);
            }
            Node::CallExpr(n) => {
                f(n.callee);
                n.args.iter().copied().for_each(&mut f);
            }
            Node::FuncLit(n) => {
                n.params.iter().copied().for_each(&mut f);
                f(n.body);
            }
        }
    }
}

/// An immutable, sealed syntax tree.
///
/// Built once per compiled snapshot by [`super::TreeBuilder`]; parent
/// back-links are computed at seal time.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub(super) nodes: Vec<Node>,
    pub(super) ranges: Vec<TextRange>,
    pub(super) parents: Vec<Option<NodeId>>,
    pub(super) root: NodeId,
}

impl SyntaxTree {
    /// The root `File` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.ranges[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    /// Walk from a node towards the root, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The identifier text of a node, if it is an `Ident`.
    pub fn ident_name(&self, id: NodeId) -> Option<&SmolStr> {
        match self.node(id) {
            Node::Ident(ident) => Some(&ident.name),
            _ => None,
        }
    }
}
