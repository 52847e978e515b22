//! Statement and expression shapes for method bodies.
//!
//! The hygiene rules need just enough body structure to walk suspension
//! points, bare expression statements and callbacks. Anything the rules do
//! not interpret is collapsed by the host into `Stmt::Other` /
//! `ExprNode::Other`, which every walker skips.

use crate::{Name, SourceSpan};

/// Body of a method the host supplied statements for.
#[derive(Clone, Debug, Default)]
pub struct MethodBody {
    pub statements: Vec<Stmt>,
}

/// One statement, reduced to the shapes the rules inspect.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// A bare expression statement.
    Expr(ExprNode),
    /// An awaited call used as a statement - a suspension point.
    Await(AwaitPoint),
    /// A conditional.
    If(IfStmt),
    /// A return (value irrelevant to the rules).
    Return,
    /// Declarations, loops, everything else.
    Other,
}

/// A suspension point: `await call(...)` as a statement.
#[derive(Clone, Debug)]
pub struct AwaitPoint {
    pub call: CallExpr,
    pub span: SourceSpan,
}

/// A conditional statement with its branch bodies.
#[derive(Clone, Debug)]
pub struct IfStmt {
    pub condition: ExprNode,
    pub then_branch: Vec<Stmt>,
    pub else_branch: Vec<Stmt>,
}

/// A bound call expression.
#[derive(Clone, Debug)]
pub struct CallExpr {
    /// Receiver expression, absent for static calls.
    pub receiver: Option<Box<ExprNode>>,
    /// Declaring type of the invoked method.
    pub callee: Name,
    pub method: Name,
    /// Resolved return type.
    pub returns: Name,
    pub args: Vec<ExprNode>,
    pub span: SourceSpan,
}

/// An expression, reduced to the shapes the rules inspect.
#[derive(Clone, Debug)]
pub enum ExprNode {
    /// A resolved local/parameter identifier.
    Ident(Name),
    /// Member access on a receiver.
    Member { receiver: Box<ExprNode>, name: Name },
    /// A call.
    Call(Box<CallExpr>),
    /// An inline callback.
    Lambda(Lambda),
    /// A literal of any kind.
    Literal,
    /// Anything else.
    Other,
}

/// An inline callback expression.
#[derive(Clone, Debug)]
pub struct Lambda {
    pub is_async: bool,
    pub body: LambdaBody,
    pub span: SourceSpan,
}

/// Body of a callback: a single expression or a statement block.
#[derive(Clone, Debug)]
pub enum LambdaBody {
    Expr(Box<ExprNode>),
    Block(Vec<Stmt>),
}
