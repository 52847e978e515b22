//! Async/deferred hygiene rules (EC0701-EC0704).
//!
//! The framework's deferred-result type replaces the native async
//! primitive, which makes three mistakes easy: fire-and-forget async
//! declarations, silently dropped deferred results, and suspension points
//! that outlive a cancelled operation. Each sub-check walks the host-bound
//! body shapes and reports per site.

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{
    AwaitPoint, CallExpr, ExprNode, LambdaBody, MemberDeclaration, Name, Stmt, TypeDeclaration,
};

use crate::classify::WellKnown;
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::all();

/// EC0701: an async declaration must return a real deferred result, not a
/// fire-and-forget shape the caller cannot observe.
pub fn check_async_shapes(cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
    for member in &decl.members {
        let Some(sig) = member.method_sig() else {
            continue;
        };
        if sig.is_async && (member.ty == wk.void || member.ty == wk.deferred_void) {
            cx.report(
                DiagnosticRecord::error(RuleCode::EC0701, member.span)
                    .with_arg(qualified(cx, decl, member))
                    .with_arg(cx.display(member.ty)),
            );
        }
    }
}

/// EC0702: a deferred-returning call used as a bare statement inside a
/// synchronous method or a synchronous single-expression callback drops
/// its result.
pub fn check_deferred_drops(cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
    for member in &decl.members {
        let Some(sig) = member.method_sig() else {
            continue;
        };
        let Some(body) = &sig.body else {
            continue;
        };
        drop_walk_block(cx, wk, &body.statements, sig.is_async);
    }
}

fn drop_walk_block(cx: &RuleContext<'_>, wk: &WellKnown, stmts: &[Stmt], in_async: bool) {
    for stmt in stmts {
        match stmt {
            Stmt::Expr(expr) => {
                if !in_async {
                    if let ExprNode::Call(call) = expr {
                        if wk.is_deferred(call.returns) {
                            report_drop(cx, call);
                        }
                    }
                }
                drop_walk_expr(cx, wk, expr);
            }
            Stmt::Await(point) => {
                // The result is consumed by the await; only scan the
                // arguments for callbacks.
                for arg in &point.call.args {
                    drop_walk_expr(cx, wk, arg);
                }
            }
            Stmt::If(if_stmt) => {
                drop_walk_expr(cx, wk, &if_stmt.condition);
                drop_walk_block(cx, wk, &if_stmt.then_branch, in_async);
                drop_walk_block(cx, wk, &if_stmt.else_branch, in_async);
            }
            Stmt::Return | Stmt::Other => {}
        }
    }
}

fn drop_walk_expr(cx: &RuleContext<'_>, wk: &WellKnown, expr: &ExprNode) {
    match expr {
        ExprNode::Call(call) => {
            if let Some(receiver) = &call.receiver {
                drop_walk_expr(cx, wk, receiver);
            }
            for arg in &call.args {
                drop_walk_expr(cx, wk, arg);
            }
        }
        ExprNode::Member { receiver, .. } => drop_walk_expr(cx, wk, receiver),
        ExprNode::Lambda(lambda) => match &lambda.body {
            LambdaBody::Expr(inner) => {
                if !lambda.is_async {
                    if let ExprNode::Call(call) = inner.as_ref() {
                        if wk.is_deferred(call.returns) {
                            report_drop(cx, call);
                        }
                    }
                }
                drop_walk_expr(cx, wk, inner);
            }
            LambdaBody::Block(stmts) => drop_walk_block(cx, wk, stmts, lambda.is_async),
        },
        ExprNode::Ident(_) | ExprNode::Literal | ExprNode::Other => {}
    }
}

fn report_drop(cx: &RuleContext<'_>, call: &CallExpr) {
    cx.report(
        DiagnosticRecord::error(RuleCode::EC0702, call.span).with_arg(format!(
            "{}.{}",
            cx.display(call.callee),
            cx.display(call.method)
        )),
    );
}

/// EC0703/EC0704: in an async method that accepts a cancellation token,
/// every suspension point must forward that token (EC0704) and be
/// immediately followed by a conditional that checks the token and returns
/// (EC0703). Both sub-checks run per suspension point.
pub fn check_cancellation(cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
    for member in &decl.members {
        let Some(sig) = member.method_sig() else {
            continue;
        };
        if !sig.is_async {
            continue;
        }
        let Some(token) = sig.token_param(wk.cancel_token) else {
            continue;
        };
        let Some(body) = &sig.body else {
            continue;
        };
        cancel_walk_block(cx, wk, &body.statements, decl, member, token);
    }
}

fn cancel_walk_block(
    cx: &RuleContext<'_>,
    wk: &WellKnown,
    stmts: &[Stmt],
    decl: &TypeDeclaration,
    member: &MemberDeclaration,
    token: Name,
) {
    for (i, stmt) in stmts.iter().enumerate() {
        match stmt {
            Stmt::Await(point) => {
                if !forwards_token(point, token) {
                    cx.report(
                        DiagnosticRecord::error(RuleCode::EC0704, point.span)
                            .with_arg(format!(
                                "{}.{}",
                                cx.display(point.call.callee),
                                cx.display(point.call.method)
                            ))
                            .with_arg(cx.display(token)),
                    );
                }
                if !followed_by_cancel_check(wk, stmts.get(i + 1), token) {
                    cx.report(
                        DiagnosticRecord::error(RuleCode::EC0703, point.span)
                            .with_arg(qualified(cx, decl, member))
                            .with_arg(cx.display(token)),
                    );
                }
            }
            Stmt::If(if_stmt) => {
                cancel_walk_block(cx, wk, &if_stmt.then_branch, decl, member, token);
                cancel_walk_block(cx, wk, &if_stmt.else_branch, decl, member, token);
            }
            Stmt::Expr(_) | Stmt::Return | Stmt::Other => {}
        }
    }
}

/// The awaited call forwards the token when one of its arguments is the
/// token identifier itself.
fn forwards_token(point: &AwaitPoint, token: Name) -> bool {
    point
        .call
        .args
        .iter()
        .any(|arg| matches!(arg, ExprNode::Ident(name) if *name == token))
}

/// `if (token.IsCancelled()) { return; }` - as a call or a property-style
/// member read - immediately after the suspension point.
fn followed_by_cancel_check(wk: &WellKnown, next: Option<&Stmt>, token: Name) -> bool {
    let Some(Stmt::If(if_stmt)) = next else {
        return false;
    };
    if !matches!(if_stmt.then_branch.first(), Some(Stmt::Return)) {
        return false;
    }
    match &if_stmt.condition {
        ExprNode::Call(call) => {
            call.method == wk.is_cancelled
                && matches!(
                    call.receiver.as_deref(),
                    Some(ExprNode::Ident(name)) if *name == token
                )
        }
        ExprNode::Member { receiver, name } => {
            *name == wk.is_cancelled
                && matches!(receiver.as_ref(), ExprNode::Ident(n) if *n == token)
        }
        _ => false,
    }
}

fn qualified(cx: &RuleContext<'_>, decl: &TypeDeclaration, member: &MemberDeclaration) -> String {
    format!("{}.{}", cx.display(decl.name), cx.display(member.name))
}
