//! Hot-reload state-ownership rule (EC0801).
//!
//! A hot-reloadable assembly is swapped out at runtime; any instance state
//! its types hold is orphaned by the swap. Logic types in those assemblies
//! must therefore stay stateless - durable state belongs on entities in
//! the model assemblies. Constants and static members survive a reload
//! (they are re-initialized deterministically) and are exempt.

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{MemberKind, TypeDeclaration, TypeKind};

use crate::classify::{is_entity_decl, WellKnown};
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::HOT_RELOAD;

/// EC0801: instance fields and properties on non-entity classes in a
/// hot-reloadable assembly.
pub fn check_hot_reload_state(cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
    if decl.kind != TypeKind::Class || is_entity_decl(wk, decl) {
        return;
    }
    for member in &decl.members {
        if member.is_synthesized || member.is_static || member.is_const {
            continue;
        }
        if matches!(member.kind, MemberKind::Field | MemberKind::Property) {
            cx.report(
                DiagnosticRecord::error(RuleCode::EC0801, member.span)
                    .with_arg(cx.display(decl.name))
                    .with_arg(cx.display(member.name)),
            );
        }
    }
}
