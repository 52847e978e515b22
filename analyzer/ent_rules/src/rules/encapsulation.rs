//! Encapsulation rule (EC0201).
//!
//! Entity state is private to its declaring type. Friendship is explicit:
//! a `FriendOf` annotation on the accessing type, never implied - not even
//! for the entity's companion system types.

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::MemberAccess;

use crate::classify::{has_friend_of, is_entity_decl, WellKnown};
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::MODEL;

/// EC0201: a non-static field access on an entity type, from any type but
/// the declaring one, requires `FriendOf(declaring)` on the accessor.
pub fn check_field_access(cx: &RuleContext<'_>, wk: &WellKnown, access: &MemberAccess) {
    if access.from == access.target {
        return;
    }
    let Some(target_decl) = cx.model.type_decl(access.target) else {
        return;
    };
    if !is_entity_decl(wk, target_decl) {
        return;
    }
    let Some(member) = cx.model.find_member(access.target, access.member) else {
        return;
    };
    if !member.is_field() || member.is_static {
        return;
    }
    let Some(from_decl) = cx.model.type_decl(access.from) else {
        return;
    };
    if has_friend_of(from_decl, access.target) {
        return;
    }
    cx.report(
        DiagnosticRecord::error(RuleCode::EC0201, access.span)
            .with_arg(cx.display(access.from))
            .with_arg(cx.display(access.member))
            .with_arg(cx.display(access.target)),
    );
}
