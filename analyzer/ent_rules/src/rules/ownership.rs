//! Ownership and lifecycle shape rules (EC0101-EC0106).
//!
//! Entities compose by child attachment, not by inheritance or direct
//! state sharing. These rules pin that down at every add-child call site
//! and on every entity declaration.

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{Annotation, Invocation, MemberAccess, MemberKind, TypeDeclaration, TypeKind};

use crate::classify::{
    is_add_child_call, is_entity_decl, resolve_child_argument, ChildResolution, WellKnown,
};
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::MODEL;

/// EC0101/EC0102: the child added at an add-child call site must carry no
/// `ChildOf`, or one naming exactly the statically known receiver type.
pub fn check_add_child(cx: &RuleContext<'_>, wk: &WellKnown, inv: &Invocation) {
    if !is_add_child_call(cx.model, wk, inv) {
        return;
    }
    let child = match resolve_child_argument(inv) {
        ChildResolution::Resolved(child) => child,
        ChildResolution::Unsupported(text) => {
            cx.report(
                DiagnosticRecord::error(RuleCode::EC0102, inv.span).with_arg(cx.display(text)),
            );
            return;
        }
        ChildResolution::NoArgument => return,
    };
    // Unresolvable child type: host could not supply the declaration.
    let Some(child_decl) = cx.model.type_decl(child) else {
        return;
    };
    let Some(parent) = child_decl.declared_parent() else {
        return;
    };
    if parent != inv.callee {
        cx.report(
            DiagnosticRecord::error(RuleCode::EC0101, inv.span)
                .with_arg(cx.display(child))
                .with_arg(cx.display(parent))
                .with_arg(cx.display(inv.callee)),
        );
    }
}

/// EC0103: direct member access into the root entity base requires
/// `EnableAccessEntityChild` on the enclosing method or property.
pub fn check_entity_access(cx: &RuleContext<'_>, wk: &WellKnown, access: &MemberAccess) {
    if access.target != wk.entity_base {
        return;
    }
    // Accesses from inside the framework's own base are fine.
    if access.from == wk.entity_base {
        return;
    }
    let Some(enclosing) = access.enclosing_member else {
        return;
    };
    let Some(member) = cx.model.find_member(access.from, enclosing) else {
        return;
    };
    if member.has_annotation(|a| matches!(a, Annotation::EnableAccessEntityChild)) {
        return;
    }
    cx.report(DiagnosticRecord::error(RuleCode::EC0103, access.span).with_arg(cx.display(access.member)));
}

/// EC0104/EC0105/EC0106: declaration-shape checks on entity types.
///
/// Entities are data declarations: no methods (unless `EnableMethod`), no
/// delegate-typed members, no entity-typed instance fields referencing
/// other entities (static singletons excepted).
pub fn check_type_shape(cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
    if !is_entity_decl(wk, decl) {
        return;
    }
    for member in &decl.members {
        if member.is_synthesized {
            continue;
        }
        match &member.kind {
            MemberKind::Method(_) => {
                if !member.has_annotation(|a| matches!(a, Annotation::EnableMethod)) {
                    cx.report(
                        DiagnosticRecord::error(RuleCode::EC0104, member.span)
                            .with_arg(cx.display(decl.name))
                            .with_arg(cx.display(member.name)),
                    );
                }
            }
            MemberKind::Field | MemberKind::Property => {
                let member_ty = cx.model.type_decl(member.ty);
                if member_ty.is_some_and(|t| t.kind == TypeKind::Delegate) {
                    cx.report(
                        DiagnosticRecord::error(RuleCode::EC0105, member.span)
                            .with_arg(cx.display(decl.name))
                            .with_arg(cx.display(member.name)),
                    );
                } else if !member.is_static
                    && member.is_field()
                    && member_ty.is_some_and(|t| is_entity_decl(wk, t))
                {
                    cx.report(
                        DiagnosticRecord::error(RuleCode::EC0106, member.span)
                            .with_arg(cx.display(decl.name))
                            .with_arg(cx.display(member.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ent_diagnostic::RuleCode;
    use ent_ir::{Annotation, ArgExpr, MemberAccess, SemanticModel, SourceSpan, TypeKind};
    use pretty_assertions::assert_eq;

    use crate::test_helpers::{
        class, entity, field, invocation, method, run_rules, snapshot, Setup,
    };

    #[test]
    fn adding_a_declared_child_under_its_parent_is_clean() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut bag = entity(interner, "Game.Bag");
        bag.annotations
            .push(Annotation::ChildOf(interner.intern("Game.Player")));
        let player = entity(interner, "Game.Player");

        let mut inv = invocation(interner, "Game.Player", "Game.Player", "AddChild", "AddChild(bag)");
        inv.args.push(ArgExpr::Local {
            name: interner.intern("bag"),
            ty: interner.intern("Game.Bag"),
        });

        let model = snapshot(vec![bag, player], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_add_child(cx, wk, &inv);
        });
        assert_eq!(diags, vec![]);
    }

    #[test]
    fn adding_a_declared_child_elsewhere_names_both_types() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut bag = entity(interner, "Game.Bag");
        bag.annotations
            .push(Annotation::ChildOf(interner.intern("Game.Player")));
        let baz = entity(interner, "Game.Baz");

        let mut inv = invocation(interner, "Game.Baz", "Game.Baz", "AddChild", "AddChild(bag)");
        inv.args.push(ArgExpr::Local {
            name: interner.intern("bag"),
            ty: interner.intern("Game.Bag"),
        });

        let model = snapshot(vec![bag, baz], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_add_child(cx, wk, &inv);
        });
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, RuleCode::EC0101);
        assert_eq!(diags[0].args, vec!["Game.Bag", "Game.Player", "Game.Baz"]);
    }

    #[test]
    fn unannotated_children_attach_anywhere() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let bag = entity(interner, "Game.Bag");
        let scene = entity(interner, "Game.Scene");

        let mut inv = invocation(interner, "Game.Scene", "Game.Scene", "AddChild", "AddChild(bag)");
        inv.args.push(ArgExpr::Local {
            name: interner.intern("bag"),
            ty: interner.intern("Game.Bag"),
        });

        let model = snapshot(vec![bag, scene], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_add_child(cx, wk, &inv);
        });
        assert_eq!(diags, vec![]);
    }

    #[test]
    fn unsupported_child_argument_is_its_own_violation() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let scene = entity(interner, "Game.Scene");
        let mut inv =
            invocation(interner, "Game.Scene", "Game.Scene", "AddChild", "AddChild(list[0])");
        inv.args.push(ArgExpr::Unsupported {
            text: interner.intern("list[0]"),
        });

        let model = snapshot(vec![scene], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_add_child(cx, wk, &inv);
        });
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, RuleCode::EC0102);
    }

    #[test]
    fn entity_base_access_requires_the_enable_annotation() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut helper = class(interner, "Game.SceneHelper");
        let mut peek = method(interner, "Peek", "void");
        helper.members.push(peek.clone());

        let access = MemberAccess {
            from: interner.intern("Game.SceneHelper"),
            enclosing_member: Some(interner.intern("Peek")),
            target: interner.intern("Core.Entity"),
            member: interner.intern("children"),
            span: SourceSpan::DUMMY,
        };

        let model = snapshot(vec![helper.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_entity_access(cx, wk, &access);
        });
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, RuleCode::EC0103);

        // The annotation on the enclosing member suppresses the diagnostic.
        peek.annotations.push(Annotation::EnableAccessEntityChild);
        helper.members.clear();
        helper.members.push(peek);
        let model = snapshot(vec![helper], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_entity_access(cx, wk, &access);
        });
        assert_eq!(diags, vec![]);
    }

    #[test]
    fn entity_shape_violations_are_each_reported() {
        let setup = Setup::new();
        let interner = &setup.interner;

        let mut on_click = class(interner, "Game.OnClick");
        on_click.kind = TypeKind::Delegate;

        let mut player = entity(interner, "Game.Player");
        player.members.push(method(interner, "Tick", "void"));
        player
            .members
            .push(field(interner, "onClick", "Game.OnClick"));
        player.members.push(field(interner, "bag", "Game.Bag"));
        let bag = entity(interner, "Game.Bag");

        let model = snapshot(vec![player.clone(), bag, on_click], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_type_shape(cx, wk, model.type_decl(player.name).unwrap());
        });
        let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![RuleCode::EC0104, RuleCode::EC0105, RuleCode::EC0106]);
    }

    #[test]
    fn enable_method_and_static_singletons_are_exempt() {
        let setup = Setup::new();
        let interner = &setup.interner;

        let mut player = entity(interner, "Game.Player");
        let mut tick = method(interner, "Tick", "void");
        tick.annotations.push(Annotation::EnableMethod);
        player.members.push(tick);
        let mut instance = field(interner, "instance", "Game.Player");
        instance.is_static = true;
        player.members.push(instance);

        let model = snapshot(vec![player.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            super::check_type_shape(cx, wk, model.type_decl(player.name).unwrap());
        });
        assert_eq!(diags, vec![]);
    }
}
