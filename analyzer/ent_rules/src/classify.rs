//! Symbol classifier: pure queries over declarations.
//!
//! Every rule starts here. The classifier owns the framework's well-known
//! names and answers "what is this type" questions from a declaration's
//! flattened base chain and its own (never inherited) annotations. All
//! functions are pure and thread-safe; they hold no state beyond the
//! pre-interned [`WellKnown`] table.

use ent_ir::{
    Annotation, Invocation, Name, SemanticModel, StringInterner, TypeDeclaration, TypeKind,
};

/// Qualified name of the framework's root entity base class.
pub const ENTITY_BASE: &str = "Core.Entity";
/// Qualified name of the framework's deferred-result type.
pub const DEFERRED: &str = "Core.Async.Deferred";
/// Fire-and-forget variant of the deferred-result type.
pub const DEFERRED_VOID: &str = "Core.Async.DeferredVoid";
/// Qualified name of the cooperative cancellation token.
pub const CANCEL_TOKEN: &str = "Core.Async.CancelToken";
/// The void return type as the host spells it.
pub const VOID: &str = "void";
/// Method the cancellation check calls on a token.
pub const IS_CANCELLED: &str = "IsCancelled";
/// The add-child method family on the entity base.
pub const ADD_CHILD_METHODS: &[&str] = &["AddChild", "AddChildWithId"];

/// The framework's well-known names, interned once per session.
#[derive(Copy, Clone, Debug)]
pub struct WellKnown {
    pub entity_base: Name,
    pub deferred: Name,
    pub deferred_void: Name,
    pub cancel_token: Name,
    pub void: Name,
    pub is_cancelled: Name,
    pub add_child: Name,
    pub add_child_with_id: Name,
}

impl WellKnown {
    /// Intern the well-known names.
    pub fn intern(interner: &StringInterner) -> Self {
        WellKnown {
            entity_base: interner.intern(ENTITY_BASE),
            deferred: interner.intern(DEFERRED),
            deferred_void: interner.intern(DEFERRED_VOID),
            cancel_token: interner.intern(CANCEL_TOKEN),
            void: interner.intern(VOID),
            is_cancelled: interner.intern(IS_CANCELLED),
            add_child: interner.intern(ADD_CHILD_METHODS[0]),
            add_child_with_id: interner.intern(ADD_CHILD_METHODS[1]),
        }
    }

    /// Whether a return type is one of the deferred-result shapes.
    #[inline]
    pub fn is_deferred(&self, ty: Name) -> bool {
        ty == self.deferred || ty == self.deferred_void
    }
}

/// Whether a declaration is an entity type: anything whose ancestor chain
/// contains the root entity base. The base itself is not an entity type.
#[inline]
pub fn is_entity_decl(wk: &WellKnown, decl: &TypeDeclaration) -> bool {
    decl.bases.contains(&wk.entity_base)
}

/// Whether the named type is an entity type in this compilation.
#[inline]
pub fn is_entity_type(model: &dyn SemanticModel, wk: &WellKnown, ty: Name) -> bool {
    model.type_decl(ty).is_some_and(|decl| is_entity_decl(wk, decl))
}

/// Whether a declaration is a static utility holder: a static class that is
/// never instantiated and participates in the dependency-cycle rule.
#[inline]
pub fn is_static_utility(decl: &TypeDeclaration) -> bool {
    decl.kind == TypeKind::Class && decl.is_static
}

/// The entity type a system declaration carries lifecycle logic for.
#[inline]
pub fn system_target(decl: &TypeDeclaration) -> Option<Name> {
    decl.annotations.iter().find_map(Annotation::entity_system_of)
}

/// Whether a declaration's own annotations grant friendship with `target`.
#[inline]
pub fn has_friend_of(decl: &TypeDeclaration, target: Name) -> bool {
    decl.annotations
        .iter()
        .any(|a| matches!(a, Annotation::FriendOf(t) if *t == target))
}

/// Whether an invocation is an add-child call: one of the add-child methods,
/// invoked on the entity base or a type derived from it.
pub fn is_add_child_call(model: &dyn SemanticModel, wk: &WellKnown, inv: &Invocation) -> bool {
    (inv.method == wk.add_child || inv.method == wk.add_child_with_id)
        && (inv.callee == wk.entity_base || is_entity_type(model, wk, inv.callee))
}

/// Outcome of resolving the child type at an add-child call site.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ChildResolution {
    /// The child type, from a generic argument or a supported argument shape.
    Resolved(Name),
    /// The first argument has a shape the resolver does not support; the
    /// interned source text identifies it in the diagnostic.
    Unsupported(Name),
    /// Nothing to resolve (no generic argument and no value argument).
    NoArgument,
}

/// Resolve the added child's type at an add-child call site.
///
/// A generic call names the child directly in its type argument. Otherwise
/// the first argument's host-bound shape supplies the type: a local,
/// parameter, field, property, or method result resolves to its declared
/// type; anything else is unsupported and itself a violation.
pub fn resolve_child_argument(inv: &Invocation) -> ChildResolution {
    if let Some(&ty) = inv.type_args.first() {
        return ChildResolution::Resolved(ty);
    }
    match inv.args.first() {
        Some(arg) => match arg.resolved_type() {
            Some(ty) => ChildResolution::Resolved(ty),
            None => match *arg {
                ent_ir::ArgExpr::Unsupported { text } => ChildResolution::Unsupported(text),
                // resolved_type covered every other shape
                _ => ChildResolution::NoArgument,
            },
        },
        None => ChildResolution::NoArgument,
    }
}

#[cfg(test)]
mod tests {
    use ent_ir::{ArgExpr, StringInterner};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::{resolve_child_argument, ChildResolution, WellKnown};
    use crate::test_helpers::{entity, invocation, snapshot, static_class};

    #[test]
    fn entity_and_utility_classification() {
        let interner = StringInterner::new();
        let wk = WellKnown::intern(&interner);
        let player = entity(&interner, "Game.Player");
        let helper = static_class(&interner, "Game.MoveHelper");

        assert!(super::is_entity_decl(&wk, &player));
        assert!(!super::is_entity_decl(&wk, &helper));
        assert!(super::is_static_utility(&helper));
        assert!(!super::is_static_utility(&player));

        let model = snapshot(vec![player, helper], vec![]);
        assert!(super::is_entity_type(
            &model,
            &wk,
            interner.intern("Game.Player")
        ));
        assert!(!super::is_entity_type(
            &model,
            &wk,
            interner.intern("Game.MoveHelper")
        ));
    }

    #[test]
    fn child_resolution_prefers_the_generic_argument() {
        let interner = StringInterner::new();
        let bag = interner.intern("Game.Bag");
        let mut inv = invocation(&interner, "Game.Scene", "Core.Entity", "AddChild", "AddChild()");
        inv.type_args = smallvec![bag];
        inv.args.push(ArgExpr::Local {
            name: interner.intern("x"),
            ty: interner.intern("Game.Other"),
        });
        assert_eq!(resolve_child_argument(&inv), ChildResolution::Resolved(bag));
    }

    #[test]
    fn child_resolution_walks_supported_argument_shapes() {
        let interner = StringInterner::new();
        let bag = interner.intern("Game.Bag");
        for arg in [
            ArgExpr::Local { name: interner.intern("b"), ty: bag },
            ArgExpr::Param { name: interner.intern("b"), ty: bag },
            ArgExpr::Field { name: interner.intern("b"), ty: bag },
            ArgExpr::Property { name: interner.intern("B"), ty: bag },
            ArgExpr::MethodReturn { method: interner.intern("MakeBag"), ty: bag },
        ] {
            let mut inv =
                invocation(&interner, "Game.Scene", "Core.Entity", "AddChild", "AddChild(b)");
            inv.args.push(arg);
            assert_eq!(resolve_child_argument(&inv), ChildResolution::Resolved(bag));
        }
    }

    #[test]
    fn child_resolution_flags_unsupported_shapes() {
        let interner = StringInterner::new();
        let text = interner.intern("list[0]");
        let mut inv =
            invocation(&interner, "Game.Scene", "Core.Entity", "AddChild", "AddChild(list[0])");
        inv.args.push(ArgExpr::Unsupported { text });
        assert_eq!(resolve_child_argument(&inv), ChildResolution::Unsupported(text));
    }

    #[test]
    fn child_resolution_skips_argumentless_calls() {
        let interner = StringInterner::new();
        let inv = invocation(&interner, "Game.Scene", "Core.Entity", "AddChild", "AddChild()");
        assert_eq!(resolve_child_argument(&inv), ChildResolution::NoArgument);
    }
}
