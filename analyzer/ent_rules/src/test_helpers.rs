//! Shared fixtures for rule tests: an interner, declaration builders, and
//! a harness that runs a closure against a snapshot and flushes the sink.

use ent_diagnostic::{DiagnosticRecord, DiagnosticSink};
use ent_ir::{
    Compilation, ConstValue, Invocation, MemberDeclaration, MemberKind, MethodSig, SourceFile,
    SourceSpan, StringInterner, TypeDeclaration, TypeKind,
};
use smallvec::smallvec;

use crate::classify::WellKnown;
use crate::context::RuleContext;

pub struct Setup {
    pub interner: StringInterner,
}

impl Setup {
    pub fn new() -> Self {
        Setup {
            interner: StringInterner::new(),
        }
    }
}

fn bare_type(interner: &StringInterner, name: &str) -> TypeDeclaration {
    TypeDeclaration {
        name: interner.intern(name),
        kind: TypeKind::Class,
        is_static: false,
        bases: Vec::new(),
        capabilities: Vec::new(),
        annotations: Vec::new(),
        members: Vec::new(),
        spans: smallvec![SourceSpan::DUMMY],
    }
}

/// An entity type deriving from the framework base.
pub fn entity(interner: &StringInterner, name: &str) -> TypeDeclaration {
    let mut decl = bare_type(interner, name);
    decl.bases.push(interner.intern(crate::classify::ENTITY_BASE));
    decl
}

/// A plain, non-static class.
pub fn class(interner: &StringInterner, name: &str) -> TypeDeclaration {
    bare_type(interner, name)
}

/// A static utility class.
pub fn static_class(interner: &StringInterner, name: &str) -> TypeDeclaration {
    let mut decl = bare_type(interner, name);
    decl.is_static = true;
    decl
}

fn bare_member(interner: &StringInterner, name: &str, ty: &str) -> MemberDeclaration {
    MemberDeclaration {
        name: interner.intern(name),
        kind: MemberKind::Field,
        ty: interner.intern(ty),
        is_static: false,
        is_const: false,
        is_public: true,
        is_partial: false,
        is_synthesized: false,
        constant: None,
        annotations: Vec::new(),
        span: SourceSpan::DUMMY,
    }
}

/// An instance field.
pub fn field(interner: &StringInterner, name: &str, ty: &str) -> MemberDeclaration {
    bare_member(interner, name, ty)
}

/// An integer constant.
pub fn const_int(interner: &StringInterner, name: &str, value: i64) -> MemberDeclaration {
    let mut member = bare_member(interner, name, "int");
    member.is_const = true;
    member.constant = Some(ConstValue::Int(value));
    member
}

/// A bodiless, non-public, non-partial method.
pub fn method(interner: &StringInterner, name: &str, ret: &str) -> MemberDeclaration {
    let mut member = bare_member(interner, name, ret);
    member.kind = MemberKind::Method(MethodSig::default());
    member.is_public = false;
    member
}

/// A bound invocation with no arguments.
pub fn invocation(
    interner: &StringInterner,
    caller: &str,
    callee: &str,
    method: &str,
    text: &str,
) -> Invocation {
    Invocation {
        caller: interner.intern(caller),
        callee: interner.intern(callee),
        method: interner.intern(method),
        type_args: smallvec![],
        args: Vec::new(),
        text: interner.intern(text),
        span: SourceSpan::DUMMY,
    }
}

/// Build a compilation snapshot from declarations and per-file events.
pub fn snapshot(types: Vec<TypeDeclaration>, files: Vec<SourceFile>) -> Compilation {
    Compilation::new(types, files)
}

/// Run a closure against a snapshot and return the sorted diagnostics.
pub fn run_rules(
    setup: &Setup,
    model: &Compilation,
    f: impl FnOnce(&RuleContext<'_>, &WellKnown),
) -> Vec<DiagnosticRecord> {
    let sink = DiagnosticSink::new();
    let wk = WellKnown::intern(&setup.interner);
    let cx = RuleContext {
        model,
        interner: &setup.interner,
        sink: &sink,
    };
    f(&cx, &wk);
    sink.flush()
}
