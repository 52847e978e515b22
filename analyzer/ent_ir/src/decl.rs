//! Bound type and member declarations.
//!
//! These records are the host's resolved view of one compilation: base-type
//! chains are already flattened, attribute arguments already bound, member
//! types already resolved to qualified names. Rules never see raw syntax.

use smallvec::SmallVec;

use crate::{Annotation, MethodBody, Name, SourceSpan};

/// Kind of a type declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Delegate,
    Enum,
}

/// A bound type declaration.
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    /// Fully qualified name.
    pub name: Name,
    pub kind: TypeKind,
    /// Whether the type is declared static (a utility holder, never
    /// instantiated).
    pub is_static: bool,
    /// Ordered ancestor chain, closest base first, root last.
    pub bases: Vec<Name>,
    /// Implemented capability interfaces.
    pub capabilities: Vec<Name>,
    /// Annotations attached to this declaration itself (not inherited).
    pub annotations: Vec<Annotation>,
    pub members: Vec<MemberDeclaration>,
    /// Declaring spans; partial types have more than one.
    pub spans: SmallVec<[SourceSpan; 1]>,
}

impl TypeDeclaration {
    /// The first declaring span, or a dummy for fully synthesized types.
    pub fn primary_span(&self) -> SourceSpan {
        self.spans.first().copied().unwrap_or(SourceSpan::DUMMY)
    }

    /// Whether the declaration's own annotations contain `ChildOf`.
    pub fn declared_parent(&self) -> Option<Name> {
        self.annotations.iter().find_map(Annotation::child_of)
    }
}

/// A compile-time constant value the host folded for a member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstValue {
    Int(i64),
    Str(Name),
    Bool(bool),
}

impl ConstValue {
    /// The integer payload, if this constant is integral.
    pub fn as_int(self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

/// A method parameter with its resolved type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: Name,
}

/// Signature and body of a method member.
#[derive(Clone, Debug, Default)]
pub struct MethodSig {
    pub params: Vec<Param>,
    pub is_async: bool,
    /// Body statements, when the host supplies them. Signature-only views
    /// (metadata references) have none.
    pub body: Option<MethodBody>,
}

impl MethodSig {
    /// The first parameter whose type matches `token_ty`, if any.
    pub fn token_param(&self, token_ty: Name) -> Option<Name> {
        self.params.iter().find(|p| p.ty == token_ty).map(|p| p.name)
    }
}

/// Kind of a member declaration.
#[derive(Clone, Debug)]
pub enum MemberKind {
    Field,
    Property,
    Method(MethodSig),
}

/// A bound member declaration.
#[derive(Clone, Debug)]
pub struct MemberDeclaration {
    pub name: Name,
    pub kind: MemberKind,
    /// Declared type for fields and properties, return type for methods.
    pub ty: Name,
    pub is_static: bool,
    pub is_const: bool,
    pub is_public: bool,
    pub is_partial: bool,
    /// Compiler-generated members (backing fields, default constructors).
    pub is_synthesized: bool,
    /// Folded constant value, for `is_const` members.
    pub constant: Option<ConstValue>,
    pub annotations: Vec<Annotation>,
    pub span: SourceSpan,
}

impl MemberDeclaration {
    /// Whether this member is a field.
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    /// The method signature, if this member is a method.
    pub fn method_sig(&self) -> Option<&MethodSig> {
        match &self.kind {
            MemberKind::Method(sig) => Some(sig),
            _ => None,
        }
    }

    /// Whether the member's own annotations contain the given marker.
    pub fn has_annotation(&self, pred: impl Fn(&Annotation) -> bool) -> bool {
        self.annotations.iter().any(pred)
    }
}
