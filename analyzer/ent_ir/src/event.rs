//! Per-file rule events: invocations and member accesses.
//!
//! The dispatcher feeds these to the rules once per matching site. They are
//! bound records - caller and callee types are already resolved - so a rule
//! either matches on integers or exits early.

use smallvec::SmallVec;

use crate::{FileId, Name, SourceSpan};

/// The host-bound shape of an argument expression.
///
/// Add-child calls resolve the child's type through these shapes; any other
/// expression form arrives as `Unsupported` and is itself a violation at an
/// add-child site.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArgExpr {
    /// A local variable with its declared type.
    Local { name: Name, ty: Name },
    /// A parameter of the enclosing method.
    Param { name: Name, ty: Name },
    /// A field of some receiver.
    Field { name: Name, ty: Name },
    /// A property of some receiver.
    Property { name: Name, ty: Name },
    /// The result of a method call, typed by its return type.
    MethodReturn { method: Name, ty: Name },
    /// Any expression shape the resolver does not support.
    Unsupported { text: Name },
}

impl ArgExpr {
    /// The resolved type of this argument, if the shape is supported.
    pub fn resolved_type(self) -> Option<Name> {
        match self {
            ArgExpr::Local { ty, .. }
            | ArgExpr::Param { ty, .. }
            | ArgExpr::Field { ty, .. }
            | ArgExpr::Property { ty, .. }
            | ArgExpr::MethodReturn { ty, .. } => Some(ty),
            ArgExpr::Unsupported { .. } => None,
        }
    }
}

/// A resolved invocation site.
#[derive(Clone, Debug)]
pub struct Invocation {
    /// Type declaring the enclosing member.
    pub caller: Name,
    /// Type declaring the invoked method (the static receiver type).
    pub callee: Name,
    pub method: Name,
    /// Generic type arguments at the call site.
    pub type_args: SmallVec<[Name; 1]>,
    pub args: Vec<ArgExpr>,
    /// Interned source text of the invocation, used verbatim in cycle
    /// diagnostics.
    pub text: Name,
    pub span: SourceSpan,
}

/// A resolved member access site.
#[derive(Clone, Debug)]
pub struct MemberAccess {
    /// Type declaring the enclosing member.
    pub from: Name,
    /// Name of the enclosing method/property, if the access sits inside one.
    pub enclosing_member: Option<Name>,
    /// Type declaring the accessed member.
    pub target: Name,
    pub member: Name,
    pub span: SourceSpan,
}

/// One source file's contribution to the compilation snapshot.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file: FileId,
    /// Assembly this file compiles into; drives rule applicability.
    pub assembly: Name,
    /// Qualified names of types declared in this file.
    pub types: Vec<Name>,
    pub invocations: Vec<Invocation>,
    pub member_accesses: Vec<MemberAccess>,
}
