//! ent IR - the host-bound compilation snapshot the rule suite analyzes.
//!
//! The host compiler owns parsing, name resolution and type checking; this
//! crate defines the read-only view it hands to the rules:
//! - `Name` for interned qualified names and identifiers
//! - `Span`/`FileId`/`SourceSpan` for source locations
//! - `TypeDeclaration`/`MemberDeclaration` for bound declarations
//! - `Annotation` as a tagged variant per framework attribute
//! - `Invocation`/`MemberAccess` events and `MethodBody` statement shapes
//! - `Compilation` plus the narrow `SemanticModel` query trait
//!
//! # Design Philosophy
//!
//! - **Intern everything**: strings become `Name(u32)`, so equality checks
//!   inside rules are integer compares.
//! - **Immutable views**: every record here is plain data built once per
//!   compilation and shared by reference across parallel rule callbacks.
//! - **Narrow host surface**: rules consume declarations only through
//!   `SemanticModel`, keeping them portable across front-ends.

mod annotation;
mod body;
mod compilation;
mod decl;
mod event;
mod interner;
mod name;
mod span;

pub use annotation::{Annotation, AnnotationArg};
pub use body::{AwaitPoint, CallExpr, ExprNode, IfStmt, Lambda, LambdaBody, MethodBody, Stmt};
pub use compilation::{Compilation, SemanticModel};
pub use decl::{
    ConstValue, MemberDeclaration, MemberKind, MethodSig, Param, TypeDeclaration, TypeKind,
};
pub use event::{ArgExpr, Invocation, MemberAccess, SourceFile};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{FileId, SourceSpan, Span};
