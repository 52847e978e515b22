//! The compilation snapshot and the narrow query surface rules see.

use rustc_hash::FxHashMap;

use crate::{MemberDeclaration, Name, SourceFile, TypeDeclaration};

/// Narrow query surface over bound symbol information.
///
/// Rules depend on this trait instead of a concrete host API, so the suite
/// stays portable across front-ends. The contract is read-only: a model is
/// immutable for the duration of one analysis pass and shared across
/// parallel rule callbacks.
pub trait SemanticModel: Sync {
    /// The declaration for a qualified type name, if the type is part of
    /// this compilation.
    fn type_decl(&self, name: Name) -> Option<&TypeDeclaration>;

    /// A member declared directly on `ty` (bases are not searched; the
    /// framework's encapsulation rules deal in declaring types).
    fn find_member(&self, ty: Name, member: Name) -> Option<&MemberDeclaration> {
        self.type_decl(ty)?.members.iter().find(|m| m.name == member)
    }

    /// Whether `ty`'s ancestor chain contains `base`.
    fn inherits_from(&self, ty: Name, base: Name) -> bool {
        self.type_decl(ty)
            .is_some_and(|decl| decl.bases.contains(&base))
    }
}

/// A full compilation snapshot: every file's events plus the type table.
pub struct Compilation {
    pub files: Vec<SourceFile>,
    types: FxHashMap<Name, TypeDeclaration>,
}

impl Compilation {
    /// Build a snapshot from bound declarations and per-file events.
    pub fn new(types: Vec<TypeDeclaration>, files: Vec<SourceFile>) -> Self {
        let types = types.into_iter().map(|t| (t.name, t)).collect();
        Compilation { files, types }
    }

    /// Iterate all type declarations in the snapshot (unordered).
    pub fn type_decls(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.values()
    }

    /// Number of type declarations.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl SemanticModel for Compilation {
    fn type_decl(&self, name: Name) -> Option<&TypeDeclaration> {
        self.types.get(&name)
    }
}
