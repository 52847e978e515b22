//! Framework annotations as tagged variants.
//!
//! The host surfaces attributes as name + positional arguments; this model
//! resolves the known framework annotations into dedicated variants so new
//! rules get exhaustiveness checking instead of string matching. Unknown
//! annotations survive as `Other` and are ignored by every rule.

use crate::Name;

/// A positional annotation argument as the host bound it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AnnotationArg {
    /// A type reference, resolved to its qualified name.
    Type(Name),
    /// A string literal.
    Str(Name),
    /// An integer literal.
    Int(i64),
}

/// One annotation instance attached to a type or member declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Annotation {
    /// The annotated entity type may only be added under the named parent.
    ChildOf(Name),
    /// Grants the annotated type access to the named type's internals.
    FriendOf(Name),
    /// Marks a system type as carrying lifecycle logic for the named entity.
    EntitySystemOf(Name),
    /// Constrains integer-constant members to `[min, max]`.
    UniqueIdRange { min: i64, max: i64 },
    /// Permits direct access into entity internals from the annotated member.
    EnableAccessEntityChild,
    /// Permits a method declaration on an entity type.
    EnableMethod,
    /// Marks a system method as the handler for the named partial method.
    LifecycleHandler(Name),
    /// Any annotation the rule suite does not interpret.
    Other { name: Name, args: Vec<AnnotationArg> },
}

impl Annotation {
    /// The parent type named by a `ChildOf` annotation.
    pub fn child_of(&self) -> Option<Name> {
        match self {
            Annotation::ChildOf(parent) => Some(*parent),
            _ => None,
        }
    }

    /// The entity type named by an `EntitySystemOf` annotation.
    pub fn entity_system_of(&self) -> Option<Name> {
        match self {
            Annotation::EntitySystemOf(entity) => Some(*entity),
            _ => None,
        }
    }

    /// The source method named by a `LifecycleHandler` annotation.
    pub fn lifecycle_handler(&self) -> Option<Name> {
        match self {
            Annotation::LifecycleHandler(method) => Some(*method),
            _ => None,
        }
    }

    /// The bounds of a `UniqueIdRange` annotation.
    pub fn unique_id_range(&self) -> Option<(i64, i64)> {
        match self {
            Annotation::UniqueIdRange { min, max } => Some((*min, *max)),
            _ => None,
        }
    }
}
