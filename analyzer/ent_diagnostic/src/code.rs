//! Stable rule codes.

use std::fmt;

/// Rule codes for all conformance diagnostics.
///
/// Format: EC##xx where the first two digits name the rule family:
/// - EC01xx: ownership and lifecycle shape
/// - EC02xx: encapsulation
/// - EC03xx: static-utility dependency cycles
/// - EC04xx: identity hash registry
/// - EC05xx: numeric-id range and uniqueness
/// - EC06xx: lifecycle-handler completion
/// - EC07xx: async/deferred hygiene
/// - EC08xx: hot-reload state ownership
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum RuleCode {
    /// Child type added under a parent its `ChildOf` does not name
    EC0101,
    /// Add-child argument whose type cannot be resolved
    EC0102,
    /// Direct access into entity internals without `EnableAccessEntityChild`
    EC0103,
    /// Method declared on an entity type without `EnableMethod`
    EC0104,
    /// Delegate-typed member declared on an entity type
    EC0105,
    /// Entity-typed instance field declared inside an entity type
    EC0106,

    /// Field access on an entity without a `FriendOf` declaration
    EC0201,

    /// Circular dependency among static utility classes
    EC0301,

    /// Two entity types share an identity hash
    EC0401,

    /// Integer constant outside the declared `UniqueIdRange`
    EC0501,
    /// Integer constant duplicating an id on the same type
    EC0502,

    /// System type missing lifecycle handlers for partial entity methods
    EC0601,

    /// Async declaration with a fire-and-forget return shape
    EC0701,
    /// Deferred result dropped in a synchronous context
    EC0702,
    /// Suspension point not followed by a cancellation check
    EC0703,
    /// Suspended call not forwarding the cancellation token
    EC0704,

    /// Instance state declared in a hot-reloadable assembly
    EC0801,
}

impl RuleCode {
    /// The code as its stable textual id.
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleCode::EC0101 => "EC0101",
            RuleCode::EC0102 => "EC0102",
            RuleCode::EC0103 => "EC0103",
            RuleCode::EC0104 => "EC0104",
            RuleCode::EC0105 => "EC0105",
            RuleCode::EC0106 => "EC0106",
            RuleCode::EC0201 => "EC0201",
            RuleCode::EC0301 => "EC0301",
            RuleCode::EC0401 => "EC0401",
            RuleCode::EC0501 => "EC0501",
            RuleCode::EC0502 => "EC0502",
            RuleCode::EC0601 => "EC0601",
            RuleCode::EC0701 => "EC0701",
            RuleCode::EC0702 => "EC0702",
            RuleCode::EC0703 => "EC0703",
            RuleCode::EC0704 => "EC0704",
            RuleCode::EC0801 => "EC0801",
        }
    }

    /// The message template for this code.
    ///
    /// Placeholders `{0}`, `{1}`, ... are substituted with the record's
    /// positional arguments by [`crate::DiagnosticRecord::render`].
    pub const fn template(self) -> &'static str {
        match self {
            RuleCode::EC0101 => {
                "child type `{0}` is declared `ChildOf({1})` and cannot be added to `{2}`"
            }
            RuleCode::EC0102 => {
                "cannot resolve the type of child argument `{0}`; pass a local, parameter, field, property, or method result"
            }
            RuleCode::EC0103 => {
                "direct access to entity internals (`{0}`) requires `EnableAccessEntityChild` on the enclosing member"
            }
            RuleCode::EC0104 => {
                "entity type `{0}` must not declare method `{1}`; move the logic to a system or mark it `EnableMethod`"
            }
            RuleCode::EC0105 => "entity type `{0}` must not declare delegate-typed member `{1}`",
            RuleCode::EC0106 => {
                "entity type `{0}` must not hold entity-typed instance field `{1}`"
            }
            RuleCode::EC0201 => {
                "type `{0}` accesses field `{1}` of entity `{2}` without a `FriendOf({2})` declaration"
            }
            RuleCode::EC0301 => "circular dependency between static utility classes: {0}",
            RuleCode::EC0401 => "entity types `{0}` and `{1}` share identity hash {2}",
            RuleCode::EC0501 => "constant `{0}` = {1} is outside the declared id range [{2}, {3}]",
            RuleCode::EC0502 => "constant `{0}` duplicates id {1} first assigned to `{2}`",
            RuleCode::EC0601 => "system `{0}` is missing lifecycle handlers for {1} method(s) of `{2}`",
            RuleCode::EC0701 => "async method `{0}` must not use fire-and-forget return type `{1}`",
            RuleCode::EC0702 => "deferred result of `{0}` is dropped; await it or store the handle",
            RuleCode::EC0703 => "suspension point in `{0}` is not followed by a cancellation check on `{1}`",
            RuleCode::EC0704 => "suspended call `{0}` does not forward cancellation token `{1}`",
            RuleCode::EC0801 => "hot-reloadable type `{0}` must not hold instance state `{1}`",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
