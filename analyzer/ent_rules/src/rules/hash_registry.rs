//! Identity-hash collision registry (EC0401).
//!
//! The runtime routes entities by a 64-bit hash of their qualified name,
//! so two entity types hashing to the same value would silently shadow
//! each other. Registration is concurrent; the first declaration to claim
//! a hash becomes the resident and any later different-named claimant is
//! reported against it.

use dashmap::DashMap;
use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{Name, SourceSpan, TypeDeclaration};
use rustc_hash::FxBuildHasher;

use crate::classify::{is_entity_decl, WellKnown};
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::MODEL;

/// The BKDR-style hash the runtime uses for entity routing.
///
/// Multiplier 1313, accumulated from zero over the UTF-16 encoding of the
/// name, folding in each code unit's high byte then low byte, with
/// wrapping 64-bit arithmetic.
#[must_use]
pub fn identity_hash(name: &str) -> u64 {
    let mut hash: u64 = 0;
    for unit in name.encode_utf16() {
        hash = hash
            .wrapping_mul(1313)
            .wrapping_add(u64::from(unit >> 8));
        hash = hash
            .wrapping_mul(1313)
            .wrapping_add(u64::from(unit & 0xFF));
    }
    hash
}

/// Whole-compilation registry of claimed identity hashes.
///
/// Shared across the parallel per-file phase; each claim locks only the
/// hash's bucket via the entry guard, making test-and-insert atomic
/// without a global lock. Duplicate registrations of the same name are
/// idempotent, so re-analysis of a file cannot self-collide.
pub struct HashRegistry {
    claims: DashMap<u64, Name, FxBuildHasher>,
}

impl Default for HashRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HashRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        HashRegistry {
            claims: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Number of distinct hashes claimed so far.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no hash has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Register an entity declaration's identity hash; EC0401 on a
    /// collision with a differently named resident.
    pub fn record(&self, cx: &RuleContext<'_>, wk: &WellKnown, decl: &TypeDeclaration) {
        if !is_entity_decl(wk, decl) {
            return;
        }
        let hash = identity_hash(cx.display(decl.name));
        let resident = *self.claims.entry(hash).or_insert(decl.name);
        if resident == decl.name {
            return;
        }
        let resident_span = cx
            .model
            .type_decl(resident)
            .map_or(SourceSpan::DUMMY, TypeDeclaration::primary_span);
        cx.report(
            DiagnosticRecord::error(RuleCode::EC0401, decl.primary_span())
                .with_span(resident_span)
                .with_arg(cx.display(decl.name))
                .with_arg(cx.display(resident))
                .with_arg(hash.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use ent_diagnostic::RuleCode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::{identity_hash, HashRegistry};
    use crate::test_helpers::{entity, run_rules, snapshot, static_class, Setup};

    #[test]
    fn known_hash_values() {
        assert_eq!(identity_hash(""), 0);
        // 'X' is U+0058: high byte 0, low byte 88.
        assert_eq!(identity_hash("X"), 88);
        // 'A'=65, 'B'=66: 65 * 1313^2 + 66 = 112_058_051.
        assert_eq!(identity_hash("AB"), 112_058_051);
    }

    #[test]
    fn a_leading_nul_code_unit_does_not_change_the_hash() {
        // Leading zero units multiply a zero accumulator, so these collide.
        assert_eq!(identity_hash("\u{0}X"), identity_hash("X"));
        assert_eq!(identity_hash("\u{0}\u{0}Game.Player"), identity_hash("Game.Player"));
    }

    #[test]
    fn distinct_names_with_equal_hashes_collide_once() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let first = entity(interner, "Game.Player");
        let shadow = entity(interner, "\u{0}Game.Player");
        let model = snapshot(vec![first.clone(), shadow.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            let registry = HashRegistry::new();
            registry.record(cx, wk, &first);
            registry.record(cx, wk, &shadow);
            // Re-registration of a resident is idempotent.
            registry.record(cx, wk, &first);
            assert_eq!(registry.len(), 1);
        });
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, RuleCode::EC0401);
        assert_eq!(
            diags[0].args,
            vec![
                "\u{0}Game.Player".to_owned(),
                "Game.Player".to_owned(),
                identity_hash("Game.Player").to_string(),
            ]
        );
    }

    #[test]
    fn non_entity_types_never_claim_hashes() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let helper = static_class(interner, "Game.Helper");
        let shadow = static_class(interner, "\u{0}Game.Helper");
        let model = snapshot(vec![helper.clone(), shadow.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, wk| {
            let registry = HashRegistry::new();
            registry.record(cx, wk, &helper);
            registry.record(cx, wk, &shadow);
            assert!(registry.is_empty());
        });
        assert_eq!(diags, vec![]);
    }

    proptest! {
        #[test]
        fn hashing_is_pure(name in ".{0,32}") {
            prop_assert_eq!(identity_hash(&name), identity_hash(&name));
        }

        // h(s ++ t) = h(s) * 1313^(2 * units(t)) + h(t), wrapping.
        #[test]
        fn concatenation_folds_left(s in ".{0,16}", t in ".{0,16}") {
            let units = t.encode_utf16().count() as u32;
            let shift = 1313u64.wrapping_pow(2 * units);
            let combined = format!("{s}{t}");
            prop_assert_eq!(
                identity_hash(&combined),
                identity_hash(&s).wrapping_mul(shift).wrapping_add(identity_hash(&t))
            );
        }
    }
}
