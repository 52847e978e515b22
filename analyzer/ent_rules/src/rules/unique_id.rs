//! Numeric-id range and uniqueness rule (EC0501/EC0502).

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{Annotation, ConstValue, Name, TypeDeclaration};
use rustc_hash::FxHashMap;

use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::MODEL;

/// EC0501/EC0502: on a `UniqueIdRange(min, max)` type, every integer
/// constant must sit inside the range and be distinct from its peers.
///
/// Fields are checked independently in declaration order; the first
/// declaration of a value owns it and later duplicates are reported
/// against the first.
pub fn check_unique_ids(cx: &RuleContext<'_>, decl: &TypeDeclaration) {
    let Some((min, max)) = decl
        .annotations
        .iter()
        .find_map(Annotation::unique_id_range)
    else {
        return;
    };
    let mut seen: FxHashMap<i64, Name> = FxHashMap::default();
    for member in &decl.members {
        if !member.is_const {
            continue;
        }
        let Some(value) = member.constant.and_then(ConstValue::as_int) else {
            continue;
        };
        if value < min || value > max {
            cx.report(
                DiagnosticRecord::error(RuleCode::EC0501, member.span)
                    .with_arg(cx.display(member.name))
                    .with_arg(value.to_string())
                    .with_arg(min.to_string())
                    .with_arg(max.to_string()),
            );
        }
        match seen.entry(value) {
            std::collections::hash_map::Entry::Occupied(first) => {
                cx.report(
                    DiagnosticRecord::error(RuleCode::EC0502, member.span)
                        .with_arg(cx.display(member.name))
                        .with_arg(value.to_string())
                        .with_arg(cx.display(*first.get())),
                );
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(member.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ent_diagnostic::RuleCode;
    use ent_ir::Annotation;
    use pretty_assertions::assert_eq;

    use crate::test_helpers::{class, const_int, run_rules, snapshot, Setup};

    #[test]
    fn in_range_distinct_ids_are_clean() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut ids = class(interner, "Game.OpcodeIds");
        ids.annotations
            .push(Annotation::UniqueIdRange { min: 1, max: 10 });
        ids.members.push(const_int(interner, "A", 1));
        ids.members.push(const_int(interner, "B", 5));
        ids.members.push(const_int(interner, "C", 10));

        let model = snapshot(vec![ids.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, _| super::check_unique_ids(cx, &ids));
        assert_eq!(diags, vec![]);
    }

    #[test]
    fn a_duplicate_names_the_later_constant_and_the_first_owner() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut ids = class(interner, "Game.OpcodeIds");
        ids.annotations
            .push(Annotation::UniqueIdRange { min: 1, max: 10 });
        ids.members.push(const_int(interner, "A", 1));
        ids.members.push(const_int(interner, "B", 5));
        ids.members.push(const_int(interner, "C", 5));

        let model = snapshot(vec![ids.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, _| super::check_unique_ids(cx, &ids));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, RuleCode::EC0502);
        assert_eq!(diags[0].args, vec!["C", "5", "B"]);
    }

    #[test]
    fn out_of_range_and_duplicate_are_independent_checks() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut ids = class(interner, "Game.OpcodeIds");
        ids.annotations
            .push(Annotation::UniqueIdRange { min: 1, max: 10 });
        ids.members.push(const_int(interner, "A", 11));
        ids.members.push(const_int(interner, "B", 11));

        let model = snapshot(vec![ids.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, _| super::check_unique_ids(cx, &ids));
        let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![RuleCode::EC0501, RuleCode::EC0501, RuleCode::EC0502]
        );
    }

    #[test]
    fn unannotated_types_are_skipped() {
        let setup = Setup::new();
        let interner = &setup.interner;
        let mut ids = class(interner, "Game.OpcodeIds");
        ids.members.push(const_int(interner, "A", 999));

        let model = snapshot(vec![ids.clone()], vec![]);
        let diags = run_rules(&setup, &model, |cx, _| super::check_unique_ids(cx, &ids));
        assert_eq!(diags, vec![]);
    }
}
