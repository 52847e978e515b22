//! Lifecycle-handler completion rule (EC0601).
//!
//! A system type annotated `EntitySystemOf(E)` must implement a handler for
//! every public partial method of `E`. Missing handlers are collected into
//! a single diagnostic per entity whose property bag carries everything an
//! external code generator needs to synthesize the stubs.

use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{Annotation, MemberDeclaration, TypeDeclaration};
use rustc_hash::FxHashSet;

use crate::classify::system_target;
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::MODEL;

/// EC0601: report the system's missing lifecycle handlers, one diagnostic
/// per system declaration, with structured per-method properties.
pub fn check_lifecycle_completion(cx: &RuleContext<'_>, decl: &TypeDeclaration) {
    let Some(entity) = system_target(decl) else {
        return;
    };
    let Some(entity_decl) = cx.model.type_decl(entity) else {
        return;
    };

    let handled: FxHashSet<_> = decl
        .members
        .iter()
        .flat_map(|m| m.annotations.iter())
        .filter_map(Annotation::lifecycle_handler)
        .collect();

    let missing: Vec<&MemberDeclaration> = entity_decl
        .members
        .iter()
        .filter(|m| {
            m.method_sig().is_some()
                && m.is_public
                && m.is_partial
                && !m.is_synthesized
                && !handled.contains(&m.name)
        })
        .collect();

    if missing.is_empty() {
        return;
    }

    let mut record = DiagnosticRecord::error(RuleCode::EC0601, decl.primary_span())
        .with_span(entity_decl.primary_span())
        .with_arg(cx.display(decl.name))
        .with_arg(missing.len().to_string())
        .with_arg(cx.display(entity))
        .with_property("missing.count", missing.len().to_string());

    let entity_name = cx.display(entity);
    for (i, member) in missing.iter().enumerate() {
        // Signature text for the generator: the handler takes the entity as
        // an injected leading `self` parameter, then the source parameters.
        let mut params = format!("self: {entity_name}");
        if let Some(sig) = member.method_sig() {
            for param in &sig.params {
                params.push_str(", ");
                params.push_str(cx.display(param.name));
                params.push_str(": ");
                params.push_str(cx.display(param.ty));
            }
        }
        record = record
            .with_property(
                format!("missing.{i}.name"),
                format!("{entity_name}.{}", cx.display(member.name)),
            )
            .with_property(format!("missing.{i}.return"), cx.display(member.ty))
            .with_property(format!("missing.{i}.params"), params);
    }
    cx.report(record);
}
