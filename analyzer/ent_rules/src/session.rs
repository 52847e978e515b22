//! Per-compilation analysis session and parallel dispatcher.
//!
//! One session per compilation snapshot. Per-file callbacks run in
//! parallel over a shared immutable context; the two aggregators accept
//! concurrent recording and are finalized strictly after the parallel
//! phase joins. A panicking callback is caught, logged, and skipped, so a
//! single malformed file cannot take down the host.

use std::panic::{catch_unwind, AssertUnwindSafe};

use dashmap::DashSet;
use ent_diagnostic::{DiagnosticRecord, DiagnosticSink};
use ent_ir::{Compilation, Name, SemanticModel, SourceFile, StringInterner};
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;

use crate::classify::WellKnown;
use crate::config::AnalyzerConfig;
use crate::context::RuleContext;
use crate::rules::cycles::DependencyGraph;
use crate::rules::hash_registry::HashRegistry;
use crate::rules::{
    cycles, encapsulation, hash_registry, hot_reload, hygiene, lifecycle, ownership, unique_id,
};

/// One analysis pass over one compilation snapshot.
pub struct AnalysisSession<'a> {
    model: &'a Compilation,
    interner: &'a StringInterner,
    config: AnalyzerConfig,
}

impl<'a> AnalysisSession<'a> {
    /// Bind a session to a snapshot.
    pub fn new(
        model: &'a Compilation,
        interner: &'a StringInterner,
        config: AnalyzerConfig,
    ) -> Self {
        AnalysisSession {
            model,
            interner,
            config,
        }
    }

    /// Run the whole suite and return its diagnostics, sorted by primary
    /// span, code, and message arguments.
    ///
    /// The output is deterministic for a given snapshot and configuration
    /// regardless of file scheduling.
    pub fn run(&self) -> Vec<DiagnosticRecord> {
        if !self.config.enabled {
            return Vec::new();
        }

        let sink = DiagnosticSink::new();
        let wk = WellKnown::intern(self.interner);
        let graph = DependencyGraph::new();
        let hashes = HashRegistry::new();
        let cx = RuleContext {
            model: self.model,
            interner: self.interner,
            sink: &sink,
        };

        tracing::debug!(
            files = self.model.files.len(),
            types = self.model.type_count(),
            "starting analysis pass"
        );

        let claimed: DashSet<Name, FxBuildHasher> = DashSet::with_hasher(FxBuildHasher);

        self.model.files.par_iter().for_each(|file| {
            let result = catch_unwind(AssertUnwindSafe(|| {
                self.analyze_file(&cx, &wk, &graph, &hashes, &claimed, file);
            }));
            if result.is_err() {
                tracing::error!(file = file.file.0, "rule callback panicked; file skipped");
            }
        });

        // The parallel phase has joined; the aggregators are complete.
        graph.finalize(&cx);

        sink.flush()
    }

    fn analyze_file(
        &self,
        cx: &RuleContext<'_>,
        wk: &WellKnown,
        graph: &DependencyGraph,
        hashes: &HashRegistry,
        claimed: &DashSet<Name, FxBuildHasher>,
        file: &SourceFile,
    ) {
        let scope = self.config.scope_for(file.assembly);

        for &name in &file.types {
            // Partial types are listed by every declaring file; the first
            // file to claim a name runs the per-type rules.
            if !claimed.insert(name) {
                continue;
            }
            let Some(decl) = self.model.type_decl(name) else {
                continue;
            };
            if scope.intersects(ownership::SCOPE) {
                ownership::check_type_shape(cx, wk, decl);
            }
            if scope.intersects(unique_id::SCOPE) {
                unique_id::check_unique_ids(cx, decl);
            }
            if scope.intersects(lifecycle::SCOPE) {
                lifecycle::check_lifecycle_completion(cx, decl);
            }
            if scope.intersects(hot_reload::SCOPE) {
                hot_reload::check_hot_reload_state(cx, wk, decl);
            }
            if scope.intersects(hygiene::SCOPE) {
                hygiene::check_async_shapes(cx, wk, decl);
                hygiene::check_deferred_drops(cx, wk, decl);
                hygiene::check_cancellation(cx, wk, decl);
            }
            if scope.intersects(hash_registry::SCOPE) {
                hashes.record(cx, wk, decl);
            }
        }

        for inv in &file.invocations {
            if scope.intersects(ownership::SCOPE) {
                ownership::check_add_child(cx, wk, inv);
            }
            if scope.intersects(cycles::SCOPE) {
                graph.record(cx.model, inv);
            }
        }

        for access in &file.member_accesses {
            if scope.intersects(ownership::SCOPE) {
                ownership::check_entity_access(cx, wk, access);
            }
            if scope.intersects(encapsulation::SCOPE) {
                encapsulation::check_field_access(cx, wk, access);
            }
        }
    }
}
