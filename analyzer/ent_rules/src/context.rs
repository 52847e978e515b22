//! Per-invocation rule context.

use ent_diagnostic::{DiagnosticRecord, DiagnosticSink};
use ent_ir::{Name, SemanticModel, StringInterner};

/// Everything a rule callback is handed: the bound model, the interner for
/// rendering names into messages, and the shared sink.
///
/// The context is immutable and passed by reference into every rule, so
/// concurrent compilations (background IDE analysis next to a CI run) each
/// carry their own aggregator state with no ambient globals.
#[derive(Copy, Clone)]
pub struct RuleContext<'a> {
    pub model: &'a dyn SemanticModel,
    pub interner: &'a StringInterner,
    pub sink: &'a DiagnosticSink,
}

impl RuleContext<'_> {
    /// Resolve an interned name for use in a message argument.
    #[inline]
    pub fn display(&self, name: Name) -> &'static str {
        self.interner.resolve(name)
    }

    /// Report one violation.
    #[inline]
    pub fn report(&self, record: DiagnosticRecord) {
        self.sink.report(record);
    }
}
