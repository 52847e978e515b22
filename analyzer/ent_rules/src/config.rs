//! Analyzer configuration: the global switch and per-assembly applicability.

use bitflags::bitflags;
use ent_ir::Name;
use rustc_hash::FxHashMap;

bitflags! {
    /// Applicability classification of an assembly.
    ///
    /// Supplied as external configuration, never derived inside rule logic.
    /// Each rule module declares the scopes it applies to; the dispatcher
    /// intersects that with the assembly's classification.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct RuleScope: u8 {
        /// Model code: entity declarations and the code that composes them.
        const MODEL = 1 << 0;
        /// Hot-reloadable code: reloaded at runtime, stricter state rules.
        const HOT_RELOAD = 1 << 1;
    }
}

/// Configuration for one analysis pass.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Global enable switch; a disabled pass emits nothing.
    pub enabled: bool,
    assemblies: FxHashMap<Name, RuleScope>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            enabled: true,
            assemblies: FxHashMap::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Enabled, with no assembly classifications yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that suppresses the whole suite.
    pub fn disabled() -> Self {
        AnalyzerConfig {
            enabled: false,
            assemblies: FxHashMap::default(),
        }
    }

    /// Classify an assembly.
    pub fn classify_assembly(mut self, assembly: Name, scope: RuleScope) -> Self {
        self.assemblies.insert(assembly, scope);
        self
    }

    /// The scope for an assembly; unclassified assemblies default to model
    /// code, the framework's strictest common denominator.
    pub fn scope_for(&self, assembly: Name) -> RuleScope {
        self.assemblies
            .get(&assembly)
            .copied()
            .unwrap_or(RuleScope::MODEL)
    }
}
