//! Architectural-conformance rules for the entity/system framework.
//!
//! The host compiler parses and binds; this crate walks the resulting
//! snapshot and enforces the framework's structural and lifecycle
//! invariants:
//!
//! - **Classifier** ([`classify`]): pure queries over base chains and
//!   annotations - "is this an entity / a system / a static utility".
//! - **Stateless rules** ([`rules`]): single-site checks over one
//!   declaration or event; trivially parallel-safe.
//! - **Cross-file aggregators**: the static-utility dependency graph with
//!   cycle detection ([`rules::cycles`]) and the entity identity hash
//!   registry ([`rules::hash_registry`]); both are populated concurrently
//!   and finalized once per compilation.
//! - **Session** ([`session`]): per-compilation context and the parallel
//!   dispatcher that plays the host's role - per-file callbacks in
//!   parallel, aggregate finalization strictly after the join.
//!
//! A failed resolution inside any rule exits that callback early without a
//! diagnostic; a panic is caught and aborts only the offending callback.

pub mod classify;
mod config;
mod context;
pub mod rules;
mod session;

pub use classify::{ChildResolution, WellKnown};
pub use config::{AnalyzerConfig, RuleScope};
pub use context::RuleContext;
pub use rules::cycles::DependencyGraph;
pub use rules::hash_registry::{identity_hash, HashRegistry};
pub use session::AnalysisSession;

#[cfg(test)]
mod test_helpers;
