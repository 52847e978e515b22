//! Diagnostic records for the architectural-conformance rule suite.
//!
//! Every rule violation becomes a [`DiagnosticRecord`]:
//! - a stable [`RuleCode`] for suppression and severity configuration,
//! - a message rendered from the code's template with positional arguments,
//! - one or more source spans,
//! - a fixed `Error` severity (this subsystem emits nothing softer),
//! - and, for the lifecycle-completion rule, a sorted property bag that an
//!   external code generator consumes.
//!
//! Records flow through a [`DiagnosticSink`], the only shared-mutable piece:
//! parallel rule callbacks push concurrently, the host flushes once after
//! finalization and receives a deterministically ordered list.

mod code;
mod record;
mod sink;

pub use code::RuleCode;
pub use record::{DiagnosticRecord, Severity};
pub use sink::DiagnosticSink;
