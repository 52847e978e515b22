//! The diagnostic record handed back to the host.

use std::collections::BTreeMap;
use std::fmt;

use ent_ir::SourceSpan;
use smallvec::SmallVec;

use crate::RuleCode;

/// Severity level for diagnostics.
///
/// This subsystem only ever emits `Error`; the enum exists because the
/// host's build/IDE channel distinguishes levels and suppression
/// configuration downgrades by severity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A single conformance violation.
///
/// Positional `args` fill the code's message template; `properties` is a
/// sorted bag of structured data for external consumers (code generation
/// reads the lifecycle-completion entries). Both are plain strings so the
/// record crosses the host boundary without the interner.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DiagnosticRecord {
    pub code: RuleCode,
    pub severity: Severity,
    /// Primary location first; secondary locations follow.
    pub spans: SmallVec<[SourceSpan; 2]>,
    pub args: Vec<String>,
    pub properties: BTreeMap<String, String>,
}

impl DiagnosticRecord {
    /// Create an error record at a primary location.
    pub fn error(code: RuleCode, span: SourceSpan) -> Self {
        DiagnosticRecord {
            code,
            severity: Severity::Error,
            spans: SmallVec::from_slice(&[span]),
            args: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Append a positional message argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a secondary location.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.spans.push(span);
        self
    }

    /// Insert a structured property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The primary location.
    pub fn primary_span(&self) -> SourceSpan {
        self.spans.first().copied().unwrap_or(SourceSpan::DUMMY)
    }

    /// Render the message template with this record's positional arguments.
    ///
    /// Unfilled placeholders render as-is, which keeps a malformed record
    /// visible instead of panicking inside the error path.
    pub fn render(&self) -> String {
        let template = self.code.template();
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match tail
                .find('}')
                .and_then(|close| tail[1..close].parse::<usize>().ok().map(|idx| (close, idx)))
            {
                Some((close, idx)) if idx < self.args.len() => {
                    out.push_str(&self.args[idx]);
                    rest = &tail[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use ent_ir::{FileId, SourceSpan};
    use pretty_assertions::assert_eq;

    use super::{DiagnosticRecord, Severity};
    use crate::RuleCode;

    #[test]
    fn render_substitutes_positional_args() {
        let record = DiagnosticRecord::error(RuleCode::EC0101, SourceSpan::DUMMY)
            .with_arg("Game.Bag")
            .with_arg("Game.Player")
            .with_arg("Game.Scene");
        assert_eq!(
            record.render(),
            "child type `Game.Bag` is declared `ChildOf(Game.Player)` and cannot be added to `Game.Scene`"
        );
    }

    #[test]
    fn render_repeats_an_argument_when_the_template_does() {
        let record = DiagnosticRecord::error(RuleCode::EC0201, SourceSpan::DUMMY)
            .with_arg("Game.Shop")
            .with_arg("gold")
            .with_arg("Game.Wallet");
        assert_eq!(
            record.render(),
            "type `Game.Shop` accesses field `gold` of entity `Game.Wallet` without a `FriendOf(Game.Wallet)` declaration"
        );
    }

    #[test]
    fn render_leaves_unfilled_placeholders_visible() {
        let record = DiagnosticRecord::error(RuleCode::EC0401, SourceSpan::DUMMY).with_arg("A");
        let rendered = record.render();
        assert!(rendered.contains("`A`"));
        assert!(rendered.contains("{1}"));
    }

    #[test]
    fn records_are_errors_with_a_primary_span() {
        let span = SourceSpan::new(FileId(3), 10, 20);
        let record = DiagnosticRecord::error(RuleCode::EC0301, span);
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.primary_span(), span);
    }
}
