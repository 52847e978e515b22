//! Thread-safe diagnostic collector.

use parking_lot::Mutex;

use crate::DiagnosticRecord;

/// Collector shared by all rule callbacks of one analysis pass.
///
/// Pushes are concurrent; `flush` runs once, after finalization, and sorts
/// records into a deterministic order (file, offset, code, arguments) so a
/// re-run over an unchanged snapshot yields an identical list regardless of
/// thread interleaving.
#[derive(Default)]
pub struct DiagnosticSink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl DiagnosticSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report one record.
    pub fn report(&self, record: DiagnosticRecord) {
        self.records.lock().push(record);
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drain all records in deterministic order.
    pub fn flush(&self) -> Vec<DiagnosticRecord> {
        let mut records = std::mem::take(&mut *self.records.lock());
        records.sort_by(|a, b| {
            a.primary_span()
                .cmp(&b.primary_span())
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.args.cmp(&b.args))
        });
        records
    }
}
