//! Per-request error report
//!
//! An ordered, append-only collection of structured error records. A report is
//! created at the request boundary and passed by reference into the operation
//! layer; every failed operation appends a record. Because the report is owned
//! by the request, dropping it at the end of the cycle clears it without any
//! bookkeeping at call sites. Records are never removed individually.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One structured failure: a human-readable message plus the parameters that
/// were in play (bucket, key, underlying error text). Informational, not
/// structured for machine recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, context: BTreeMap<String, String>) -> Self {
        ErrorRecord {
            message: message.into(),
            context,
        }
    }
}

/// Ordered error collection scoped to one request cycle.
#[derive(Debug, Default)]
pub struct ErrorReport {
    records: Mutex<Vec<ErrorRecord>>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ErrorRecord>> {
        // The report only holds plain data; a poisoned lock still has a
        // usable record list.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record. No deduplication, no severity levels.
    pub fn add(&self, record: ErrorRecord) {
        self.lock().push(record);
    }

    /// Append a record built from a message and context pairs.
    pub fn add_error(&self, message: impl Into<String>, context: BTreeMap<String, String>) {
        self.add(ErrorRecord::new(message, context));
    }

    pub fn has_errors(&self) -> bool {
        !self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Owned snapshot of the records in append order. Records added after the
    /// snapshot do not appear in it.
    pub fn snapshot(&self) -> Vec<ErrorRecord> {
        self.lock().clone()
    }

    /// Empty the report. A fresh report per request makes this implicit; it
    /// remains available for explicit reuse within a cycle.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> ErrorRecord {
        ErrorRecord::new(message, BTreeMap::new())
    }

    #[test]
    fn test_append_preserves_order() {
        let report = ErrorReport::new();
        report.add(record("first"));
        report.add(record("second"));
        report.add(record("third"));

        let snapshot = report.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].message, "first");
        assert_eq!(snapshot[2].message, "third");
    }

    #[test]
    fn test_clear_empties_report() {
        let report = ErrorReport::new();
        report.add(record("boom"));
        assert!(report.has_errors());

        report.clear();
        assert!(!report.has_errors());
        assert!(report.snapshot().is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let report = ErrorReport::new();
        report.add(record("before"));
        let snapshot = report.snapshot();
        report.add(record("after"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_context_round_trips_through_record() {
        let mut context = BTreeMap::new();
        context.insert("bucket".to_string(), "media".to_string());
        context.insert("key".to_string(), "a/b.bin".to_string());

        let report = ErrorReport::new();
        report.add_error("uploadFile failed", context.clone());

        let snapshot = report.snapshot();
        assert_eq!(snapshot[0].context, context);
    }
}
