//! Failure side channel.
//!
//! Upstream-transport failures are reported through a dedicated
//! notification interface, separate from the normal result path. The
//! service invokes the sink at most once per invocation; the calling
//! convention allows the report and the returned error to coexist.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Payload delivered on the failure side channel.
///
/// The carried status is always 500. `body_json` holds the raw
/// error-derived message; it is encoded exactly once, when the report
/// itself is serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub status: u16,
    pub body_json: String,
}

impl FailureReport {
    /// Report for a failed outbound connection.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            body_json: message.into(),
        }
    }

    /// JSON rendering of the report.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!(r#"{{"status":{},"bodyJson":""}}"#, self.status))
    }
}

/// Receiver side of the failure channel.
///
/// Implementations must not panic: the report path runs on invocation
/// failure and is never allowed to abort the host.
pub trait FailureSink: Send + Sync {
    /// Deliver one failure report.
    fn report(&self, report: FailureReport);
}

/// Sink that logs each report at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn report(&self, report: FailureReport) {
        tracing::error!(report = %report.to_json(), "Problem with upstream request");
    }
}

/// Sink that collects reports in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<FailureReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports delivered so far, in order.
    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl FailureSink for MemorySink {
    fn report(&self, report: FailureReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_the_documented_field_names() {
        let report = FailureReport::transport("connection refused");
        assert_eq!(
            report.to_json(),
            r#"{"status":500,"bodyJson":"connection refused"}"#
        );
    }

    #[test]
    fn memory_sink_keeps_delivery_order() {
        let sink = MemorySink::new();
        sink.report(FailureReport::transport("first"));
        sink.report(FailureReport::transport("second"));
        let reports = sink.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].body_json, "first");
        assert_eq!(reports[1].body_json, "second");
    }
}
