//! Observability for errors the lookup boundary swallows.

use std::sync::atomic::{AtomicU64, Ordering};

/// Why a lookup degraded to not-found despite the store being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuppressedKind {
    /// The store was unreachable or rejected the query.
    Transport,
    /// A row did not decode into the expected record shape.
    Decode,
    /// The query outlived its deadline.
    Timeout,
    /// Data was found but the table has no registered citation.
    MissingCitation,
}

impl SuppressedKind {
    /// Returns the metric label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Timeout => "timeout",
            Self::MissingCitation => "missing_citation",
        }
    }
}

/// In-process tally of suppressed lookup errors.
///
/// Complements the `lookup_suppressed_errors_total` counter so tests and the CLI
/// can tell "no data exists" apart from "the store is failing".
#[derive(Debug, Default)]
pub struct LookupDiagnostics {
    transport: AtomicU64,
    decode: AtomicU64,
    timeout: AtomicU64,
    missing_citation: AtomicU64,
}

/// Point-in-time copy of [`LookupDiagnostics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DiagnosticsSnapshot {
    /// Transport failures.
    pub transport: u64,
    /// Decode failures.
    pub decode: u64,
    /// Deadline expiries.
    pub timeout: u64,
    /// Found rows dropped for lack of a citation.
    pub missing_citation: u64,
}

impl DiagnosticsSnapshot {
    /// Total suppressed errors.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.transport + self.decode + self.timeout + self.missing_citation
    }
}

impl LookupDiagnostics {
    /// Records one suppressed error.
    pub fn record(&self, kind: SuppressedKind) {
        let counter = match kind {
            SuppressedKind::Transport => &self.transport,
            SuppressedKind::Decode => &self.decode,
            SuppressedKind::Timeout => &self.timeout,
            SuppressedKind::MissingCitation => &self.missing_citation,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counts.
    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            transport: self.transport.load(Ordering::Relaxed),
            decode: self.decode.load(Ordering::Relaxed),
            timeout: self.timeout.load(Ordering::Relaxed),
            missing_citation: self.missing_citation.load(Ordering::Relaxed),
        }
    }
}
