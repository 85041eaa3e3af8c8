//! Codec metrics
//!
//! Counters for encode/decode outcomes per event kind, plus an in-memory
//! aggregator for printing summaries at the end of a batch.

use std::collections::BTreeMap;
use std::fmt;

use contracts::{ContractError, DecodeFailure, EventKind};
use metrics::{counter, histogram};

/// Record a successful encode
pub fn record_encoded(kind: EventKind, payload_bytes: usize) {
    counter!("pipeline_events_encoded_total", "kind" => kind.as_str()).increment(1);
    histogram!("pipeline_events_payload_bytes", "kind" => kind.as_str())
        .record(payload_bytes as f64);
}

/// Record a decode attempt
///
/// `error` is the decode error, if any.
pub fn record_decoded(kind: EventKind, payload_bytes: usize, error: Option<&ContractError>) {
    let status = status_label(error);
    counter!(
        "pipeline_events_decoded_total",
        "kind" => kind.as_str(),
        "status" => status
    )
    .increment(1);

    if error.is_none() {
        histogram!("pipeline_events_payload_bytes", "kind" => kind.as_str())
            .record(payload_bytes as f64);
    }
}

fn status_label(error: Option<&ContractError>) -> &'static str {
    match error {
        None => "ok",
        Some(err) => match err.decode_failure() {
            Some(DecodeFailure::Syntax) => "syntax",
            Some(DecodeFailure::Data) => "data",
            Some(DecodeFailure::Truncated) => "truncated",
            None => "invalid",
        },
    }
}

/// Codec outcome aggregator
///
/// Failures whose kind is unknown (an untagged message that could not be
/// decoded at all) are counted under `unattributed_failures`.
#[derive(Debug, Clone, Default)]
pub struct CodecStatsAggregator {
    per_kind: BTreeMap<EventKind, KindStats>,
    unattributed_failures: u64,
}

/// Per-kind counters
#[derive(Debug, Clone, Default)]
pub struct KindStats {
    pub decoded: u64,
    pub failed: u64,
    pub invalid: u64,
    pub sizes: SizeStats,
}

impl CodecStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A message decoded and passed validation
    pub fn record_ok(&mut self, kind: EventKind, payload_bytes: usize) {
        let stats = self.per_kind.entry(kind).or_default();
        stats.decoded += 1;
        stats.sizes.push(payload_bytes);
    }

    /// A message decoded but failed validation
    pub fn record_invalid(&mut self, kind: EventKind, payload_bytes: usize) {
        let stats = self.per_kind.entry(kind).or_default();
        stats.decoded += 1;
        stats.invalid += 1;
        stats.sizes.push(payload_bytes);
    }

    /// A message that did not decode
    pub fn record_failure(&mut self, kind: Option<EventKind>) {
        match kind {
            Some(kind) => self.per_kind.entry(kind).or_default().failed += 1,
            None => self.unattributed_failures += 1,
        }
    }

    pub fn summary(&self) -> CodecStatsSummary {
        let total_decoded = self.per_kind.values().map(|s| s.decoded).sum();
        let total_failed =
            self.per_kind.values().map(|s| s.failed).sum::<u64>() + self.unattributed_failures;
        let total_invalid = self.per_kind.values().map(|s| s.invalid).sum();

        CodecStatsSummary {
            total_decoded,
            total_failed,
            total_invalid,
            per_kind: self.per_kind.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregated report
#[derive(Debug, Clone, Default)]
pub struct CodecStatsSummary {
    pub total_decoded: u64,
    pub total_failed: u64,
    pub total_invalid: u64,
    pub per_kind: BTreeMap<EventKind, KindStats>,
}

impl CodecStatsSummary {
    /// No decode or validation failures
    pub fn is_clean(&self) -> bool {
        self.total_failed == 0 && self.total_invalid == 0
    }
}

impl fmt::Display for CodecStatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Codec Summary ===")?;
        writeln!(f, "Decoded: {}", self.total_decoded)?;
        writeln!(f, "Failed to decode: {}", self.total_failed)?;
        writeln!(f, "Failed validation: {}", self.total_invalid)?;

        for (kind, stats) in &self.per_kind {
            writeln!(
                f,
                "  {kind}: decoded={}, failed={}, invalid={}, bytes: {}",
                stats.decoded, stats.failed, stats.invalid, stats.sizes
            )?;
        }

        Ok(())
    }
}

/// Payload size statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeStats {
    count: u64,
    total: u64,
    min: usize,
    max: usize,
}

impl SizeStats {
    pub fn push(&mut self, bytes: usize) {
        if self.count == 0 {
            self.min = bytes;
            self.max = bytes;
        } else {
            self.min = self.min.min(bytes);
            self.max = self.max.max(bytes);
        }
        self.count += 1;
        self.total += bytes as u64;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }
}

impl fmt::Display for SizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={}, max={}, mean={:.1} (n={})",
                self.min,
                self.max,
                self.mean(),
                self.count
            )
        }
    }
}
