//! `validate` command implementation.
//!
//! Each file holds one message. Files are decoded (untagged with `--kind`,
//! tagged otherwise) and then checked with the producer-side rules. Every
//! outcome is fed to a [`CodecStatsAggregator`]; the command fails if any
//! file failed either step, after printing the full report.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::EventKind;
use observability::{CodecStatsAggregator, CodecStatsSummary};
use serde::Serialize;
use tracing::{info, warn};

use super::{decode_message, read_input};
use crate::cli::ValidateArgs;

/// Per-file result for JSON output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileResult {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    files: Vec<FileResult>,
    decoded: u64,
    failed_to_decode: u64,
    failed_validation: u64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let kind = args.kind.map(EventKind::from);
    info!(files = args.files.len(), kind = ?kind, "Validating messages");

    let mut aggregator = CodecStatsAggregator::new();
    let results: Vec<FileResult> = args
        .files
        .iter()
        .map(|path| validate_file(path, kind, &mut aggregator))
        .collect();
    let summary = aggregator.summary();

    if args.json {
        let report = Report {
            files: results,
            decoded: summary.total_decoded,
            failed_to_decode: summary.total_failed,
            failed_validation: summary.total_invalid,
        };
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize validation report")?;
        println!("{}", json);
    } else {
        print_results(&results, &summary);
    }

    if summary.is_clean() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} messages failed",
            summary.total_failed + summary.total_invalid,
            args.files.len()
        )
    }
}

fn validate_file(
    path: &Path,
    kind: Option<EventKind>,
    aggregator: &mut CodecStatsAggregator,
) -> FileResult {
    let mut result = FileResult {
        path: path.display().to_string(),
        valid: false,
        kind: kind.map(EventKind::as_str),
        workflow_id: None,
        error: None,
    };

    let bytes = match read_input(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read message");
            aggregator.record_failure(kind);
            result.error = Some(e.to_string());
            return result;
        }
    };

    let event = match decode_message(kind, &bytes) {
        Ok(event) => event,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Message failed to decode");
            if let Some(kind) = kind {
                observability::record_decoded(kind, bytes.len(), Some(&e));
            }
            aggregator.record_failure(kind);
            result.error = Some(e.to_string());
            return result;
        }
    };

    observability::record_decoded(event.kind(), bytes.len(), None);
    result.kind = Some(event.kind().as_str());
    result.workflow_id = Some(event.header().workflow_id.clone());

    match event.validate() {
        Ok(()) => {
            aggregator.record_ok(event.kind(), bytes.len());
            result.valid = true;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Message failed validation");
            aggregator.record_invalid(event.kind(), bytes.len());
            result.error = Some(e.to_string());
        }
    }

    result
}

fn print_results(results: &[FileResult], summary: &CodecStatsSummary) {
    for result in results {
        if result.valid {
            println!(
                "✓ {} ({})",
                result.path,
                result.kind.unwrap_or("unknown kind")
            );
        } else {
            println!("✗ {}", result.path);
            if let Some(ref error) = result.error {
                println!("    Error: {}", error);
            }
        }
    }
    println!();
    print!("{}", summary);
}
