//! `decode` command implementation.

use anyhow::{Context, Result};
use contracts::EventKind;
use tracing::{info, warn};

use super::{decode_message, read_input, render_event};
use crate::cli::DecodeArgs;

/// Execute the `decode` command
pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let kind = args.kind.map(EventKind::from);
    info!(input = %args.input.display(), kind = ?kind, "Decoding message");

    let bytes = read_input(&args.input)?;
    let decoded = decode_message(kind, &bytes);

    let metric_kind = decoded.as_ref().map(|e| e.kind()).ok().or(kind);
    if let Some(metric_kind) = metric_kind {
        observability::record_decoded(metric_kind, bytes.len(), decoded.as_ref().err());
    }

    let event = decoded
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    let header = event.header();
    info!(
        kind = %event.kind(),
        workflow_id = %header.workflow_id,
        event_id = %header.event_id,
        page = ?event.page().map(|p| p.to_string()),
        "Decoded message"
    );

    if args.validate {
        if let Err(e) = event.validate() {
            warn!(error = %e, "Message failed validation");
            return Err(e).context("Message failed validation");
        }
    }

    let text = render_event(&event, args.tagged, args.pretty)?;
    println!("{}", text);

    Ok(())
}
