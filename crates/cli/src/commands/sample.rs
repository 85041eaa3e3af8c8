//! `sample` command implementation.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use contracts::{
    AnyEvent, AudioChunkCreatedEvent, AugmentationPreferences, CommentarySettings, EventHeader,
    EventKind, FinalAudioCreatedEvent, PdfCreatedEvent, PngCreatedEvent, SummaryPlacement,
    SummarySettings, TextProcessedEvent, WavFileCreatedEvent,
};
use tracing::debug;

use super::render_event;
use crate::cli::SampleArgs;

const SAMPLE_PAGE: u32 = 1;
const SAMPLE_TOTAL_PAGES: u32 = 10;

/// Execute the `sample` command
pub fn run_sample(args: &SampleArgs) -> Result<()> {
    let kind = EventKind::from(args.kind);
    let event = build_sample(kind, args).context("Failed to build sample event")?;
    debug!(kind = %kind, event_id = %event.header().event_id, "Built sample event");

    let text = render_event(&event, args.tagged, args.pretty)?;
    println!("{}", text);
    Ok(())
}

/// Walk the stage builders up to `kind`
fn build_sample(kind: EventKind, args: &SampleArgs) -> Result<AnyEvent, contracts::ContractError> {
    let prefix = format!("{}/{}", args.tenant_id, args.workflow_id);
    let mut header = EventHeader::new(&args.workflow_id, &args.user_id, &args.tenant_id);
    header.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);

    let pdf = PdfCreatedEvent::new(header, format!("{prefix}/document.pdf"))
        .with_augmentation(sample_augmentation());
    if kind == EventKind::PdfCreated {
        return Ok(pdf.into());
    }

    let png = PngCreatedEvent::from_pdf(
        &pdf,
        format!("{prefix}/page-{SAMPLE_PAGE}.png"),
        SAMPLE_PAGE,
        SAMPLE_TOTAL_PAGES,
    )?;
    if kind == EventKind::PngCreated {
        return Ok(png.into());
    }

    let text = TextProcessedEvent::from_png(&png, format!("{prefix}/page-{SAMPLE_PAGE}.txt"))
        .with_voice("af_heart")
        .with_seed(42)
        .with_temperature(0.7)
        .with_top_p(0.9);
    if kind == EventKind::TextProcessed {
        return Ok(text.into());
    }

    let chunk =
        AudioChunkCreatedEvent::from_text(&text, format!("{prefix}/page-{SAMPLE_PAGE}.pcm"));
    if kind == EventKind::AudioChunkCreated {
        return Ok(chunk.into());
    }

    let wav = WavFileCreatedEvent::from_audio_chunk(&chunk, format!("{prefix}/page-{SAMPLE_PAGE}.wav"));
    if kind == EventKind::WavFileCreated {
        return Ok(wav.into());
    }

    Ok(FinalAudioCreatedEvent::for_workflow(&wav.header, format!("{prefix}/final.wav")).into())
}

fn sample_augmentation() -> AugmentationPreferences {
    AugmentationPreferences {
        commentary: CommentarySettings::enabled(Some("Describe every chart.".into())),
        summary: SummarySettings::enabled(
            SummaryPlacement::Bottom,
            Some("Provide two sentence overview.".into()),
        ),
    }
}
