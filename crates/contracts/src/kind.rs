//! EventKind - which message a payload is
//!
//! The transport conveys the kind through the channel it publishes on; the
//! same names are used as the `eventType` tag of [`crate::AnyEvent`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Pipeline event kinds, in stage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// Document uploaded, ready for rasterization
    #[serde(rename = "PDFCreated")]
    PdfCreated,
    /// One non-blank page rendered, ready for OCR
    #[serde(rename = "PNGCreated")]
    PngCreated,
    /// OCR output plus synthesis tuning for one page
    TextProcessed,
    /// One synthesized audio segment
    AudioChunkCreated,
    /// One page converted to waveform audio
    WavFileCreated,
    /// Aggregated audio for the workflow
    FinalAudioCreated,
}

impl EventKind {
    /// All kinds in pipeline order
    pub const ALL: [EventKind; 6] = [
        EventKind::PdfCreated,
        EventKind::PngCreated,
        EventKind::TextProcessed,
        EventKind::AudioChunkCreated,
        EventKind::WavFileCreated,
        EventKind::FinalAudioCreated,
    ];

    /// Canonical name
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::PdfCreated => "PDFCreated",
            EventKind::PngCreated => "PNGCreated",
            EventKind::TextProcessed => "TextProcessed",
            EventKind::AudioChunkCreated => "AudioChunkCreated",
            EventKind::WavFileCreated => "WavFileCreated",
            EventKind::FinalAudioCreated => "FinalAudioCreated",
        }
    }

    /// Whether the kind carries `pageNumber`/`totalPages`
    pub const fn is_page_scoped(self) -> bool {
        !matches!(self, EventKind::PdfCreated | EventKind::FinalAudioCreated)
    }

    /// Kind produced by the stage that consumes this one
    pub const fn next_stage(self) -> Option<EventKind> {
        match self {
            EventKind::PdfCreated => Some(EventKind::PngCreated),
            EventKind::PngCreated => Some(EventKind::TextProcessed),
            EventKind::TextProcessed => Some(EventKind::AudioChunkCreated),
            EventKind::AudioChunkCreated => Some(EventKind::WavFileCreated),
            EventKind::WavFileCreated => Some(EventKind::FinalAudioCreated),
            EventKind::FinalAudioCreated => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ContractError;

    /// Case-insensitive match on the canonical name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContractError::UnknownKind(s.to_string()))
    }
}
