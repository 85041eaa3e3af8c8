//! Event payloads - one struct per pipeline message
//!
//! Wire names are camelCase; the header nests under `header`. Optional fields
//! are omitted when `None`, never written as `null` or zero. Unknown fields
//! are ignored on decode.
//!
//! Each stage has a builder that derives its event from the upstream one, so
//! header identity, page position and augmentation flow forward unchanged.

use serde::{Deserialize, Serialize};

use crate::{AugmentationPreferences, ContractError, Event, EventHeader, EventKind, PageScope};

/// Published by the upload gateway to start a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfCreatedEvent {
    pub header: EventHeader,

    /// Object-store key of the uploaded PDF
    pub pdf_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation: Option<AugmentationPreferences>,
}

/// Published once per rendered, non-blank page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PngCreatedEvent {
    pub header: EventHeader,

    /// Object-store key of the page image
    pub png_key: String,

    /// 1-based page index
    pub page_number: u32,

    pub total_pages: u32,

    /// Copied verbatim from the PDFCreated event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation: Option<AugmentationPreferences>,
}

/// Published after OCR (and optional augmentation) of one page.
///
/// Synthesis parameters are explicit options: `Some(0.0)` is a real tuning
/// choice and stays on the wire, `None` is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProcessedEvent {
    pub header: EventHeader,

    /// Source page image
    pub png_key: String,

    /// Object-store key of the processed text
    pub text_key: String,

    pub page_number: u32,

    pub total_pages: u32,

    /// TTS voice name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Sampler seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Model layers offloaded to the GPU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ngl: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Published for each synthesized audio segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioChunkCreatedEvent {
    pub header: EventHeader,

    /// Object-store key of the raw audio chunk
    pub audio_key: String,

    pub page_number: u32,

    pub total_pages: u32,
}

/// Published for each page converted to WAV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WavFileCreatedEvent {
    pub header: EventHeader,

    pub wav_key: String,

    pub page_number: u32,

    pub total_pages: u32,
}

/// Published once all pages are combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAudioCreatedEvent {
    pub header: EventHeader,

    pub final_audio_key: String,
}

// ===== Builders =====

impl PdfCreatedEvent {
    pub fn new(header: EventHeader, pdf_key: impl Into<String>) -> Self {
        Self {
            header,
            pdf_key: pdf_key.into(),
            augmentation: None,
        }
    }

    pub fn with_augmentation(mut self, augmentation: AugmentationPreferences) -> Self {
        self.augmentation = Some(augmentation);
        self
    }
}

impl PngCreatedEvent {
    /// Page event for a rendered page of `pdf`
    ///
    /// # Errors
    /// Page position outside `1..=total_pages`
    pub fn from_pdf(
        pdf: &PdfCreatedEvent,
        png_key: impl Into<String>,
        page_number: u32,
        total_pages: u32,
    ) -> Result<Self, ContractError> {
        let scope = PageScope::new(page_number, total_pages)?;
        Ok(Self {
            header: pdf.header.follow_on(),
            png_key: png_key.into(),
            page_number: scope.page_number,
            total_pages: scope.total_pages,
            augmentation: pdf.augmentation.clone(),
        })
    }
}

impl TextProcessedEvent {
    /// Text event for the OCR output of `png`, with no synthesis overrides
    pub fn from_png(png: &PngCreatedEvent, text_key: impl Into<String>) -> Self {
        Self {
            header: png.header.follow_on(),
            png_key: png.png_key.clone(),
            text_key: text_key.into(),
            page_number: png.page_number,
            total_pages: png.total_pages,
            voice: None,
            seed: None,
            ngl: None,
            top_p: None,
            repetition_penalty: None,
            temperature: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_ngl(mut self, ngl: i32) -> Self {
        self.ngl = Some(ngl);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_repetition_penalty(mut self, penalty: f64) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Float parameters that are set, as (wire name, value)
    fn float_params(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("topP", self.top_p),
            ("repetitionPenalty", self.repetition_penalty),
            ("temperature", self.temperature),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

impl AudioChunkCreatedEvent {
    pub fn from_text(text: &TextProcessedEvent, audio_key: impl Into<String>) -> Self {
        Self {
            header: text.header.follow_on(),
            audio_key: audio_key.into(),
            page_number: text.page_number,
            total_pages: text.total_pages,
        }
    }
}

impl WavFileCreatedEvent {
    pub fn from_audio_chunk(chunk: &AudioChunkCreatedEvent, wav_key: impl Into<String>) -> Self {
        Self {
            header: chunk.header.follow_on(),
            wav_key: wav_key.into(),
            page_number: chunk.page_number,
            total_pages: chunk.total_pages,
        }
    }
}

impl FinalAudioCreatedEvent {
    /// Final event for the workflow `header` belongs to
    pub fn for_workflow(header: &EventHeader, final_audio_key: impl Into<String>) -> Self {
        Self {
            header: header.follow_on(),
            final_audio_key: final_audio_key.into(),
        }
    }
}

// ===== Event impls =====

macro_rules! page_scope {
    () => {
        fn page(&self) -> Option<PageScope> {
            Some(PageScope {
                page_number: self.page_number,
                total_pages: self.total_pages,
            })
        }
    };
}

impl Event for PdfCreatedEvent {
    const KIND: EventKind = EventKind::PdfCreated;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("pdfKey", self.pdf_key.as_str())]
    }
}

impl Event for PngCreatedEvent {
    const KIND: EventKind = EventKind::PngCreated;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    page_scope!();

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("pngKey", self.png_key.as_str())]
    }
}

impl Event for TextProcessedEvent {
    const KIND: EventKind = EventKind::TextProcessed;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    page_scope!();

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("pngKey", self.png_key.as_str()), ("textKey", self.text_key.as_str())]
    }

    fn check_encodable(&self) -> Result<(), ContractError> {
        // JSON has no NaN/inf; serde_json would write null, which decodes as unset
        for (field, value) in self.float_params() {
            if !value.is_finite() {
                return Err(ContractError::unencodable(
                    Self::KIND.as_str(),
                    field,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

impl Event for AudioChunkCreatedEvent {
    const KIND: EventKind = EventKind::AudioChunkCreated;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    page_scope!();

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("audioKey", self.audio_key.as_str())]
    }
}

impl Event for WavFileCreatedEvent {
    const KIND: EventKind = EventKind::WavFileCreated;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    page_scope!();

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("wavKey", self.wav_key.as_str())]
    }
}

impl Event for FinalAudioCreatedEvent {
    const KIND: EventKind = EventKind::FinalAudioCreated;

    fn header(&self) -> &EventHeader {
        &self.header
    }

    fn object_keys(&self) -> Vec<(&'static str, &str)> {
        vec![("finalAudioKey", self.final_audio_key.as_str())]
    }
}
