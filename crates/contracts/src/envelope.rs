//! AnyEvent - tagged envelope over all payload kinds
//!
//! For transports that multiplex several kinds onto one channel. The tag is
//! an extra `eventType` field beside the payload fields, so a consumer that
//! decodes a concrete type ignores it like any other unknown field.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    codec, AudioChunkCreatedEvent, ContractError, Event, EventHeader, EventKind,
    FinalAudioCreatedEvent, PageScope, PdfCreatedEvent, PngCreatedEvent, TextProcessedEvent,
    WavFileCreatedEvent,
};

/// Field name carrying the kind in tagged form
pub const EVENT_TYPE_FIELD: &str = "eventType";

/// Any pipeline event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum AnyEvent {
    #[serde(rename = "PDFCreated")]
    PdfCreated(PdfCreatedEvent),
    #[serde(rename = "PNGCreated")]
    PngCreated(PngCreatedEvent),
    TextProcessed(TextProcessedEvent),
    AudioChunkCreated(AudioChunkCreatedEvent),
    WavFileCreated(WavFileCreatedEvent),
    FinalAudioCreated(FinalAudioCreatedEvent),
}

/// Run `$body` with `$event` bound to the inner payload
macro_rules! with_inner {
    ($self:expr, $event:ident => $body:expr) => {
        match $self {
            AnyEvent::PdfCreated($event) => $body,
            AnyEvent::PngCreated($event) => $body,
            AnyEvent::TextProcessed($event) => $body,
            AnyEvent::AudioChunkCreated($event) => $body,
            AnyEvent::WavFileCreated($event) => $body,
            AnyEvent::FinalAudioCreated($event) => $body,
        }
    };
}

impl AnyEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AnyEvent::PdfCreated(_) => EventKind::PdfCreated,
            AnyEvent::PngCreated(_) => EventKind::PngCreated,
            AnyEvent::TextProcessed(_) => EventKind::TextProcessed,
            AnyEvent::AudioChunkCreated(_) => EventKind::AudioChunkCreated,
            AnyEvent::WavFileCreated(_) => EventKind::WavFileCreated,
            AnyEvent::FinalAudioCreated(_) => EventKind::FinalAudioCreated,
        }
    }

    pub fn header(&self) -> &EventHeader {
        with_inner!(self, event => event.header())
    }

    pub fn page(&self) -> Option<PageScope> {
        with_inner!(self, event => event.page())
    }

    pub fn check_encodable(&self) -> Result<(), ContractError> {
        with_inner!(self, event => event.check_encodable())
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        with_inner!(self, event => event.validate())
    }

    /// Decode an untagged payload whose kind the channel already told us
    pub fn decode_as(kind: EventKind, bytes: &[u8]) -> Result<Self, ContractError> {
        Ok(match kind {
            EventKind::PdfCreated => Self::PdfCreated(codec::decode(bytes)?),
            EventKind::PngCreated => Self::PngCreated(codec::decode(bytes)?),
            EventKind::TextProcessed => Self::TextProcessed(codec::decode(bytes)?),
            EventKind::AudioChunkCreated => Self::AudioChunkCreated(codec::decode(bytes)?),
            EventKind::WavFileCreated => Self::WavFileCreated(codec::decode(bytes)?),
            EventKind::FinalAudioCreated => Self::FinalAudioCreated(codec::decode(bytes)?),
        })
    }

    /// Encode the inner payload without the `eventType` tag
    pub fn encode_payload(&self) -> Result<Bytes, ContractError> {
        with_inner!(self, event => codec::encode(event))
    }
}

macro_rules! impl_from_event {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyEvent {
                fn from(event: $ty) -> Self {
                    AnyEvent::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    PdfCreated(PdfCreatedEvent),
    PngCreated(PngCreatedEvent),
    TextProcessed(TextProcessedEvent),
    AudioChunkCreated(AudioChunkCreatedEvent),
    WavFileCreated(WavFileCreatedEvent),
    FinalAudioCreated(FinalAudioCreatedEvent),
);
