//! # Contracts
//!
//! Frozen message contracts for the document-to-audio pipeline
//! (PDF → page images → text → speech → final audio).
//! Producer and consumer services depend on this crate; it depends on none of them.
//!
//! ## Wire model
//! - One JSON object per message, camelCase field names, header nested under `header`
//! - The channel a message arrives on names its kind; [`AnyEvent`] adds an
//!   `eventType` tag for channels that carry several kinds
//! - Optional fields are omitted when absent, unknown fields are ignored
//!
//! No I/O happens here. Encode/decode are pure and thread-safe.

pub mod codec;
mod augmentation;
mod envelope;
mod error;
mod event;
mod header;
mod kind;
mod payloads;

pub use augmentation::*;
pub use codec::{decode, decode_tagged, encode, encode_tagged};
pub use envelope::{AnyEvent, EVENT_TYPE_FIELD};
pub use error::*;
pub use event::{validate_header, Event, PageScope};
pub use header::EventHeader;
pub use kind::EventKind;
pub use payloads::*;
