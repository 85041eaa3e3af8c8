//! Wire codec
//!
//! JSON, field-name keyed. Pure functions with no shared state; safe to call
//! from any thread.
//!
//! ## Untagged vs tagged
//! - [`encode`] / [`decode`]: the payload alone. The channel names the kind,
//!   so the caller picks `E`.
//! - [`encode_tagged`] / [`decode_tagged`]: the payload plus an `eventType`
//!   field, for channels carrying several kinds. Tagged bytes still decode
//!   through [`decode`].
//!
//! ## Failures
//! Every decode error carries the structure that failed and classifies as
//! syntax, data or truncated (see [`crate::DecodeFailure`]). Encoding fails
//! only for values JSON cannot carry back, such as a NaN temperature.

use bytes::Bytes;
use tracing::trace;

use crate::{AnyEvent, ContractError, Event, EventKind, EVENT_TYPE_FIELD};

/// Encode an event as its untagged JSON payload
///
/// # Errors
/// - `Unencodable` when a value cannot survive the round trip (non-finite float)
/// - `Encode` when the serializer fails
pub fn encode<E: Event>(event: &E) -> Result<Bytes, ContractError> {
    event.check_encodable()?;
    let buf = serde_json::to_vec(event).map_err(|e| ContractError::encode(E::KIND.as_str(), e))?;
    trace!(kind = %E::KIND, bytes = buf.len(), "encoded event");
    Ok(Bytes::from(buf))
}

/// Decode an untagged JSON payload into `E`
///
/// Unknown fields are ignored. Header fields are not checked for emptiness.
///
/// # Errors
/// `Decode` naming `E`'s kind for malformed, truncated or mistyped input
pub fn decode<E: Event>(bytes: &[u8]) -> Result<E, ContractError> {
    let event = serde_json::from_slice(bytes).map_err(|e| {
        trace!(kind = %E::KIND, bytes = bytes.len(), error = %e, "decode failed");
        ContractError::decode(E::KIND.as_str(), e)
    })?;
    trace!(kind = %E::KIND, bytes = bytes.len(), "decoded event");
    Ok(event)
}

/// Encode with the `eventType` tag, for multiplexed channels
pub fn encode_tagged(event: &AnyEvent) -> Result<Bytes, ContractError> {
    let kind = event.kind();
    event.check_encodable()?;
    let buf = serde_json::to_vec(event).map_err(|e| ContractError::encode(kind.as_str(), e))?;
    trace!(kind = %kind, bytes = buf.len(), "encoded tagged event");
    Ok(Bytes::from(buf))
}

/// Decode a tagged message of any kind
///
/// # Errors
/// `Decode` naming the tagged kind when the tag is readable and known, and
/// `AnyEvent` otherwise (malformed JSON, missing or unknown tag)
pub fn decode_tagged(bytes: &[u8]) -> Result<AnyEvent, ContractError> {
    let event: AnyEvent = serde_json::from_slice(bytes).map_err(|e| {
        let structure = tagged_kind(bytes).map_or("AnyEvent", EventKind::as_str);
        trace!(structure, bytes = bytes.len(), error = %e, "tagged decode failed");
        ContractError::decode(structure, e)
    })?;
    trace!(kind = %event.kind(), bytes = bytes.len(), "decoded tagged event");
    Ok(event)
}

/// Kind named by the `eventType` tag, matched exactly
fn tagged_kind(bytes: &[u8]) -> Option<EventKind> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let tag = value.get(EVENT_TYPE_FIELD)?.as_str()?;
    EventKind::ALL.into_iter().find(|kind| kind.as_str() == tag)
}
