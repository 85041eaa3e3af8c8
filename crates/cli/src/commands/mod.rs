//! Command implementations.

mod decode;
mod kinds;
mod sample;
mod validate;

pub use decode::run_decode;
pub use kinds::run_kinds;
pub use sample::run_sample;
pub use validate::run_validate;

use std::io::Read;
use std::path::Path;

use contracts::{AnyEvent, ContractError, EventKind};

use crate::error::{CliError, Result};

/// Read a message from a file, or stdin for `-`
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| CliError::input_read(path, e))?;
        return Ok(buf);
    }
    std::fs::read(path).map_err(|e| CliError::input_read(path, e))
}

/// Decode by channel kind when known, otherwise as a tagged message
pub(crate) fn decode_message(
    kind: Option<EventKind>,
    bytes: &[u8],
) -> std::result::Result<AnyEvent, ContractError> {
    match kind {
        Some(kind) => AnyEvent::decode_as(kind, bytes),
        None => contracts::decode_tagged(bytes),
    }
}

/// Canonical encoding of `event` as text
///
/// Pretty output goes through `serde_json::Value`, so keys come out sorted.
pub(crate) fn render_event(event: &AnyEvent, tagged: bool, pretty: bool) -> Result<String> {
    let encoded = if tagged {
        contracts::encode_tagged(event)?
    } else {
        event.encode_payload()?
    };
    observability::record_encoded(event.kind(), encoded.len());

    if !pretty {
        return Ok(String::from_utf8_lossy(&encoded).into_owned());
    }
    let value: serde_json::Value = serde_json::from_slice(&encoded)
        .map_err(|e| ContractError::decode(event.kind().as_str(), e))?;
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| ContractError::encode(event.kind().as_str(), e))?;
    Ok(text)
}
