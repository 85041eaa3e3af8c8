//! AugmentationPreferences - attached at upload time
//!
//! Controls AI-generated commentary and summary insertion during narration.
//! Carried unchanged from PDFCreated onto every PNGCreated of the document.
//!
//! ## Unset placement
//!
//! Producers that never pick a placement send `"placement": ""` (or leave the
//! field out), typically alongside `"enabled": false`. Both shapes decode to
//! `placement: None`; `None` is omitted on encode. Any other value must be
//! `top` or `bottom`.

use serde::de::{self, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

/// Narration augmentation options for one workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationPreferences {
    pub commentary: CommentarySettings,
    pub summary: SummarySettings,
}

/// Commentary augmentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentarySettings {
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

/// Summary augmentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySettings {
    pub enabled: bool,

    /// Where the summary goes relative to the OCR text
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_placement"
    )]
    pub placement: Option<SummaryPlacement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

/// Summary position relative to the page text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPlacement {
    /// Summary precedes the OCR text
    Top,
    /// Summary follows the OCR text
    #[default]
    Bottom,
}

/// `""` and `null` mean unset; anything else goes through the strict enum
fn deserialize_placement<'de, D>(deserializer: D) -> Result<Option<SummaryPlacement>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(name) => {
            let value: de::value::StrDeserializer<'_, D::Error> = name.into_deserializer();
            SummaryPlacement::deserialize(value).map(Some)
        }
    }
}

impl CommentarySettings {
    pub fn enabled(instructions: Option<String>) -> Self {
        Self {
            enabled: true,
            custom_instructions: instructions,
        }
    }
}

impl SummarySettings {
    pub fn enabled(placement: SummaryPlacement, instructions: Option<String>) -> Self {
        Self {
            enabled: true,
            placement: Some(placement),
            custom_instructions: instructions,
        }
    }

    /// Placement to apply, `Bottom` when unset
    pub fn effective_placement(&self) -> SummaryPlacement {
        self.placement.unwrap_or_default()
    }
}

impl AugmentationPreferences {
    /// Whether any augmentation is switched on
    pub fn any_enabled(&self) -> bool {
        self.commentary.enabled || self.summary.enabled
    }
}
