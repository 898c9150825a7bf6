/*!
 * Decoding of fragment and highlight lists from JSON payloads.
 *
 * This is where caller errors are caught: a `null` or missing list is
 * rejected with `TranscriptError::InvalidArgument` instead of being read as
 * an empty transcript.
 */

use serde::Deserialize;
use serde_json::Value;

use super::highlights::HighlightSet;
use super::model::{CaptionFragment, Highlight};
use crate::errors::TranscriptError;

/// Caption item as delivered by the transcription provider (milliseconds)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderCaption {
    #[serde(default)]
    pub text: String,
    pub offset: f64,
    #[serde(default)]
    pub duration: f64,
}

impl From<ProviderCaption> for CaptionFragment {
    fn from(item: ProviderCaption) -> Self {
        CaptionFragment::new(item.text, item.offset / 1000.0, item.duration / 1000.0)
    }
}

fn require_list<'a>(value: Option<&'a Value>, what: &str) -> Result<&'a Value, TranscriptError> {
    match value {
        None => Err(TranscriptError::InvalidArgument(format!("{} is missing", what))),
        Some(Value::Null) => Err(TranscriptError::InvalidArgument(format!("{} is null", what))),
        Some(list @ Value::Array(_)) => Ok(list),
        Some(_) => Err(TranscriptError::Payload(format!("{} must be an array", what))),
    }
}

/// Convert a provider `content` list into fragments in seconds
pub fn decode_provider_content(content: Option<&Value>) -> Result<Vec<CaptionFragment>, TranscriptError> {
    let list = require_list(content, "caption content")?;
    let items: Vec<ProviderCaption> = serde_json::from_value(list.clone())?;
    Ok(items.into_iter().map(CaptionFragment::from).collect())
}

/// Decode a fragment list.
///
/// Accepts a bare array of fragments (seconds), a provider payload with a
/// `content` array (milliseconds), or a stored document with `segments`.
pub fn decode_fragments(json: &str) -> Result<Vec<CaptionFragment>, TranscriptError> {
    let value: Value = serde_json::from_str(json)?;

    match &value {
        Value::Null => Err(TranscriptError::InvalidArgument("fragment list is null".to_string())),
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(map) => {
            if map.contains_key("content") {
                decode_provider_content(map.get("content"))
            } else {
                let list = require_list(map.get("segments"), "fragment list")?;
                Ok(serde_json::from_value(list.clone())?)
            }
        }
        _ => Err(TranscriptError::Payload("expected a fragment array or object".to_string())),
    }
}

/// Decode a highlight list, either bare or as the `highlights` field of a record
pub fn decode_highlights(json: &str) -> Result<HighlightSet, TranscriptError> {
    let value: Value = serde_json::from_str(json)?;

    let list = match &value {
        Value::Object(map) => require_list(map.get("highlights"), "highlight list")?,
        other => require_list(Some(other), "highlight list")?,
    };

    let highlights: Vec<Highlight> = serde_json::from_value(list.clone())?;
    HighlightSet::from_highlights(highlights)
}
