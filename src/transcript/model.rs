/*!
 * Data model for timed captions, paragraphs and highlights.
 *
 * Field names serialize in camelCase so that paragraph caches and highlight
 * sets round-trip with the records the rest of the application persists.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One timed unit of caption text, as supplied by a caption source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    /// Raw caption text, possibly entity-encoded
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
}

impl CaptionFragment {
    /// Create a new fragment
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// Offset at which the fragment stops being spoken
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A merged, human-readable span of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Cleaned, space-joined fragment texts
    pub text: String,

    /// Start of the first fragment that contributed text
    pub start_time: f64,

    /// End of the last fragment that contributed text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

impl Paragraph {
    /// Create a paragraph without end time information
    pub fn new(text: impl Into<String>, start_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time: None,
        }
    }
}

/// Highlight color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Pink,
}

impl HighlightColor {
    /// All palette entries in display order
    pub const ALL: [HighlightColor; 4] = [Self::Yellow, Self::Green, Self::Blue, Self::Pink];

    /// Background color used by the highlight marker
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Yellow => "#fef08a",
            Self::Green => "#bbf7d0",
            Self::Blue => "#bfdbfe",
            Self::Pink => "#fbcfe8",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
        }
    }

    /// Resolve a stored color name, falling back to yellow
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HighlightColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "pink" => Ok(Self::Pink),
            other => Err(format!("Unknown highlight color: {}", other)),
        }
    }
}

impl From<Option<String>> for HighlightColor {
    fn from(name: Option<String>) -> Self {
        name.map(|n| Self::from_name(&n)).unwrap_or_default()
    }
}

impl From<HighlightColor> for String {
    fn from(color: HighlightColor) -> Self {
        color.as_str().to_string()
    }
}

/// A user-selected substring of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Caller-assigned identifier, unique per source item
    pub id: String,

    /// The highlighted substring as originally selected
    pub text: String,

    #[serde(default)]
    pub color: HighlightColor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Playback offset in seconds at which the highlight was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,

    /// Selection offsets recorded by the editor; not used for matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
}

impl Highlight {
    /// Create a highlight with no note or timestamp
    pub fn new(id: impl Into<String>, text: impl Into<String>, color: HighlightColor) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            color,
            note: None,
            timestamp: None,
            start_index: None,
            end_index: None,
        }
    }

    /// Attach a playback timestamp
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A paragraph whose text has been escaped and highlight-marked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedParagraph {
    pub html: String,
    pub start_time: f64,
}
