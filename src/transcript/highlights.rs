/*!
 * Highlight bookkeeping for a single source item.
 *
 * The set is plain caller-owned data: it is persisted alongside the item and
 * handed to the annotator as a slice.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Highlight, HighlightColor};
use crate::errors::TranscriptError;

/// Input for creating a highlight
#[derive(Debug, Clone, Default)]
pub struct NewHighlight {
    pub text: String,
    pub color: Option<HighlightColor>,
    pub note: Option<String>,
    pub timestamp: Option<f64>,
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
}

impl NewHighlight {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: HighlightColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ordered highlights of one source item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightSet {
    highlights: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stored highlights, rejecting empty texts
    pub fn from_highlights(highlights: Vec<Highlight>) -> Result<Self, TranscriptError> {
        if let Some(empty) = highlights.iter().find(|h| h.text.is_empty()) {
            return Err(TranscriptError::InvalidHighlight(format!(
                "highlight {} has empty text",
                empty.id
            )));
        }
        Ok(Self { highlights })
    }

    /// Add a highlight with a fresh identifier
    pub fn add(&mut self, new: NewHighlight) -> Result<&Highlight, TranscriptError> {
        if new.text.is_empty() {
            return Err(TranscriptError::InvalidHighlight(
                "highlight text must not be empty".to_string(),
            ));
        }

        let highlight = Highlight {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            color: new.color.unwrap_or_default(),
            note: new.note,
            timestamp: new.timestamp,
            start_index: new.start_index,
            end_index: new.end_index,
        };
        debug!("Adding highlight {} ({} chars)", highlight.id, highlight.text.len());

        self.highlights.push(highlight);
        Ok(&self.highlights[self.highlights.len() - 1])
    }

    /// Remove a highlight by id
    pub fn remove(&mut self, id: &str) -> Result<Highlight, TranscriptError> {
        let position = self
            .highlights
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| TranscriptError::InvalidHighlight(format!("unknown highlight id: {}", id)))?;
        Ok(self.highlights.remove(position))
    }

    /// Replace the note of a highlight
    pub fn update_note(&mut self, id: &str, note: impl Into<String>) -> Result<(), TranscriptError> {
        let highlight = self
            .highlights
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| TranscriptError::InvalidHighlight(format!("unknown highlight id: {}", id)))?;
        highlight.note = Some(note.into());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter()
    }

    pub fn as_slice(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}
