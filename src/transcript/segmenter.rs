/*!
 * Paragraph segmentation of timed caption fragments.
 *
 * Fragments are folded left to right into an accumulator. Before a
 * fragment's text is appended, the accumulator is flushed into a new
 * paragraph when it is already long enough, when the speaker paused for
 * longer than the pause threshold, or when it ends a sentence. The split
 * check only ever happens between fragments, so a single oversized
 * fragment is kept whole.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::cleaning::{clean_text, ends_with_sentence};
use super::model::{CaptionFragment, Paragraph};

/// Pause, in seconds, that allows a paragraph break
pub const DEFAULT_PAUSE_THRESHOLD_SECS: f64 = 2.0;

/// Length a paragraph must reach before a pause or sentence end may break it
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 100;

/// Length at which a paragraph is broken unconditionally
pub const DEFAULT_MAX_PARAGRAPH_CHARS: usize = 500;

/// Thresholds driving paragraph breaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Silence between fragments, in seconds, that counts as a pause
    #[serde(default = "default_pause_threshold_secs")]
    pub pause_threshold_secs: f64,

    /// Minimum paragraph length before a soft break is allowed
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,

    /// Paragraph length that forces a break
    #[serde(default = "default_max_paragraph_chars")]
    pub max_paragraph_chars: usize,
}

fn default_pause_threshold_secs() -> f64 {
    DEFAULT_PAUSE_THRESHOLD_SECS
}

fn default_min_paragraph_chars() -> usize {
    DEFAULT_MIN_PARAGRAPH_CHARS
}

fn default_max_paragraph_chars() -> usize {
    DEFAULT_MAX_PARAGRAPH_CHARS
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            pause_threshold_secs: DEFAULT_PAUSE_THRESHOLD_SECS,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            max_paragraph_chars: DEFAULT_MAX_PARAGRAPH_CHARS,
        }
    }
}

/// Why the accumulator was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    MaxLength,
    Pause,
    SentenceEnd,
}

/// Paragraph being built. Lengths are measured in UTF-16 code units.
#[derive(Debug, Default)]
struct Accumulator {
    text: String,
    len: usize,
    start_time: f64,
    end_time: f64,
}

impl Accumulator {
    fn push(&mut self, text: &str, fragment: &CaptionFragment) {
        if !self.text.is_empty() {
            self.text.push(' ');
            self.len += 1;
        }
        self.text.push_str(text);
        self.len += text.encode_utf16().count();
        self.end_time = fragment.end();
    }

    fn take(&mut self, next_start: f64) -> Paragraph {
        let paragraph = Paragraph {
            text: std::mem::take(&mut self.text),
            start_time: self.start_time,
            end_time: Some(self.end_time),
        };
        self.len = 0;
        self.start_time = next_start;
        paragraph
    }
}

/// Groups caption fragments into paragraphs
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    /// Create a segmenter with the given thresholds
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment an ordered fragment list into paragraphs.
    ///
    /// Fragments that clean to nothing are skipped entirely. The gap is
    /// always measured against the preceding fragment of the input, whether
    /// or not that fragment contributed text.
    pub fn segment(&self, fragments: &[CaptionFragment]) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        let mut current = Accumulator::default();

        for (index, fragment) in fragments.iter().enumerate() {
            let text = clean_text(&fragment.text);
            if text.is_empty() {
                continue;
            }

            let gap = match index.checked_sub(1).map(|i| &fragments[i]) {
                Some(previous) => fragment.start - previous.end(),
                None => 0.0,
            };

            if !current.text.is_empty() {
                if let Some(reason) = self.break_reason(&current, gap) {
                    debug!(
                        "Paragraph break before fragment {} ({:?}, {} chars, gap {:.2}s)",
                        index, reason, current.len, gap
                    );
                    paragraphs.push(current.take(fragment.start));
                }
            }

            if current.text.is_empty() {
                current.start_time = fragment.start;
            }

            current.push(&text, fragment);
        }

        if !current.text.is_empty() {
            paragraphs.push(current.take(0.0));
        }

        debug!("Segmented {} fragments into {} paragraphs", fragments.len(), paragraphs.len());
        paragraphs
    }

    fn break_reason(&self, current: &Accumulator, gap: f64) -> Option<BreakReason> {
        let long_enough = current.len >= self.config.min_paragraph_chars;

        if current.len >= self.config.max_paragraph_chars {
            Some(BreakReason::MaxLength)
        } else if gap > self.config.pause_threshold_secs && long_enough {
            Some(BreakReason::Pause)
        } else if long_enough && ends_with_sentence(&current.text) {
            Some(BreakReason::SentenceEnd)
        } else {
            None
        }
    }
}

/// Segment with the default thresholds
pub fn segment(fragments: &[CaptionFragment]) -> Vec<Paragraph> {
    Segmenter::default().segment(fragments)
}
