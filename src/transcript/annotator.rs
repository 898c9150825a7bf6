/*!
 * Highlight annotation of paragraph text.
 *
 * Paragraph text is always HTML-escaped before any marker is inserted, so
 * neither caption text nor highlight text can inject markup. Text content
 * escapes `& < >` only; the highlight id attribute also escapes quotes. Highlights are
 * matched case-insensitively as literal substrings, longest first.
 *
 * Two strategies are available:
 * - `AnnotationMode::Spans` resolves every match against the unmodified
 *   paragraph text, discards matches that overlap an already accepted one,
 *   and renders everything in a single pass. Markers never nest.
 * - `AnnotationMode::Legacy` replaces matches one highlight at a time in the
 *   progressively marked-up string. Later, shorter highlights can match
 *   inside markers inserted earlier, which nests or breaks markup. It exists
 *   to reproduce renderings persisted by older clients.
 */

use log::{trace, warn};
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::model::{AnnotatedParagraph, Highlight, Paragraph};

/// CSS class carried by every highlight marker
pub const MARKER_CLASS: &str = "transcript-highlight";

/// Attribute carrying the highlight identity on a marker
pub const MARKER_ID_ATTRIBUTE: &str = "data-highlight-id";

/// Escape text content the way a browser serializes a text node: only
/// `&`, `<` and `>` are replaced, quotes are kept as they are
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for use in quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Open a marker element for a highlight
fn marker_open(highlight: &Highlight) -> String {
    format!(
        "<mark class=\"{}\" {}=\"{}\" style=\"background-color: {}\">",
        MARKER_CLASS,
        MARKER_ID_ATTRIBUTE,
        escape_html(&highlight.id),
        highlight.color.hex()
    )
}

const MARKER_CLOSE: &str = "</mark>";

/// Highlight matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationMode {
    /// Non-overlapping spans resolved against the original text
    #[default]
    Spans,
    /// Sequential longest-first replacement into the marked-up string
    Legacy,
}

impl fmt::Display for AnnotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spans => write!(f, "spans"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for AnnotationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "spans" => Ok(Self::Spans),
            "legacy" => Ok(Self::Legacy),
            _ => Err(anyhow::anyhow!("Invalid annotation mode: {}", s)),
        }
    }
}

/// A resolved highlight occurrence, as a byte range of the unescaped text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub highlight: &'a Highlight,
}

impl HighlightSpan<'_> {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

/// Highlights with usable text, longest first; ties keep input order
fn by_length_desc(highlights: &[Highlight]) -> Vec<&Highlight> {
    let mut ordered: Vec<&Highlight> = highlights
        .iter()
        .filter(|h| !h.text.is_empty())
        .collect();
    ordered.sort_by_key(|h| std::cmp::Reverse(h.text.encode_utf16().count()));
    ordered
}

/// Case-insensitive literal matcher
fn literal_matcher(literal: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping highlight that cannot be matched: {}", e);
            None
        }
    }
}

/// Resolve non-overlapping highlight spans in `text`, ordered by position.
///
/// Longer highlights claim text first; a later match is dropped when it
/// overlaps any span already claimed.
pub fn highlight_spans<'a>(text: &str, highlights: &'a [Highlight]) -> Vec<HighlightSpan<'a>> {
    let mut spans: Vec<HighlightSpan<'a>> = Vec::new();

    for highlight in by_length_desc(highlights) {
        let Some(matcher) = literal_matcher(&highlight.text) else {
            continue;
        };

        let before = spans.len();
        for found in matcher.find_iter(text) {
            if spans.iter().any(|s| s.overlaps(found.start(), found.end())) {
                continue;
            }
            spans.push(HighlightSpan {
                start: found.start(),
                end: found.end(),
                highlight,
            });
        }

        if spans.len() == before {
            trace!("Highlight {} has no free match in this paragraph", highlight.id);
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

/// Overlays highlight markers onto paragraph text
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotator {
    mode: AnnotationMode,
}

impl Annotator {
    pub fn new(mode: AnnotationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AnnotationMode {
        self.mode
    }

    /// Escape `text` and wrap every highlight occurrence in a marker
    pub fn annotate(&self, text: &str, highlights: &[Highlight]) -> String {
        match self.mode {
            AnnotationMode::Spans => Self::annotate_spans(text, highlights),
            AnnotationMode::Legacy => Self::annotate_legacy(text, highlights),
        }
    }

    /// Annotate every paragraph against the same highlight set
    pub fn annotate_paragraphs(
        &self,
        paragraphs: &[Paragraph],
        highlights: &[Highlight],
    ) -> Vec<AnnotatedParagraph> {
        paragraphs
            .iter()
            .map(|p| AnnotatedParagraph {
                html: self.annotate(&p.text, highlights),
                start_time: p.start_time,
            })
            .collect()
    }

    fn annotate_spans(text: &str, highlights: &[Highlight]) -> String {
        let spans = highlight_spans(text, highlights);
        if spans.is_empty() {
            return escape_text(text);
        }

        let mut html = String::with_capacity(text.len() + spans.len() * 96);
        let mut cursor = 0;
        for span in &spans {
            html.push_str(&escape_text(&text[cursor..span.start]));
            html.push_str(&marker_open(span.highlight));
            html.push_str(&escape_text(&text[span.start..span.end]));
            html.push_str(MARKER_CLOSE);
            cursor = span.end;
        }
        html.push_str(&escape_text(&text[cursor..]));
        html
    }

    fn annotate_legacy(text: &str, highlights: &[Highlight]) -> String {
        let mut html = escape_text(text);

        for highlight in by_length_desc(highlights) {
            let Some(matcher) = literal_matcher(&escape_text(&highlight.text)) else {
                continue;
            };

            let open = marker_open(highlight);
            html = matcher
                .replace_all(&html, |caps: &Captures| {
                    format!("{}{}{}", open, &caps[0], MARKER_CLOSE)
                })
                .into_owned();
        }

        html
    }
}
