/*!
 * Readable transcript documents.
 *
 * A `TranscriptDocument` bundles the raw fragments with their paragraphs and
 * two renderings: plain text separated by blank lines, and HTML blocks whose
 * timestamp element carries the paragraph start time for seeking.
 */

use serde::{Deserialize, Serialize};

use super::annotator::{escape_text, Annotator};
use super::model::{CaptionFragment, Highlight, Paragraph};
use super::segmenter::Segmenter;
use super::timestamp::format_timestamp;

/// Segmented transcript with text and HTML renderings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Paragraph texts joined by blank lines
    pub raw: String,

    /// HTML rendering without highlights
    pub formatted: String,

    /// Fragments the document was built from
    #[serde(rename = "segments")]
    pub fragments: Vec<CaptionFragment>,

    pub paragraphs: Vec<Paragraph>,
}

impl TranscriptDocument {
    /// Segment `fragments` and render the document
    pub fn build(segmenter: &Segmenter, fragments: Vec<CaptionFragment>) -> Self {
        let paragraphs = segmenter.segment(&fragments);
        Self::from_paragraphs(fragments, paragraphs)
    }

    /// Render a document from already segmented paragraphs
    pub fn from_paragraphs(fragments: Vec<CaptionFragment>, paragraphs: Vec<Paragraph>) -> Self {
        let raw = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let formatted = paragraphs
            .iter()
            .map(|p| paragraph_block(p.start_time, &escape_text(&p.text)))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            raw,
            formatted,
            fragments,
            paragraphs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Render the HTML blocks with highlight markers
    pub fn render_html(&self, annotator: &Annotator, highlights: &[Highlight]) -> String {
        annotator
            .annotate_paragraphs(&self.paragraphs, highlights)
            .iter()
            .map(|p| paragraph_block(p.start_time, &p.html))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Index of the paragraph being spoken at `time`.
    ///
    /// That is the last paragraph starting at or before `time`; `None` when
    /// `time` precedes the first paragraph.
    pub fn paragraph_at(&self, time: f64) -> Option<usize> {
        let count = self.paragraphs.partition_point(|p| p.start_time <= time);
        count.checked_sub(1)
    }
}

fn paragraph_block(start_time: f64, html: &str) -> String {
    format!(
        "<div class=\"transcript-paragraph\" data-time=\"{t}\"><span class=\"transcript-timestamp\" data-seek=\"{t}\">{label}</span><p>{html}</p></div>",
        t = start_time,
        label = format_timestamp(start_time),
        html = html
    )
}
