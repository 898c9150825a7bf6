/*!
 * Transcript segmentation and highlight annotation.
 *
 * Raw caption fragments flow through two independent stages:
 *
 * - `segmenter`: cleans fragment text (`cleaning`) and groups fragments into
 *   paragraphs with a representative start time
 * - `annotator`: escapes paragraph text and overlays highlight markers
 *
 * Supporting modules:
 * - `model`: fragments, paragraphs, highlights
 * - `timestamp`: `M:SS` / `H:MM:SS` formatting
 * - `document`: text and HTML renderings of a segmented transcript
 * - `highlights`: per-item highlight bookkeeping
 * - `cache`: fingerprint-keyed paragraph cache
 * - `payload`: JSON decoding with explicit rejection of null lists
 */

pub use self::annotator::{escape_html, escape_text, highlight_spans, AnnotationMode, Annotator, HighlightSpan};
pub use self::cache::ParagraphCache;
pub use self::cleaning::{clean_text, ends_with_sentence};
pub use self::document::TranscriptDocument;
pub use self::highlights::{HighlightSet, NewHighlight};
pub use self::model::{AnnotatedParagraph, CaptionFragment, Highlight, HighlightColor, Paragraph};
pub use self::segmenter::{segment, SegmentationConfig, Segmenter};
pub use self::timestamp::{format_timestamp, parse_timestamp};

pub mod annotator;
pub mod cache;
pub mod cleaning;
pub mod document;
pub mod highlights;
pub mod model;
pub mod payload;
pub mod segmenter;
pub mod timestamp;
