/*!
 * # quotevault - transcript engine of a personal quote vault
 *
 * Turns raw timed captions of videos and podcasts into readable paragraphs,
 * and overlays user highlights onto that text for display while keeping the
 * link back to playback time.
 *
 * ## Features
 *
 * - Caption text cleaning (entities, sound cues, whitespace)
 * - Pause, length and sentence aware paragraph segmentation
 * - Escaping-first highlight annotation with a fixed color palette
 * - `M:SS` / `H:MM:SS` playback timestamps
 * - Caption fetching from a hosted transcription API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: the segmentation and annotation core:
 *   - `transcript::segmenter`: fragments to paragraphs
 *   - `transcript::annotator`: highlight markers over escaped text
 *   - `transcript::document`: text and HTML renderings
 *   - `transcript::cache`: paragraph cache keyed by fragment fingerprint
 * - `transcript_service`: fetch, segment and render orchestration
 * - `providers`: caption sources:
 *   - `providers::supadata`: Supadata transcript API client
 *   - `providers::mock`: test double
 * - `app_config`: Configuration management
 * - `source_utils`: video identifiers and caption languages
 * - `file_utils`: JSON inputs and rendered outputs
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod source_utils;
pub mod transcript;
pub mod transcript_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranscriptError};
pub use transcript::{
    AnnotatedParagraph, AnnotationMode, Annotator, CaptionFragment, Highlight, HighlightColor,
    Paragraph, Segmenter, TranscriptDocument, format_timestamp, segment,
};
pub use transcript_service::TranscriptService;
