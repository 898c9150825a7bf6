/*!
 * Caption sources.
 *
 * A caption source turns a video identifier into the raw, timed caption
 * fragments the segmenter consumes:
 * - `supadata`: hosted transcription API
 * - `mock`: canned fragments and failures for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::transcript::CaptionFragment;

/// Common trait for all caption sources
///
/// Fetch failures, rate limits and missing transcripts are reported through
/// `ProviderError`; an empty `Ok` list is never returned.
#[async_trait]
pub trait CaptionSource: Send + Sync + Debug {
    /// Fetch the caption fragments of a video
    ///
    /// # Arguments
    /// * `video_id` - Provider-side video identifier
    /// * `language` - ISO 639-1 code, or `auto` for the original language
    ///
    /// # Returns
    /// * `Result<Vec<CaptionFragment>, ProviderError>` - Fragments ordered by start offset
    async fn fetch_captions(&self, video_id: &str, language: &str) -> Result<Vec<CaptionFragment>, ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}

pub mod mock;
pub mod supadata;
