/*!
 * Mock caption source for testing.
 *
 * - `MockCaptionSource::working(fragments)` - Always returns the fragments
 * - `MockCaptionSource::empty()` - Reports that no transcript exists
 * - `MockCaptionSource::failing()` - Always fails with an API error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::CaptionSource;
use crate::transcript::CaptionFragment;

/// Behavior mode for the mock source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the configured fragments
    Working,
    /// Answers without a transcript
    Empty,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock caption source
#[derive(Debug)]
pub struct MockCaptionSource {
    behavior: MockBehavior,
    fragments: Vec<CaptionFragment>,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockCaptionSource {
    pub fn new(behavior: MockBehavior, fragments: Vec<CaptionFragment>) -> Self {
        Self {
            behavior,
            fragments,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working(fragments: Vec<CaptionFragment>) -> Self {
        Self::new(MockBehavior::Working, fragments)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty, Vec::new())
    }

    pub fn intermittent(fragments: Vec<CaptionFragment>, fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every }, fragments)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing, Vec::new())
    }

    /// Number of fetches served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockCaptionSource {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            fragments: self.fragments.clone(),
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl CaptionSource for MockCaptionSource {
    async fn fetch_captions(&self, video_id: &str, _language: &str) -> Result<Vec<CaptionFragment>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working if self.fragments.is_empty() => {
                Err(ProviderError::NoTranscript(format!("no captions for {}", video_id)))
            }
            MockBehavior::Working => Ok(self.fragments.clone()),
            MockBehavior::Empty => Err(ProviderError::NoTranscript(format!("no captions for {}", video_id))),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.fragments.clone())
                }
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
