/*!
 * Transcript service.
 *
 * Ties a caption source to the transcript core: resolves the video
 * identifier, fetches fragments, segments them through the paragraph cache
 * and renders the resulting document.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::time::Instant;

use crate::app_config::{Config, SourceProvider};
use crate::providers::supadata::Supadata;
use crate::providers::CaptionSource;
use crate::source_utils;
use crate::transcript::{
    Annotator, CaptionFragment, Highlight, ParagraphCache, Segmenter, TranscriptDocument,
};

/// Fetches, segments and annotates transcripts
#[derive(Debug)]
pub struct TranscriptService {
    source: Box<dyn CaptionSource>,
    segmenter: Segmenter,
    annotator: Annotator,
    cache: ParagraphCache,
    default_language: String,
}

impl TranscriptService {
    /// Create a service over an explicit caption source
    pub fn new(config: &Config, source: Box<dyn CaptionSource>) -> Self {
        Self {
            source,
            segmenter: Segmenter::new(config.segmentation.clone()),
            annotator: Annotator::new(config.annotation.mode),
            cache: ParagraphCache::default(),
            default_language: config.source.default_language.clone(),
        }
    }

    /// Create a service using the configured caption provider
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let source: Box<dyn CaptionSource> = match config.source.provider {
            SourceProvider::Supadata => Box::new(Supadata::new(
                config.source.resolved_api_key(),
                config.source.endpoint.clone(),
                config.source.timeout_secs,
            )),
        };
        debug!("Using caption provider {}", config.source.provider);

        Ok(Self::new(config, source))
    }

    /// Name of the caption source in use
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    pub fn cache(&self) -> &ParagraphCache {
        &self.cache
    }

    /// Fetch and segment the transcript of a video link or identifier
    pub async fn fetch_transcript(&self, url_or_id: &str, language: Option<&str>) -> Result<TranscriptDocument> {
        let video_id = source_utils::extract_video_id(url_or_id)
            .ok_or_else(|| anyhow!("Could not find a video identifier in: {}", url_or_id))?;

        let language = source_utils::validate_language(language.unwrap_or(&self.default_language))?;

        info!("Fetching transcript for {} ({}) from {}", video_id, language, self.source.name());
        let started = Instant::now();

        let fragments = self.source.fetch_captions(&video_id, &language).await?;
        debug!("Received {} fragments in {:?}", fragments.len(), started.elapsed());

        Ok(self.build_document(fragments))
    }

    /// Segment fragments into a document, reusing cached paragraphs
    pub fn build_document(&self, fragments: Vec<CaptionFragment>) -> TranscriptDocument {
        let paragraphs = self.cache.segment(&self.segmenter, &fragments);
        TranscriptDocument::from_paragraphs(fragments, paragraphs.as_ref().clone())
    }

    /// Render a document's HTML with highlight markers
    pub fn annotate(&self, document: &TranscriptDocument, highlights: &[Highlight]) -> String {
        document.render_html(&self.annotator, highlights)
    }
}
