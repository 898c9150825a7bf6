/*!
 * End to end tests: fetch captions, segment them and overlay highlights
 */

use anyhow::Result;
use quotevault::app_config::Config;
use quotevault::file_utils::FileManager;
use quotevault::providers::mock::MockCaptionSource;
use quotevault::transcript::{AnnotationMode, HighlightColor, HighlightSet, NewHighlight};
use quotevault::{ProviderError, TranscriptService};
use crate::common;

fn service_with(source: MockCaptionSource) -> TranscriptService {
    TranscriptService::new(&Config::default(), Box::new(source))
}

#[tokio::test]
async fn test_fetchTranscript_withShareLink_shouldSegmentCaptions() -> Result<()> {
    let service = service_with(MockCaptionSource::working(common::lecture_fragments()));

    let document = service
        .fetch_transcript("https://youtu.be/dQw4w9WgXcQ?t=3", Some("en"))
        .await?;

    assert_eq!(document.paragraphs.len(), 3);
    assert_eq!(document.fragments.len(), 11);
    assert!(document.raw.starts_with("welcome back everyone"));
    assert!(!document.raw.contains("[Music]"));
    Ok(())
}

#[tokio::test]
async fn test_fetchTranscript_twice_shouldReuseCachedParagraphs() -> Result<()> {
    let service = service_with(MockCaptionSource::working(common::lecture_fragments()));

    let first = service.fetch_transcript("dQw4w9WgXcQ", None).await?;
    let second = service.fetch_transcript("dQw4w9WgXcQ", None).await?;

    assert_eq!(first, second);
    assert_eq!(service.cache().stats(), (1, 1, 0.5));
    Ok(())
}

#[tokio::test]
async fn test_fetchTranscript_withUnrecognizedLink_shouldNotCallSource() {
    let source = MockCaptionSource::working(common::lecture_fragments());
    let service = service_with(source.clone());

    let result = service.fetch_transcript("https://example.com/watch", None).await;

    assert!(result.is_err());
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn test_fetchTranscript_withInvalidLanguage_shouldFail() {
    let source = MockCaptionSource::working(common::lecture_fragments());
    let service = service_with(source.clone());

    let result = service.fetch_transcript("dQw4w9WgXcQ", Some("xx")).await;

    assert!(result.is_err());
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn test_fetchTranscript_withoutCaptions_shouldSurfaceProviderError() {
    let service = service_with(MockCaptionSource::empty());

    let err = service.fetch_transcript("dQw4w9WgXcQ", None).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<ProviderError>(), Some(ProviderError::NoTranscript(_))));
}

#[tokio::test]
async fn test_workflow_withSavedHighlights_shouldMarkParagraphHtml() -> Result<()> {
    let service = service_with(MockCaptionSource::working(common::lecture_fragments()));
    let document = service.fetch_transcript("dQw4w9WgXcQ", None).await?;

    let mut highlights = HighlightSet::new();
    highlights.add(NewHighlight::new("Category Theory").color(HighlightColor::Green).timestamp(4.4))?;
    highlights.add(NewHighlight::new("functor").color(HighlightColor::Pink).note("look up later"))?;

    let html = service.annotate(&document, highlights.as_slice());

    let blocks: Vec<&str> = html.lines().collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].contains(">category theory</mark>"));
    assert!(blocks[0].contains("#bbf7d0"));
    assert!(blocks[2].contains(">functor</mark>"));
    assert!(blocks[2].contains("#fbcfe8"));
    assert_eq!(html.matches("<mark").count(), 2);

    // the highlight timestamp maps back to the paragraph it was taken from
    let taken_at = highlights.iter().find_map(|h| h.timestamp).unwrap_or_default();
    assert_eq!(document.paragraph_at(taken_at), Some(0));
    Ok(())
}

#[tokio::test]
async fn test_workflow_withLegacyMode_shouldNestOverlappingHighlights() -> Result<()> {
    let mut config = Config::default();
    config.annotation.mode = AnnotationMode::Legacy;
    let service = TranscriptService::new(
        &config,
        Box::new(MockCaptionSource::working(common::lecture_fragments())),
    );
    let document = service.fetch_transcript("dQw4w9WgXcQ", None).await?;

    let highlights = HighlightSet::from_highlights(vec![
        common::highlight("whole", "the category itself", HighlightColor::Blue),
        common::highlight("part", "category", HighlightColor::Yellow),
    ])?;

    let html = service.annotate(&document, highlights.as_slice());
    let middle = html.lines().nth(1).unwrap_or_default();

    assert!(middle.contains("<mark class=\"transcript-highlight\" data-highlight-id=\"part\""));
    assert_eq!(middle.matches("<mark").count(), 2);
    Ok(())
}

#[test]
fn test_fromConfig_withInvalidThresholds_shouldFail() {
    let mut config = Config::default();
    config.segmentation.min_paragraph_chars = 1000;

    assert!(TranscriptService::from_config(&config).is_err());
}

#[test]
fn test_fromConfig_withDefaultProvider_shouldUseSupadata() -> Result<()> {
    let service = TranscriptService::from_config(&Config::default())?;

    assert_eq!(service.source_name(), "supadata");
    Ok(())
}

#[test]
fn test_fromConfig_withProviderFromJson_shouldSelectIt() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"source": {"provider": "supadata"}}"#)?;

    let service = TranscriptService::from_config(&config)?;

    assert_eq!(service.source_name(), "supadata");
    Ok(())
}

#[test]
fn test_workflow_fromCaptionsFile_shouldWriteRenderedOutputs() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let captions = serde_json::to_string(&common::lecture_fragments())?;
    let input = common::create_test_file(dir.path(), "lecture.json", &captions)?;
    let service = service_with(MockCaptionSource::empty());

    let document = service.build_document(FileManager::read_fragments(&input)?);

    let html_path = FileManager::generate_output_path(&input, "html");
    FileManager::write_output(&html_path, &document.formatted)?;
    let stored_path = FileManager::generate_output_path(&input, "json");
    FileManager::write_output(&stored_path, &serde_json::to_string_pretty(&document)?)?;

    assert!(FileManager::file_exists(dir.path().join("lecture.transcript.html")));
    assert_eq!(std::fs::read_to_string(&html_path)?.lines().count(), 3);

    // a stored document can be segmented again from its `segments`
    let reloaded = service.build_document(FileManager::read_fragments(&stored_path)?);
    assert_eq!(reloaded, document);
    assert_eq!(service.cache().stats().0, 1);
    Ok(())
}
