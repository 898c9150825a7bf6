/*!
 * Tests for paragraph segmentation
 */

use quotevault::transcript::{clean_text, segment, SegmentationConfig, Segmenter};
use crate::common::{self, fragment};

#[test]
fn test_segment_withShortPause_shouldKeepSingleParagraph() {
    let paragraphs = segment(&common::short_pause_fragments());

    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "Hello world. Next idea here.");
    assert_eq!(paragraphs[0].start_time, 0.0);
    assert_eq!(paragraphs[0].end_time, Some(5.5));
}

#[test]
fn test_segment_withEmptyInput_shouldReturnNoParagraphs() {
    assert!(segment(&[]).is_empty());
}

#[test]
fn test_segment_withOnlySoundCues_shouldReturnNoParagraphs() {
    let fragments = vec![
        fragment("[Music]", 0.0, 2.0),
        fragment("  [Applause]  ", 2.0, 2.0),
        fragment("   ", 4.0, 1.0),
    ];

    assert!(segment(&fragments).is_empty());
}

#[test]
fn test_segment_withLeadingSoundCue_shouldStartAtFirstSpokenFragment() {
    let fragments = vec![
        fragment("[Music]", 0.0, 1.0),
        fragment("Hello.", 1.0, 1.0),
    ];

    let paragraphs = segment(&fragments);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "Hello.");
    assert_eq!(paragraphs[0].start_time, 1.0);
}

#[test]
fn test_segment_withByteOrderMarkFragment_shouldSkipIt() {
    let fragments = vec![
        fragment("\u{feff}", 0.0, 1.0),
        fragment("Hello.", 1.5, 1.0),
    ];

    let paragraphs = segment(&fragments);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "Hello.");
    assert_eq!(paragraphs[0].start_time, 1.5);
}

#[test]
fn test_segment_withMaxLengthReached_shouldBreakBeforeNextFragment() {
    let fragments: Vec<_> = (0..10)
        .map(|i| fragment(&"a".repeat(99), i as f64, 1.0))
        .collect();

    let paragraphs = segment(&fragments);

    assert_eq!(paragraphs.len(), 2);
    // six fragments: the fifth leaves 499 chars, still under the limit
    assert_eq!(paragraphs[0].text.len(), 599);
    assert_eq!(paragraphs[0].start_time, 0.0);
    assert_eq!(paragraphs[1].text.len(), 399);
    assert_eq!(paragraphs[1].start_time, 6.0);
    assert_eq!(paragraphs[1].end_time, Some(10.0));
}

#[test]
fn test_segment_withOversizedFragment_shouldKeepItWhole() {
    let long = "b".repeat(1200);
    let fragments = vec![fragment(&long, 0.0, 30.0), fragment("tail", 30.0, 1.0)];

    let paragraphs = segment(&fragments);

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text, long);
    assert_eq!(paragraphs[1].text, "tail");
    assert_eq!(paragraphs[1].start_time, 30.0);
}

#[test]
fn test_segment_withLongPauseAfterEnoughText_shouldBreak() {
    let fragments = vec![
        fragment(&"c".repeat(120), 0.0, 1.0),
        fragment("after the pause", 3.5, 1.0),
    ];

    let paragraphs = segment(&fragments);

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].text, "after the pause");
    assert_eq!(paragraphs[1].start_time, 3.5);
    assert_eq!(paragraphs[0].end_time, Some(1.0));
}

#[test]
fn test_segment_withPauseEqualToThreshold_shouldNotBreak() {
    let fragments = vec![
        fragment(&"c".repeat(120), 0.0, 1.0),
        fragment("right on time", 3.0, 1.0),
    ];

    assert_eq!(segment(&fragments).len(), 1);
}

#[test]
fn test_segment_withSentenceEndAfterEnoughText_shouldBreak() {
    let mut first = "d".repeat(110);
    first.push('!');
    let fragments = vec![fragment(&first, 0.0, 1.0), fragment("next", 1.0, 1.0)];

    let paragraphs = segment(&fragments);

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text, first);
}

#[test]
fn test_segment_withSentenceEndBeforeMinLength_shouldNotBreak() {
    let fragments = vec![
        fragment("Short sentence.", 0.0, 1.0),
        fragment("Another one.", 1.0, 1.0),
    ];

    let paragraphs = segment(&fragments);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "Short sentence. Another one.");
}

#[test]
fn test_segment_withSkippedFragmentBetween_shouldMeasureGapFromSkippedFragment() {
    // the cue ends 0.5s before the next fragment, the spoken text 4.5s before
    let fragments = vec![
        fragment(&"e".repeat(120), 0.0, 1.0),
        fragment("[Music]", 1.0, 4.0),
        fragment("continued", 5.5, 1.0),
    ];
    assert_eq!(segment(&fragments).len(), 1);

    // the cue ends 2.5s before the next fragment
    let fragments = vec![
        fragment(&"e".repeat(120), 0.0, 1.0),
        fragment("[Music]", 1.0, 0.5),
        fragment("continued", 4.0, 1.0),
    ];
    let paragraphs = segment(&fragments);
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].start_time, 4.0);
}

#[test]
fn test_segment_withOverlappingFragments_shouldTreatNegativeGapAsNoPause() {
    let fragments = vec![
        fragment(&"f".repeat(120), 0.0, 5.0),
        fragment("overlap", 2.0, 1.0),
    ];

    assert_eq!(segment(&fragments).len(), 1);
}

#[test]
fn test_segment_withCustomThresholds_shouldUseThem() {
    let segmenter = Segmenter::new(SegmentationConfig {
        pause_threshold_secs: 0.5,
        min_paragraph_chars: 5,
        max_paragraph_chars: 50,
    });
    let fragments = vec![
        fragment("first part", 0.0, 1.0),
        fragment("second part", 1.0, 1.0),
        fragment("after a short pause", 2.8, 1.0),
    ];

    let paragraphs = segmenter.segment(&fragments);

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text, "first part second part");
    assert_eq!(paragraphs[1].text, "after a short pause");
}

#[test]
fn test_segment_withLectureCaptions_shouldProduceThreeParagraphs() {
    let fragments = common::lecture_fragments();
    let paragraphs = segment(&fragments);

    assert_eq!(paragraphs.len(), 3);
    assert!(paragraphs[0].text.starts_with("welcome back everyone, today we're talking about"));
    assert!(paragraphs[0].text.contains("category theory & why"));
    assert_eq!(paragraphs[0].start_time, fragments[1].start);
    assert!(paragraphs[1].text.starts_with("the first idea"));
    assert_eq!(paragraphs[1].start_time, fragments[5].start);
    assert!(paragraphs[2].text.ends_with("<preserving> structure. questions?"));
    assert_eq!(paragraphs[2].start_time, fragments[8].start);
}

#[test]
fn test_segment_onGeneratedFragments_shouldPreserveTextAndOrder() {
    for seed in [1, 2, 3, 42, 1234] {
        let fragments = common::generated_fragments(seed, 300);
        let paragraphs = segment(&fragments);

        // no empty paragraphs
        assert!(paragraphs.iter().all(|p| !p.text.is_empty()));

        // start times follow the input order
        assert!(paragraphs.windows(2).all(|w| w[0].start_time <= w[1].start_time));

        // no text is lost or duplicated
        let expected: Vec<String> = fragments
            .iter()
            .map(|f| clean_text(&f.text))
            .filter(|t| !t.is_empty())
            .collect();
        let joined: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(joined.join(" "), expected.join(" "));
    }
}

#[test]
fn test_segment_calledTwice_shouldBeDeterministic() {
    let fragments = common::generated_fragments(99, 100);
    assert_eq!(segment(&fragments), segment(&fragments));
}
