/*!
 * Common test utilities for the quotevault test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use quotevault::transcript::{CaptionFragment, Highlight, HighlightColor};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Shorthand for a caption fragment
pub fn fragment(text: &str, start: f64, duration: f64) -> CaptionFragment {
    CaptionFragment::new(text, start, duration)
}

/// Shorthand for a highlight
pub fn highlight(id: &str, text: &str, color: HighlightColor) -> Highlight {
    Highlight::new(id, text, color)
}

/// Two fragments separated by a pause, without enough text to break
pub fn short_pause_fragments() -> Vec<CaptionFragment> {
    vec![
        fragment("Hello world.", 0.0, 1.5),
        fragment("Next idea here.", 4.0, 1.5),
    ]
}

/// A lecture-like caption track with cues, entities, pauses and sentence ends
pub fn lecture_fragments() -> Vec<CaptionFragment> {
    let lines = [
        "[Music]",
        "welcome back everyone, today we&#39;re talking about",
        "category theory &amp; why it matters for programmers",
        "who build large systems and want composable abstractions.",
        "[Applause]",
        "the first idea is the category itself",
        "a collection of objects and arrows between them",
        "with composition that is associative.",
        "the second idea is the functor",
        "which maps one category into another &lt;preserving&gt; structure.",
        "questions?",
    ];

    let mut start = 0.0;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            // a long pause after the cue at index 4
            let pause = if i == 4 { 3.0 } else { 0.2 };
            let f = fragment(line, start, 2.0);
            start += 2.0 + pause;
            f
        })
        .collect()
}

/// Deterministic pseudo-random fragment generator (linear congruential)
pub fn generated_fragments(seed: u64, count: usize) -> Vec<CaptionFragment> {
    let words = ["alpha", "beta", "gamma.", "delta", "[Music]", "epsilon!", "zeta", "eta?", "&amp;", " "];
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut start = 0.0;
    (0..count)
        .map(|_| {
            let word_count = 1 + next() % 12;
            let text = (0..word_count)
                .map(|_| words[next() % words.len()])
                .collect::<Vec<_>>()
                .join(" ");
            let duration = (next() % 40) as f64 / 10.0;
            let f = fragment(&text, start, duration);
            // occasional overlap, occasional long pause
            start += match next() % 5 {
                0 => duration + 3.5,
                1 => (duration - 0.3).max(0.0),
                _ => duration + 0.1,
            };
            f
        })
        .collect()
}
