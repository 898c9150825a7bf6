use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Source item utilities
///
/// Video identifier extraction from shared links, and the set of caption
/// languages offered when requesting a transcript.
/// Language code meaning "whatever the video was recorded in"
pub const AUTO_LANGUAGE: &str = "auto";

static VIDEO_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#/]+)").unwrap(),
        Regex::new(r"youtube\.com/shorts/([^&\n?#/]+)").unwrap(),
    ]
});

static BARE_VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap()
});

/// Extract the video identifier from a watch, short, embed or share link.
///
/// A bare 11-character identifier is returned unchanged.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();

    for pattern in VIDEO_URL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }

    if BARE_VIDEO_ID.is_match(url) {
        return Some(url.to_string());
    }

    None
}

/// A caption language offered to the user
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLanguage {
    pub code: &'static str,
    /// Name in the language itself
    pub label: &'static str,
    pub label_en: &'static str,
}

const LANGUAGES: [TranscriptLanguage; 10] = [
    TranscriptLanguage { code: "auto", label: "Auto (Original)", label_en: "Auto (Original)" },
    TranscriptLanguage { code: "es", label: "Español", label_en: "Spanish" },
    TranscriptLanguage { code: "en", label: "English", label_en: "English" },
    TranscriptLanguage { code: "pt", label: "Português", label_en: "Portuguese" },
    TranscriptLanguage { code: "fr", label: "Français", label_en: "French" },
    TranscriptLanguage { code: "de", label: "Deutsch", label_en: "German" },
    TranscriptLanguage { code: "it", label: "Italiano", label_en: "Italian" },
    TranscriptLanguage { code: "ja", label: "日本語", label_en: "Japanese" },
    TranscriptLanguage { code: "ko", label: "한국어", label_en: "Korean" },
    TranscriptLanguage { code: "zh", label: "中文", label_en: "Chinese" },
];

/// Languages offered for transcript requests
pub fn available_languages() -> &'static [TranscriptLanguage] {
    &LANGUAGES
}

/// Normalize a requested caption language to `auto` or an ISO 639-1 code
pub fn validate_language(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized.is_empty() || normalized == AUTO_LANGUAGE {
        return Ok(AUTO_LANGUAGE.to_string());
    }

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(normalized);
    }

    if normalized.len() == 3 {
        if let Some(part1) = Language::from_639_3(&normalized).and_then(|l| l.to_639_1()) {
            return Ok(part1.to_string());
        }
    }

    Err(anyhow!("Invalid caption language code: {}", code))
}

/// English name of a caption language code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = validate_language(code)?;
    if normalized == AUTO_LANGUAGE {
        return Ok("Original".to_string());
    }

    Language::from_639_1(&normalized)
        .map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
