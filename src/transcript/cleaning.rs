/*!
 * Caption text normalization.
 *
 * Raw caption fragments arrive entity-encoded, sprinkled with sound cues
 * such as `[Music]`, and with irregular whitespace. Cleaning is total: any
 * input, including the empty string, yields a (possibly empty) string.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Entities decoded before any other rule runs, in this order
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Bracketed sound cues, matched non-greedily within a single line
static BRACKETED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\n\r\x{2028}\x{2029}]*?\]").unwrap()
});

/// Whitespace runs, counting the byte order mark as whitespace
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s\x{FEFF}]+").unwrap()
});

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Normalize one fragment's raw text.
///
/// Decodes the standard entities and `&nbsp;`, strips bracketed cues,
/// collapses whitespace runs to one space and trims.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    let without_cues = BRACKETED_REGEX.replace_all(&decoded, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&without_cues, " ");

    collapsed.trim_matches(is_blank).to_string()
}

/// Whether the text, ignoring trailing whitespace, ends a sentence
pub fn ends_with_sentence(text: &str) -> bool {
    matches!(text.trim_end_matches(is_blank).chars().last(), Some('.' | '!' | '?'))
}
