//! Display snapshot of the accumulated reply: tags stripped, whitespace trimmed, tail kept.

use regex::Regex;
use std::sync::LazyLock;

/// Telegram's maximum message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Non-greedy angle-bracket tag. `.` does not cross newlines, so a tag split over lines survives.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is a valid regex"));

/// Removes every `<...>` match (leftmost, shortest) and trims surrounding whitespace.
///
/// Nested brackets are only partly removed: `<a<b>c>` becomes `c>`.
pub fn sanitize(buffer: &str) -> String {
    TAG_PATTERN.replace_all(buffer, "").trim().to_string()
}

/// Keeps the last `max_chars` characters of `text`, dropping from the front.
pub fn keep_tail(text: String, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    match text.char_indices().nth(count - max_chars) {
        Some((start, _)) => text[start..].to_string(),
        None => text,
    }
}

/// Text shown for `buffer`: sanitized first, then cut to [`MAX_MESSAGE_LENGTH`] from the end.
pub fn display_snapshot(buffer: &str) -> String {
    keep_tail(sanitize(buffer), MAX_MESSAGE_LENGTH)
}
