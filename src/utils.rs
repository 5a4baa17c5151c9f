//! Common string helpers.

/// Truncates a string to a maximum character count with ellipsis.
///
/// Counts characters, not bytes, so multi-byte text is never split. When
/// truncation happens the "..." counts toward `max_chars`.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let keep_chars = max_chars.saturating_sub(3);
    let truncated: String = s.chars().take(keep_chars).collect();
    format!("{truncated}...")
}

/// Collapses every run of whitespace (including newlines) into a single space.
///
/// Used to echo multi-line XML fragments on one line.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive equality with full Unicode case folding.
///
/// `eq_ignore_ascii_case` would treat "É" and "é" as different.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
