//! Text helpers for configured values, server messages and table cells.

/// Longest server message kept in an [`crate::ApiError`].
pub const MESSAGE_LIMIT: usize = 180;

/// Trims a configured value; a blank value counts as unset.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// True when `value` names an `http` or `https` address with something after the scheme.
///
/// The scheme is matched without regard to letter case.
pub fn is_http_url(value: &str) -> bool {
    value.split_once("://").is_some_and(|(scheme, rest)| {
        !rest.is_empty()
            && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
    })
}

/// Collapses every whitespace run, newlines included, into one space.
pub fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `value` to at most `width` characters, marking a cut with `...`.
pub fn truncate_with_ellipsis(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut truncated = value
        .chars()
        .take(width.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Condenses a server message or raw response body for display.
pub fn message_excerpt(body: &str) -> String {
    truncate_with_ellipsis(&single_line(body), MESSAGE_LIMIT)
}
