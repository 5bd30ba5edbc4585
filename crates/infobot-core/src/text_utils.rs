/// Returns at most `max_chars` characters of `value`, never splitting a char.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Truncates `value` to `max_chars` characters and appends `marker` when
/// anything was cut. Values that already fit are returned unchanged.
pub fn truncate_with_marker(value: &str, max_chars: usize, marker: &str) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = truncate_chars(value, max_chars);
    truncated.push_str(marker);
    truncated
}
