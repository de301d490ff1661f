//! Text normalization helpers for statement intake.

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace && !cleaned.is_empty() {
            cleaned.push(' ');
        }
        in_whitespace = false;
        cleaned.push(ch);
    }

    cleaned
}

/// Length in Unicode code points (the unit the intake limits are defined in).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Truncates to `max_chars` code points, appending an ellipsis when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if char_count(text) <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return "...".to_string();
    }
    let truncated: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", truncated)
}
