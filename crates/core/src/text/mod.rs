//! Whitespace normalization, word wrapping, and text extraction.

mod cache;
mod metrics;

pub use cache::{extract_text, TextCache};
pub use metrics::{GlyphMetrics, TextMeasure};

use std::borrow::Cow;

/// Trim and collapse every run of Unicode whitespace into one ASCII space.
///
/// Text without any whitespace is returned borrowed and unchanged.
pub fn clean_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_whitespace) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Greedily pack whitespace-separated words into lines no wider than
/// `max_width` at `scale`. Words are never split; a word wider than the
/// limit gets a line of its own.
///
/// Text with no words yields no lines. A non-positive `max_width` means
/// unbounded: the text comes back as a single line, untouched.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    scale: f32,
    metrics: &dyn TextMeasure,
) -> Vec<String> {
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        return Vec::new();
    }
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut candidate = String::new();

    for word in words {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        candidate.clear();
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);

        let (width, _) = metrics.measure(&candidate, scale);
        if width > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            std::mem::swap(&mut current, &mut candidate);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
