//! Width-aware text helpers for terminal layout.

use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Display width of `text` in terminal columns.
pub fn text_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// Appends `...` when truncation occurred.
///
/// ```
/// use card_lookup::ui::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated).chars().take(max_width).collect()
}

/// Pad `text` with spaces on the right up to `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = text_width(text);
    if used >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - used))
}
