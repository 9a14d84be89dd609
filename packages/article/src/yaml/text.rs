//! Text wrapping for terminal output.

use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;

/// Wrap text at the given width, keeping paragraph breaks.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.split("\n\n")
        .map(|paragraph| fill(paragraph, &options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Check if text is long enough to need wrapping.
pub fn should_wrap_text(text: &str) -> bool {
    text.chars().count() > TEXT_WRAP_WIDTH
}

/// Wrap text with default width.
pub fn wrap_text_default(text: &str) -> String {
    if should_wrap_text(text) {
        wrap_text(text, TEXT_WRAP_WIDTH)
    } else {
        text.to_string()
    }
}
