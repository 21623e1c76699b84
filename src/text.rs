//! Character-count text measurement and fitting.
//!
//! Widths are approximated as `chars * font_size * k` with a per-typeface `k`;
//! there is no glyph table. Wrap points are therefore approximate.

use crate::fonts::Font;

const ELLIPSIS: &str = "...";

pub fn estimate_width(text: &str, font_size: f32, font: Font) -> f32 {
    text.chars().count() as f32 * font_size * font.width_factor()
}

pub fn fits(text: &str, max_width: f32, font_size: f32, font: Font) -> bool {
    estimate_width(text, font_size, font) <= max_width
}

/// Greedy word wrap. Explicit newlines force a break; blank input lines are
/// kept as empty lines. A single word wider than `max_width` is emitted on its
/// own line rather than being split.
pub fn wrap(text: &str, max_width: f32, font_size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.lines() {
        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate_len = current.chars().count() + 1 + word.chars().count();
            let candidate_w = candidate_len as f32 * font_size * font.width_factor();
            if candidate_w <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Return `text` if it fits, otherwise the longest prefix that fits, shortened
/// by three characters and followed by an ellipsis.
pub fn truncate(text: &str, max_width: f32, font_size: f32, font: Font) -> String {
    if fits(text, max_width, font_size, font) {
        return text.to_string();
    }
    let per_char = font_size * font.width_factor();
    let max_chars = if per_char > 0.0 {
        (max_width / per_char).floor() as usize
    } else {
        0
    };
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}
