//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor placement, width
//! fitting and search-match highlighting. All width arithmetic works on
//! characters, not bytes, so accented titles and overviews line up.
//!
//! # Example
//!
//! ```rust
//! use cinescope::ui::helpers::fit;
//!
//! assert_eq!(fit("Il buono, il brutto, il cattivo", 12), "Il buono, i…");
//! assert_eq!(fit("Alien", 12), "Alien");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed `(row, col)`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates `text` to at most `width` characters, ending in `…` when cut.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Number of characters `text` occupies.
#[must_use]
pub fn width_of(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers `len` characters in `cols` columns.
#[must_use]
pub const fn centered_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end-exclusive. Ranges past the
/// end of `text` are clipped, so a title truncated by [`fit`] can reuse the
/// ranges computed for the full title. When `is_selected` is set, the selection
/// colors win and no highlighting is drawn.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        if end > start {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            let highlighted_section: String = chars[start..end].iter().collect();
            print!("{highlighted_section}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("Amélie", 6), "Amélie");
        assert_eq!(fit("Amélie", 4), "Amé…");
        assert_eq!(fit("Amélie", 1), "…");
        assert_eq!(fit("Amélie", 0), "");
        assert_eq!(width_of("Amélie"), 6);
    }

    #[test]
    fn centering_never_underflows() {
        assert_eq!(centered_padding(10, 30), 10);
        assert_eq!(centered_padding(11, 30), 9);
        assert_eq!(centered_padding(40, 30), 0);
    }
}
