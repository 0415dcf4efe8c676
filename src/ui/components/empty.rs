//! Grid placeholder renderer.
//!
//! Shown in place of the cards while loading, after a failed load and when
//! the listing has no results.

use crate::ui::helpers::{centered_padding, fit, position_cursor, width_of};
use crate::ui::theme::Theme;

/// Renders `message` centered on `row`.
pub fn render_placeholder(row: usize, message: &str, theme: &Theme, cols: usize) {
    let message = fit(message, cols);
    let msg_len = width_of(&message);
    let msg_padding = centered_padding(msg_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());
}
