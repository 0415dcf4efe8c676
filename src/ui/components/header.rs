//! Header component renderer.
//!
//! Draws the title bar: the plugin name on the left, the filter-status
//! indicator right-aligned, both on the theme's header colors.

use crate::ui::helpers::{fit, position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next row.
///
/// ```text
///  Cinescope                               Filtro: Popolari — Genere: Azione
/// ```
///
/// The indicator is truncated first when the terminal is too narrow.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = fit(&header.title, cols);
    let title_len = width_of(&title);
    let room = cols.saturating_sub(title_len + 1);
    let indicator = fit(&header.indicator, room);
    let indicator_len = width_of(&indicator);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}{title}", Theme::bold());
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(cols.saturating_sub(title_len + indicator_len + 1)));
    print!("{indicator}");
    if indicator_len > 0 {
        print!(" ");
    }

    print!("{}", Theme::reset());
    row + 1
}
