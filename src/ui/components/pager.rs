//! Pagination row renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::pagination::PageControl;
use crate::ui::theme::Theme;

/// Renders `controls` at their absolute column `spans` on `row`.
///
/// Controls that would cross the right edge are dropped rather than clipped.
pub fn render_pagination(row: usize, controls: &[PageControl], spans: &[(usize, usize)], theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));

    for (control, &(start, end)) in controls.iter().zip(spans) {
        if end > cols {
            break;
        }

        position_cursor(row, start + 1);
        if control.is_active() {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.page_active_fg));
            print!("{}", Theme::bg(&theme.colors.page_active_bg));
        } else if control.disabled {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!(" {} ", control.label);
        print!("{}", Theme::reset());
    }
}
