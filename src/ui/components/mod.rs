//! Composable UI component renderers.
//!
//! Each component draws one band of the screen at the rows the view model's
//! [`ScreenLayout`](crate::ui::viewmodel::ScreenLayout) assigns to it.
//!
//! # Components
//!
//! - [`header`]: Title and filter-status indicator
//! - [`controls`]: Genre selector, filter selector and search box
//! - [`grid`]: Movie cards
//! - [`empty`]: Placeholder message in place of the cards
//! - [`pager`]: Pagination row
//! - [`footer`]: Keybinding hints

mod controls;
mod empty;
mod footer;
mod grid;
mod header;
mod pager;

use crate::ui::cards::GridView;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use controls::render_controls;
use empty::render_placeholder;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use pager::render_pagination;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Controls]
/// [Border]
/// [Cards or placeholder]
/// [Border]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize) {
    let layout = &vm.layout;

    let mut current_row = render_header(layout.header_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_controls(current_row, &vm.controls, theme, cols);
    render_border(current_row, &theme.colors.border, cols);

    match &vm.grid {
        GridView::Cards(cards) => render_grid(
            cards,
            &layout.card_slots,
            (layout.grid_first_row, layout.grid_last_row),
            theme,
            cols,
        ),
        GridView::Placeholder(message) => {
            for row in layout.grid_first_row..=layout.grid_last_row {
                position_cursor(row, 1);
                print!("{}", " ".repeat(cols));
            }
            render_placeholder(layout.grid_first_row + 1, message, theme, cols);
        }
    }

    render_border(layout.pagination_row.saturating_sub(1), &theme.colors.border, cols);
    match &vm.pagination {
        Some(controls) => render_pagination(layout.pagination_row, controls, &layout.pagination_spans, theme, cols),
        None => {
            position_cursor(layout.pagination_row, 1);
            print!("{}", " ".repeat(cols));
        }
    }
    render_border(layout.footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(layout.footer_row, &vm.footer, theme, cols);
}
