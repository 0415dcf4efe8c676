//! Card grid renderer.
//!
//! Each card takes the rows of its [`CardSlot`]:
//!
//! ```text
//!   The Matrix  31/3/1999
//!   Un hacker scopre la verità sulla realtà...
//!   https://image.tmdb.org/t/p/w500/matrix.jpg
//! ```
//!
//! The third line is replaced by the embedded player once a trailer plays.
//! The hovered card is drawn on the selection colors, which take precedence
//! over search-match highlighting.

use crate::ui::cards::{CardView, PosterView, TrailerView};
use crate::ui::helpers::{self, fit, position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardSlot;

const CARD_INDENT: usize = 2;

/// Renders `cards` into `slots` and blanks the rest of the grid area.
pub fn render_grid(cards: &[CardView], slots: &[CardSlot], grid_rows: (usize, usize), theme: &Theme, cols: usize) {
    let (first_row, last_row) = grid_rows;
    let mut drawn_until = first_row;

    for (card, slot) in cards.iter().zip(slots) {
        render_card(card, slot, theme, cols);
        drawn_until = slot.last_row + 1;
    }

    for row in drawn_until..=last_row {
        blank_line(row, cols);
    }
}

fn blank_line(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
}

fn card_colors(card: &CardView, theme: &Theme) -> String {
    if card.is_hovered {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn render_card(card: &CardView, slot: &CardSlot, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(CARD_INDENT * 2);
    let colors = card_colors(card, theme);
    let mut row = slot.first_row;

    // Title and date.
    let title = fit(&card.title, width);
    let title_len = width_of(&title);
    let date = if card.date.is_empty() || title_len + 2 >= width {
        String::new()
    } else {
        fit(&format!("  {}", card.date), width - title_len)
    };
    start_line(row, &colors);
    print!("{}", Theme::bold());
    helpers::render_highlighted_text(&title, &card.highlight_ranges, theme, card.is_hovered);
    print!("{}{colors}", Theme::reset());
    if !card.is_hovered {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{date}");
    end_line(title_len + width_of(&date), cols);
    row += 1;

    if row > slot.last_row {
        return;
    }
    let overview = fit(&card.overview, width);
    start_line(row, &colors);
    print!("{overview}");
    end_line(width_of(&overview), cols);
    row += 1;

    if row > slot.last_row {
        return;
    }
    start_line(row, &colors);
    let media = match &card.trailer {
        TrailerView::Playing { title, embed_url, hint } => {
            if !card.is_hovered {
                print!("{}", Theme::fg(&theme.colors.trailer_fg));
            }
            fit(&format!("▶ {title} ({hint})  {embed_url}"), width)
        }
        TrailerView::Hidden => match &card.poster {
            PosterView::Url(url) => fit(url, width),
            PosterView::Placeholder(text) => {
                if !card.is_hovered {
                    print!("{}", Theme::fg(&theme.colors.text_dim));
                }
                fit(&format!("[{text}]"), width)
            }
        },
    };
    print!("{media}");
    end_line(width_of(&media), cols);

    for spacer in (slot.last_row + 1)..(slot.first_row + crate::app::state::CARD_HEIGHT) {
        blank_line(spacer, cols);
    }
}

fn start_line(row: usize, colors: &str) {
    position_cursor(row, 1);
    print!("{colors}");
    print!("{}", " ".repeat(CARD_INDENT));
}

fn end_line(written: usize, cols: usize) {
    print!("{}", " ".repeat(cols.saturating_sub(CARD_INDENT + written)));
    print!("{}", Theme::reset());
}
