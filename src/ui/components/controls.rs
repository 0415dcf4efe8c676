//! Controls bar renderer: genre selector, filter selector and search box.
//!
//! Segments are drawn at the spans computed in the view model so that what
//! is on screen matches what mouse clicks hit-test against.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ControlSegment, ControlsBar};

pub fn render_controls(row: usize, controls: &ControlsBar, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));

    for segment in [&controls.genre, &controls.filter, &controls.search] {
        render_segment(row, segment, theme, cols);
    }

    print!("{}", Theme::reset());
    row + 1
}

fn render_segment(row: usize, segment: &ControlSegment, theme: &Theme, cols: usize) {
    let (start, _) = segment.span;
    if start >= cols {
        return;
    }
    let room = cols - start;

    let label = format!("{}: ", segment.label);
    let label: String = label.chars().take(room).collect();
    let value: String = segment.value.chars().take(room.saturating_sub(label.chars().count())).collect();

    position_cursor(row, start + 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");

    if segment.focused {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{value}");
    print!("{}", Theme::reset());
}
