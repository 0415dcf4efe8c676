//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only. [`ScreenLayout`] is shared
//! with the event handler, which uses it to map mouse positions back onto
//! cards and controls.
//!
//! Rows are 1-based terminal rows. Column spans are 0-based and end-exclusive.

use crate::ui::cards::GridView;
use crate::ui::pagination::PageControl;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub controls: ControlsBar,
    /// Cards in the visible window, or a placeholder message.
    pub grid: GridView,
    /// Absent while loading and after a failed load.
    pub pagination: Option<Vec<PageControl>>,
    pub footer: FooterInfo,
    pub layout: ScreenLayout,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Filter-status indicator, e.g. `Filtro: Popolari — Genere: Azione`.
    pub indicator: String,
}

/// One labelled control of the controls bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSegment {
    pub label: String,
    pub value: String,
    pub span: (usize, usize),
    pub focused: bool,
}

impl ControlSegment {
    /// Text as drawn: `label: value`.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Genre selector, filter selector and search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsBar {
    pub genre: ControlSegment,
    pub filter: ControlSegment,
    pub search: ControlSegment,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Rows occupied by one visible card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// Index into the state's card list.
    pub card: usize,
    pub first_row: usize,
    pub last_row: usize,
}

/// Controls bar element under a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTarget {
    Genre,
    Filter,
    Search,
}

/// Screen geometry for the current viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header_row: usize,
    pub controls_row: usize,
    pub genre_span: (usize, usize),
    pub filter_span: (usize, usize),
    pub search_span: (usize, usize),
    pub grid_first_row: usize,
    pub grid_last_row: usize,
    pub card_slots: Vec<CardSlot>,
    pub pagination_row: usize,
    /// Absolute column spans, parallel to the rendered pagination controls.
    pub pagination_spans: Vec<(usize, usize)>,
    pub footer_row: usize,
}

impl ScreenLayout {
    /// Card drawn on `row`, if any.
    #[must_use]
    pub fn card_at(&self, row: usize) -> Option<usize> {
        self.card_slots
            .iter()
            .find(|slot| (slot.first_row..=slot.last_row).contains(&row))
            .map(|slot| slot.card)
    }

    /// Controls bar element drawn at `(row, col)`, if any.
    #[must_use]
    pub fn control_at(&self, row: usize, col: usize) -> Option<ControlTarget> {
        if row != self.controls_row {
            return None;
        }
        let within = |(start, end): (usize, usize)| (start..end).contains(&col);
        if within(self.genre_span) {
            Some(ControlTarget::Genre)
        } else if within(self.filter_span) {
            Some(ControlTarget::Filter)
        } else if within(self.search_span) {
            Some(ControlTarget::Search)
        } else {
            None
        }
    }
}
