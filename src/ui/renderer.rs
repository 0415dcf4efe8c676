//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! The view model also carries the [`ScreenLayout`](crate::ui::ScreenLayout)
//! the event handler uses for mouse hit-testing, so both sides agree on where
//! every card and control sits.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
///
/// Prints ANSI-styled output with absolute cursor positioning. Every row of
/// the layout is overwritten, so stale content never survives a redraw.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, cols);
}
