//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled terminal output. The
//! pure parts (card mapping, pagination, view models, themes) are plain values
//! and fully testable; only the components print.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`cards`]: Result list to card mapping
//! - [`pagination`]: Page-jump controls with targets and hit-testing
//! - [`viewmodel`]: View model types and the screen layout
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers
//! - [`helpers`]: Shared rendering utilities (fitting, highlighting)
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod cards;
pub mod components;
pub mod helpers;
pub mod pagination;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use cards::{render_card, render_cards, CardView, GridView, PosterView, TrailerView};
pub use pagination::{ControlKind, PageControl};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardSlot, ControlSegment, ControlTarget, ControlsBar, FooterInfo, HeaderInfo, ScreenLayout, UIViewModel,
};
