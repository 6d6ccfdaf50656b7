//! User interface rendering and input handling.
//!
//! - **renderer**: crossterm renderer for the hero banner
//! - **keymapper**: keyboard input to banner action mapping

pub mod keymapper;
pub mod renderer;

pub use keymapper::{Action, KeyMapper};
pub use renderer::{HeroRenderer, HeroView, MIN_HERO_ROWS};
