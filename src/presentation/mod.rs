//! Presentation layer handling terminal UI and user input.
//!
//! Renders the current form stage with ratatui and turns key presses into
//! form controller operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
