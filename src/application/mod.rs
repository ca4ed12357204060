//! Application layer: the form controller.
//!
//! Sits between the domain rules and the terminal front end, sequencing
//! navigation, validation and submission.

pub mod state;

pub use state::*;
