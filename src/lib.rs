//! jobapply - Terminal Job Application Form
//!
//! A five-question application form with a confirmation screen and a
//! pluggable submission transport, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
