//! Domain layer: the application draft, the position catalog and the
//! validation rules for each question.

pub mod models;
pub mod services;
pub mod errors;

pub use models::*;
pub use services::*;
pub use errors::*;
