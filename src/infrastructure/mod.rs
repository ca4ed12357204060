//! Infrastructure layer: submission transports, configuration and logging.
//!
//! Everything here talks to the outside world (network, environment,
//! filesystem) on behalf of the form.

pub mod config;
pub mod telemetry;
pub mod transport;

pub use config::*;
pub use transport::*;
