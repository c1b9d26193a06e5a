//! Application layer - Use cases and orchestration
//!
//! Contains the tutor and speech use cases and the port definitions they
//! drive. Infrastructure adapters implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
