//! Hablamos HTTP presentation layer
//!
//! This crate provides the HTTP API and landing page of the Spanish tutor.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
