//! Moneyhack-api: HTTP gateway for the moneyhack UI
//!
//! Provides a RESTful API for the frontend: session handling, market
//! data, position previews (amount parsing + estimated LTV), and
//! pass-through of the backend's authoritative operations.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{ApiError, AppState, SessionState};
