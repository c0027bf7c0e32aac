//! Moneyhack backend REST client
//!
//! Typed request/response marshalling for the backend API that runs the
//! agent, prices positions, and gates withdrawals. The client only moves
//! JSON; every risk decision it reports was made server-side.

pub mod client;
pub mod endpoints;
pub mod resources;

pub use client::MoneyHackClient;
pub use resources::*;
