//! Reporter API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! storage) so integration tests and the binaries can share them.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
