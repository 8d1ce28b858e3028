//! pace-api
//!
//! HTTP surface for archive image URLs and the PACE chat assistant. The
//! library exposes the router and its state so integration tests can drive
//! the service without a socket.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
