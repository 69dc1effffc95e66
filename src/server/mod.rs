//! HTTP server shell.
//!
//! Thin axum wrapper around the chat pipeline: one health route, one chat
//! route, and the fixed error bodies of the wire contract.

pub mod routes;

pub use routes::{app_router, AppState};
