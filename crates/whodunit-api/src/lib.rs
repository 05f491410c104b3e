//! HTTP API for the Whodunit party engine.

pub mod error;
pub mod routes;
pub mod state;
