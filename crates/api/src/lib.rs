//! HTTP API: server wiring, bearer authentication and route policies.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod policy;
