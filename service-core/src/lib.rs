//! service-core: Shared infrastructure for the relay and report services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

