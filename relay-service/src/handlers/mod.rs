//! HTTP handlers for the relay service.

pub mod ask;
pub mod health;

pub use ask::ask;
pub use health::{health_check, metrics};
