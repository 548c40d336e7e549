//! Wire types for the relay endpoint.

pub mod ask;

pub use ask::{AskRequest, AskResponse, ErrorBody};
