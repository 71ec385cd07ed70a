//! HTTP handlers for the server.

pub mod health;
pub mod messages;
