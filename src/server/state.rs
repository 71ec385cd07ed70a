//! Server state and configuration.

use crate::bot::Bot;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
pub struct AppState {
    pub bot: Bot,
}

impl AppState {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}
