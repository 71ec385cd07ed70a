//! # memobird-bot - Memobird Printers for Chat Users
//!
//! A chat bot that lets users claim a Memobird receipt printer and then
//! print whatever they send it. It provides:
//!
//! - **Protocol client**: signed form requests to the Memobird open API,
//!   GBK payload encoding, typed replies
//! - **Device binding**: claim a device, print a one-time code on it,
//!   verify the code the user reads back
//! - **Print dispatch**: route a verified owner's messages to their device
//! - **HTTP server**: liveness probe and an inbound-message endpoint for a
//!   chat bridge
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use memobird_bot::{
//!     bot::{Bot, InboundMessage},
//!     memobird::{App, AppConfig},
//!     store,
//! };
//!
//! # async fn example() -> Result<(), memobird_bot::BotError> {
//! let pool = store::connect("sqlite:memobird-bot.db").await?;
//! let app = App::new(AppConfig::new("my-access-key"))?;
//! let bot = Bot::from_pool(pool, Arc::new(app), "memobird_bot");
//!
//! let reply = bot
//!     .handle_text(&InboundMessage {
//!         chat_id: 42,
//!         username: "ada".into(),
//!         first_name: "Ada".into(),
//!         last_name: String::new(),
//!         text: "/bind 0123456789abcdef".into(),
//!     })
//!     .await;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`memobird`] | Memobird API client |
//! | [`model`] | Devices, users, contents |
//! | [`store`] | SQLite directories |
//! | [`service`] | Binding and print dispatch |
//! | [`bot`] | Command parsing and replies |
//! | [`server`] | HTTP server |
//! | [`config`] | Command-line/environment configuration |
//! | [`error`] | Error types |

pub mod bot;
pub mod config;
pub mod error;
pub mod memobird;
pub mod model;
pub mod server;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use bot::Bot;
pub use error::BotError;
pub use memobird::{App, AppConfig};
