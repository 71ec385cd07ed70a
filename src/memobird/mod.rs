//! # Memobird Protocol Client
//!
//! Talks to the Memobird open API (<http://open.memobird.cn/upload/webapi.pdf>).
//!
//! Every call is a `POST` of an `application/x-www-form-urlencoded` body
//! signed with the access key and a timestamp in the vendor's civil time.
//! Replies are JSON and are decoded into [`PrintResult`] / [`BindResult`].
//!
//! ## Failure kinds
//!
//! - `Err(MemobirdError)`: nothing usable came back (or the text could not
//!   be encoded, in which case nothing was sent at all).
//! - `Ok(result)` with `success == false`: the vendor answered and said no.
//!
//! ## Modules
//!
//! - [`client`]: request signing and the [`App`] client
//! - [`encoding`]: UTF-8 to GBK conversion of print payloads
//! - [`result`]: reply decoding

pub mod client;
pub mod encoding;
pub mod result;

pub use client::{App, AppConfig};
pub use result::{BindResult, PrintResult};

use async_trait::async_trait;

use crate::error::MemobirdError;

/// The operations the bot needs from a Memobird backend.
///
/// [`App`] is the real implementation; tests substitute their own.
#[async_trait]
pub trait BirdApp: Send + Sync {
    /// Print `text` on the device `device_id`.
    async fn print_text(&self, text: &str, device_id: &str) -> Result<PrintResult, MemobirdError>;

    /// Bind `device_id` to this application's access key.
    async fn bind_device(&self, device_id: &str) -> Result<BindResult, MemobirdError>;
}
