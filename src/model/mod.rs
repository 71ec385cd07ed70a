//! # Domain Model
//!
//! Records owned by the [`crate::store`] directories.
//!
//! - [`device`]: Memobird devices, ownership and verification state
//! - [`user`]: chat users
//! - [`content`]: contents sent for printing

pub mod content;
pub mod device;
pub mod user;

pub use content::Content;
pub use device::{BindingState, DEVICE_VERIFIED, Device, VERIFICATION_CODE_DIGITS};
pub use user::{NewUser, User};
