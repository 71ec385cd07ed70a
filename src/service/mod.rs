//! # Services
//!
//! Business logic on top of the directories and the Memobird client.
//!
//! - [`bird`]: vendor operations composed for the bot
//! - [`binding`]: claim a device, print a code on it, verify the code
//! - [`dispatch`]: print a verified owner's text on their device

pub mod binding;
pub mod bird;
pub mod dispatch;

pub use binding::{BindingService, ClaimOutcome, VerifyOutcome};
pub use bird::{BindOutcome, BirdService};
pub use dispatch::{PrintDispatch, SendOutcome};
