//! # Device Binding
//!
//! Drives a device from unclaimed to verified:
//!
//! ```text
//! Unclaimed --claim--> PendingVerification --submit_code--> Verified
//! ```
//!
//! A claim generates a code and prints it, with instructions, on the device
//! itself. Only someone standing next to the printer can read it back. A
//! wrong code leaves the device pending; the same code can be retried.
//! A failed vendor call after the row was written leaves it pending too,
//! and a repeated claim reuses that row.

use std::sync::Arc;
use tracing::{info, warn};

use super::bird::{BindOutcome, BirdService};
use crate::error::{StoreError, StoreResult};
use crate::store::DeviceDirectory;

/// Result of a claim, as the user should hear about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No device id was given.
    Usage,
    /// The device is bound to someone already.
    NotFree,
    /// The code was printed on the device.
    VerificationSent,
    /// The device row exists but the code could not be delivered.
    SendFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    /// Wrong code, or nothing pending for this user.
    Failed,
}

/// Instructions printed on the device during a claim.
pub fn verification_instructions(code: i64, bot_username: &str) -> String {
    format!(
        "To complete the verification\nplease send:\n    /verify {}\nto:\n    @{}\n",
        code, bot_username
    )
}

pub struct BindingService {
    devices: Arc<DeviceDirectory>,
    bird: BirdService,
    bot_username: String,
}

impl BindingService {
    pub fn new(devices: Arc<DeviceDirectory>, bird: BirdService, bot_username: impl Into<String>) -> Self {
        Self {
            devices,
            bird,
            bot_username: bot_username.into(),
        }
    }

    /// Claim `memobird_id` for `user_id` and print a verification code on it.
    ///
    /// Vendor failures are reported as [`ClaimOutcome::SendFailed`]; only
    /// storage failures are errors.
    pub async fn claim(&self, user_id: i64, memobird_id: &str) -> StoreResult<ClaimOutcome> {
        let memobird_id = memobird_id.trim();
        if memobird_id.is_empty() {
            return Ok(ClaimOutcome::Usage);
        }

        if !self.devices.is_free(memobird_id).await? {
            return Ok(ClaimOutcome::NotFree);
        }

        let device = match self.devices.create(memobird_id, user_id).await {
            Ok(device) => device,
            // Verified by someone else between the check and the insert.
            Err(StoreError::DeviceTaken(_)) => return Ok(ClaimOutcome::NotFree),
            Err(e) => return Err(e),
        };

        let message = verification_instructions(device.verification_code, &self.bot_username);
        match self.bird.bind_device_with_message(memobird_id, &message).await {
            Ok(BindOutcome::Printed(result)) if result.success => {
                info!(user_id, memobird_id, printed = result.printed, "Verification code sent");
                Ok(ClaimOutcome::VerificationSent)
            }
            Ok(BindOutcome::Printed(result)) => {
                warn!(user_id, memobird_id, error = ?result.error, "Vendor rejected verification print");
                Ok(ClaimOutcome::SendFailed)
            }
            Ok(BindOutcome::Rejected(result)) => {
                warn!(user_id, memobird_id, error = ?result.error, "Vendor rejected device binding");
                Ok(ClaimOutcome::SendFailed)
            }
            Err(e) => {
                warn!(user_id, memobird_id, error = %e, "Error binding");
                Ok(ClaimOutcome::SendFailed)
            }
        }
    }

    /// Check `code` against the device `user_id` has pending.
    pub async fn submit_code(&self, user_id: i64, code: &str) -> StoreResult<VerifyOutcome> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(VerifyOutcome::Failed);
        }
        if self.devices.verify(code, user_id).await? {
            Ok(VerifyOutcome::Verified)
        } else {
            Ok(VerifyOutcome::Failed)
        }
    }
}
