//! Memobird devices and their verification codes.

use rand::Rng;

/// Verification code value marking a device as verified.
///
/// Lies outside every range [`random_fixed_length`] generates from.
pub const DEVICE_VERIFIED: i64 = -1;

/// Length parameter of freshly generated codes.
pub const VERIFICATION_CODE_DIGITS: u32 = 6;

/// Largest `len` for which `10^(len+1)` still fits in an `i64`.
const MAX_CODE_DIGITS: u32 = 17;

/// A Memobird device as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Device {
    pub id: i64,
    /// Vendor-assigned device identifier.
    pub memobird_id: String,
    /// Owning user, `0` until claimed.
    pub user_id: i64,
    pub verification_code: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Where a device is in the binding lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unclaimed,
    PendingVerification,
    Verified,
}

impl Device {
    /// True once the owner proved access to the device.
    pub fn is_verified(&self) -> bool {
        self.verification_code == DEVICE_VERIFIED && self.user_id > 0
    }

    pub fn state(&self) -> BindingState {
        if self.is_verified() {
            BindingState::Verified
        } else if self.user_id > 0 {
            BindingState::PendingVerification
        } else {
            BindingState::Unclaimed
        }
    }
}

/// Draw a value uniformly from `[10^len, 10^(len+1))`.
///
/// Returns `None` for `len == 0` and for lengths whose range overflows `i64`.
pub fn random_fixed_length<R: Rng>(rng: &mut R, len: u32) -> Option<i64> {
    if len == 0 || len > MAX_CODE_DIGITS {
        return None;
    }
    let lo = 10i64.pow(len);
    let hi = lo * 10;
    Some(rng.random_range(lo..hi))
}

/// Generate a verification code of the standard length.
pub fn generate_verification_code<R: Rng>(rng: &mut R) -> i64 {
    // VERIFICATION_CODE_DIGITS is within 1..=MAX_CODE_DIGITS.
    random_fixed_length(rng, VERIFICATION_CODE_DIGITS).unwrap_or(1_000_000)
}
