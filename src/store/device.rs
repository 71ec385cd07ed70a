//! # Device Directory
//!
//! Source of truth for device identity, ownership and verification state.
//!
//! A device is *free* when it has no row, or its row is not verified yet.
//! Abandoned claims therefore never lock a device. Ownership changes are
//! single conditional statements, so racing requests cannot both win:
//!
//! - [`DeviceDirectory::create`] upserts on the unique `memobird_id` and
//!   only overwrites a row that is still unverified.
//! - [`DeviceDirectory::verify`] flips at most one matching row to
//!   [`DEVICE_VERIFIED`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use std::sync::Mutex;
use tracing::{debug, info};

use super::now;
use crate::error::{StoreError, StoreResult};
use crate::model::device::generate_verification_code;
use crate::model::{DEVICE_VERIFIED, Device};

const DEVICE_COLUMNS: &str = "id, memobird_id, user_id, verification_code, created_at, updated_at";

/// Device records backed by SQLite.
pub struct DeviceDirectory {
    pool: SqlitePool,
    rng: Mutex<StdRng>,
}

impl DeviceDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_rng(pool, StdRng::from_os_rng())
    }

    /// Use a specific random source for verification codes.
    pub fn with_rng(pool: SqlitePool, rng: StdRng) -> Self {
        Self {
            pool,
            rng: Mutex::new(rng),
        }
    }

    fn next_code(&self) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        generate_verification_code(&mut *rng)
    }

    /// True if `memobird_id` has no record or its record is not verified.
    pub async fn is_free(&self, memobird_id: &str) -> StoreResult<bool> {
        match self.find_by_memobird_id(memobird_id).await? {
            Some(device) => Ok(!device.is_verified()),
            None => Ok(true),
        }
    }

    pub async fn find_by_memobird_id(&self, memobird_id: &str) -> StoreResult<Option<Device>> {
        let sql = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE memobird_id = ?");
        let device = sqlx::query_as::<_, Device>(&sql)
            .bind(memobird_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(device)
    }

    /// Claim `memobird_id` for `owner_id` with a fresh verification code.
    ///
    /// An unverified row for the same device is reused: it moves to the new
    /// owner and gets the new code. If the device is verified by the time the
    /// statement runs, nothing changes and [`StoreError::DeviceTaken`] is
    /// returned.
    pub async fn create(&self, memobird_id: &str, owner_id: i64) -> StoreResult<Device> {
        let code = self.next_code();
        let sql = format!(
            "INSERT INTO devices (memobird_id, user_id, verification_code, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT (memobird_id) DO UPDATE SET
                user_id = excluded.user_id,
                verification_code = excluded.verification_code,
                updated_at = excluded.updated_at
             WHERE NOT (devices.verification_code = ?5 AND devices.user_id > 0)
             RETURNING {DEVICE_COLUMNS}"
        );
        let device = sqlx::query_as::<_, Device>(&sql)
            .bind(memobird_id)
            .bind(owner_id)
            .bind(code)
            .bind(now())
            .bind(DEVICE_VERIFIED)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::DeviceTaken(memobird_id.to_string()))?;

        info!(memobird_id, owner_id, device_id = device.id, "Device pending verification");
        Ok(device)
    }

    /// The device owned by `owner_id`, verified ones first.
    pub async fn get_by_owner(&self, owner_id: i64) -> StoreResult<Device> {
        let sql = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE user_id = ?1
             ORDER BY (verification_code = ?2) DESC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Device>(&sql)
            .bind(owner_id)
            .bind(DEVICE_VERIFIED)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("device"))
    }

    /// Mark the device of `owner_id` pending with `code` as verified.
    ///
    /// Returns true iff exactly one row changed. A malformed code, a wrong
    /// code or an already verified device all yield `Ok(false)`.
    pub async fn verify(&self, code: &str, owner_id: i64) -> StoreResult<bool> {
        let code = match code.trim().parse::<i64>() {
            Ok(code) if code != DEVICE_VERIFIED => code,
            _ => {
                debug!(owner_id, "Rejected malformed verification code");
                return Ok(false);
            }
        };

        let result = sqlx::query(
            "UPDATE devices SET verification_code = ?1, updated_at = ?2
             WHERE id = (
                SELECT id FROM devices WHERE user_id = ?3 AND verification_code = ?4
                ORDER BY id LIMIT 1
             )",
        )
        .bind(DEVICE_VERIFIED)
        .bind(now())
        .bind(owner_id)
        .bind(code)
        .execute(&self.pool)
        .await?;

        let verified = result.rows_affected() == 1;
        if verified {
            info!(owner_id, "Device verified");
        }
        Ok(verified)
    }
}
