//! # Print Dispatch
//!
//! Delivers text from a verified owner to their device.

use std::sync::Arc;
use tracing::{info, warn};

use super::bird::BirdService;
use crate::error::{MemobirdError, StoreResult};
use crate::store::{ContentLog, DeviceDirectory};

/// What happened to a message sent for printing.
#[derive(Debug)]
pub enum SendOutcome {
    /// The user has no verified device.
    NotBound,
    /// The text holds a character the printer cannot render; nothing was sent.
    Unencodable(char),
    /// The vendor could not be reached or answered garbage.
    Failed(MemobirdError),
    /// The vendor answered but did not accept the content.
    Undelivered { error: Option<String> },
    /// The vendor accepted the content.
    ///
    /// Only reached on an accepted reply, so `accepted` is always `true`;
    /// rejections are [`SendOutcome::Undelivered`]. `printed` says whether the
    /// paper already came out.
    Sent { accepted: bool, printed: bool },
}

pub struct PrintDispatch {
    devices: Arc<DeviceDirectory>,
    bird: BirdService,
    contents: ContentLog,
}

impl PrintDispatch {
    pub fn new(devices: Arc<DeviceDirectory>, bird: BirdService, contents: ContentLog) -> Self {
        Self {
            devices,
            bird,
            contents,
        }
    }

    /// Print `text` on the device bound to `user_id`.
    pub async fn send(&self, user_id: i64, text: &str) -> StoreResult<SendOutcome> {
        let device = match self.devices.get_by_owner(user_id).await {
            Ok(device) if device.is_verified() => device,
            Ok(_) => return Ok(SendOutcome::NotBound),
            Err(e) if e.is_not_found() => return Ok(SendOutcome::NotBound),
            Err(e) => return Err(e),
        };

        let result = match self.bird.print_text_to_device(&device.memobird_id, text).await {
            Ok(result) => result,
            Err(MemobirdError::Encoding { character }) => return Ok(SendOutcome::Unencodable(character)),
            Err(e) => return Ok(SendOutcome::Failed(e)),
        };

        if !result.success {
            return Ok(SendOutcome::Undelivered { error: result.error });
        }

        info!(
            user_id,
            memobird_id = %device.memobird_id,
            content_id = result.content_id,
            printed = result.printed,
            "Content sent"
        );
        if let Err(e) = self
            .contents
            .record(result.content_id, &device.memobird_id, result.printed)
            .await
        {
            warn!(error = %e, "Failed to record content");
        }

        Ok(SendOutcome::Sent {
            accepted: result.success,
            printed: result.printed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memobird::PrintResult;
    use crate::service::testing::{Call, FakeBird};
    use crate::store::connect_in_memory;

    struct Fixture {
        dispatch: PrintDispatch,
        devices: Arc<DeviceDirectory>,
        contents: ContentLog,
        fake: Arc<FakeBird>,
    }

    async fn fixture(fake: FakeBird) -> Fixture {
        let pool = connect_in_memory().await.unwrap();
        let devices = Arc::new(DeviceDirectory::new(pool.clone()));
        let contents = ContentLog::new(pool);
        let fake = Arc::new(fake);
        let dispatch = PrintDispatch::new(devices.clone(), BirdService::new(fake.clone()), contents.clone());
        Fixture {
            dispatch,
            devices,
            contents,
            fake,
        }
    }

    async fn bind(devices: &DeviceDirectory, memobird_id: &str, user_id: i64) {
        let device = devices.create(memobird_id, user_id).await.unwrap();
        assert!(devices.verify(&device.verification_code.to_string(), user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unbound_user() {
        let f = fixture(FakeBird::accepting()).await;
        assert!(matches!(f.dispatch.send(1, "hi").await.unwrap(), SendOutcome::NotBound));
        assert!(f.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pending_device_is_not_used() {
        let f = fixture(FakeBird::accepting()).await;
        f.devices.create("ABC123", 1).await.unwrap();
        assert!(matches!(f.dispatch.send(1, "hi").await.unwrap(), SendOutcome::NotBound));
        assert!(f.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_bound_device() {
        let f = fixture(FakeBird::accepting()).await;
        bind(&f.devices, "ABC123", 1).await;

        let outcome = f.dispatch.send(1, "hello").await.unwrap();
        assert!(matches!(
            outcome,
            SendOutcome::Sent {
                accepted: true,
                printed: true
            }
        ));
        assert_eq!(f.fake.calls(), vec![Call::Print("ABC123".into(), "hello".into())]);

        let logged = f.contents.list_by_device("ABC123").await.unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].content_id, 100);
    }

    #[tokio::test]
    async fn test_logical_failure() {
        let fake = FakeBird::accepting();
        *fake.print.lock().unwrap() = Some(PrintResult {
            error: Some("offline".into()),
            ..Default::default()
        });
        let f = fixture(fake).await;
        bind(&f.devices, "ABC123", 1).await;

        match f.dispatch.send(1, "hello").await.unwrap() {
            SendOutcome::Undelivered { error } => assert_eq!(error.as_deref(), Some("offline")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(f.contents.list_by_device("ABC123").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let f = fixture(FakeBird::unreachable()).await;
        bind(&f.devices, "ABC123", 1).await;
        assert!(matches!(f.dispatch.send(1, "hello").await.unwrap(), SendOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_unencodable_text_never_reaches_vendor() {
        let f = fixture(FakeBird::accepting()).await;
        bind(&f.devices, "ABC123", 1).await;
        assert!(matches!(
            f.dispatch.send(1, "party 🎉").await.unwrap(),
            SendOutcome::Unencodable('🎉')
        ));
        assert!(f.fake.calls().is_empty());
    }
}
