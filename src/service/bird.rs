//! Vendor operations as the bot uses them.

use std::sync::Arc;
use tracing::warn;

use crate::error::MemobirdError;
use crate::memobird::{BindResult, BirdApp, PrintResult};

/// Outcome of binding a device and printing a message on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// The vendor refused the bind; nothing was printed.
    Rejected(BindResult),
    /// The bind succeeded and the message was submitted.
    Printed(PrintResult),
}

/// Memobird operations over any [`BirdApp`].
#[derive(Clone)]
pub struct BirdService {
    app: Arc<dyn BirdApp>,
}

impl BirdService {
    pub fn new(app: Arc<dyn BirdApp>) -> Self {
        Self { app }
    }

    pub async fn print_text_to_device(&self, device_id: &str, text: &str) -> Result<PrintResult, MemobirdError> {
        self.app.print_text(text, device_id).await
    }

    /// Bind `device_id`, then print `message` on it.
    pub async fn bind_device_with_message(&self, device_id: &str, message: &str) -> Result<BindOutcome, MemobirdError> {
        let bound = self.app.bind_device(device_id).await?;
        if !bound.success {
            warn!(device_id, error = ?bound.error, "Vendor rejected bind");
            return Ok(BindOutcome::Rejected(bound));
        }
        let printed = self.print_text_to_device(device_id, message).await?;
        Ok(BindOutcome::Printed(printed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{Call, FakeBird};

    #[tokio::test]
    async fn test_bind_then_print() {
        let fake = Arc::new(FakeBird::accepting());
        let service = BirdService::new(fake.clone());

        let outcome = service.bind_device_with_message("dev", "hello").await.unwrap();
        assert!(matches!(outcome, BindOutcome::Printed(ref r) if r.success && r.printed));
        assert_eq!(
            fake.calls(),
            vec![Call::Bind("dev".into()), Call::Print("dev".into(), "hello".into())]
        );
    }

    #[tokio::test]
    async fn test_rejected_bind_prints_nothing() {
        let fake = Arc::new(FakeBird::accepting());
        *fake.bind.lock().unwrap() = Some(BindResult {
            success: false,
            error: Some("not activated".into()),
            user_id: 0,
        });
        let service = BirdService::new(fake.clone());

        let outcome = service.bind_device_with_message("dev", "hello").await.unwrap();
        assert!(matches!(outcome, BindOutcome::Rejected(ref r) if r.error.as_deref() == Some("not activated")));
        assert_eq!(fake.calls(), vec![Call::Bind("dev".into())]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let service = BirdService::new(Arc::new(FakeBird::unreachable()));
        assert!(service.bind_device_with_message("dev", "hello").await.is_err());
        assert!(service.print_text_to_device("dev", "hello").await.is_err());
    }
}
