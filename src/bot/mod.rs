//! # Message Dispatch
//!
//! Turns an inbound chat message into a reply. The chat platform itself is
//! out of scope: a bridge delivers [`InboundMessage`]s (see
//! [`crate::server`]) and relays the returned text.
//!
//! Routing:
//!
//! | Command | Handler |
//! |---------|---------|
//! | `/start` | greeting |
//! | `/bind ID` | [`BindingService::claim`] |
//! | `/verify CODE` | [`BindingService::submit_code`] |
//! | `/send TEXT`, anything else | [`PrintDispatch::send`] |

pub mod command;
pub mod replies;

pub use command::Command;

use serde::Deserialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::warn;

use crate::error::StoreResult;
use crate::memobird::BirdApp;
use crate::model::{NewUser, User};
use crate::service::{
    BindingService, BirdService, ClaimOutcome, PrintDispatch, SendOutcome, VerifyOutcome,
};
use crate::store::{ContentLog, DeviceDirectory, UserDirectory};

/// A text message from a chat user.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub chat_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub text: String,
}

pub struct Bot {
    users: UserDirectory,
    binding: BindingService,
    dispatch: PrintDispatch,
}

impl Bot {
    pub fn new(users: UserDirectory, binding: BindingService, dispatch: PrintDispatch) -> Self {
        Self {
            users,
            binding,
            dispatch,
        }
    }

    /// Wire a bot over one database and one Memobird backend.
    pub fn from_pool(pool: SqlitePool, app: Arc<dyn BirdApp>, bot_username: &str) -> Self {
        let devices = Arc::new(DeviceDirectory::new(pool.clone()));
        let bird = BirdService::new(app);
        Self::new(
            UserDirectory::new(pool.clone()),
            BindingService::new(devices.clone(), bird.clone(), bot_username),
            PrintDispatch::new(devices, bird, ContentLog::new(pool)),
        )
    }

    /// Handle one message and return the reply for the sender.
    pub async fn handle_text(&self, msg: &InboundMessage) -> String {
        let user = match self.ensure_user(msg).await {
            Ok(user) => user,
            Err(e) => {
                warn!(chat_id = msg.chat_id, error = %e, "Error getting user");
                return replies::FAILED_GETTING_DATA.to_string();
            }
        };

        let (command, payload) = command::parse(&msg.text);
        let reply = match command {
            Command::Start => Ok(replies::nice_to_meet_you(&user.full_name)),
            Command::Bind => self.handle_bind(&user, payload).await,
            Command::Verify => self.handle_verify(&user, payload).await,
            Command::Send | Command::Default => self.handle_send(&user, payload).await,
        };

        reply.unwrap_or_else(|e| {
            warn!(user_id = user.id, ?command, error = %e, "Error handling message");
            replies::FAILED_GETTING_DATA.to_string()
        })
    }

    /// Look up the sender, creating them on first contact.
    async fn ensure_user(&self, msg: &InboundMessage) -> StoreResult<User> {
        if !self.users.is_exists_by_chat_id(msg.chat_id).await? {
            let new_user = NewUser::new(msg.chat_id, &msg.username, &msg.first_name, &msg.last_name);
            return self.users.create(&new_user).await;
        }
        // TODO: refresh username/full name when the chat profile changes
        self.users.get_by_chat_id(msg.chat_id).await
    }

    async fn handle_bind(&self, user: &User, payload: &str) -> StoreResult<String> {
        let reply = match self.binding.claim(user.id, payload).await? {
            ClaimOutcome::Usage => replies::BIND_HELP,
            ClaimOutcome::NotFree => replies::CHECK_MEMOBIRD_ID,
            ClaimOutcome::VerificationSent => replies::VERIFICATION_SENT,
            ClaimOutcome::SendFailed => replies::FAILED_SENDING_VERIFICATION,
        };
        Ok(reply.to_string())
    }

    async fn handle_verify(&self, user: &User, payload: &str) -> StoreResult<String> {
        let reply = match self.binding.submit_code(user.id, payload).await? {
            VerifyOutcome::Verified => replies::BIND_COMPLETE,
            VerifyOutcome::Failed => replies::VERIFICATION_FAILED,
        };
        Ok(reply.to_string())
    }

    async fn handle_send(&self, user: &User, payload: &str) -> StoreResult<String> {
        let reply = match self.dispatch.send(user.id, payload).await? {
            SendOutcome::NotBound => replies::BIND_HELP.to_string(),
            SendOutcome::Unencodable(c) => replies::unencodable(c),
            SendOutcome::Failed(e) => replies::failed_sending_message(&e),
            SendOutcome::Undelivered { .. } => replies::SENT_FAILURE.to_string(),
            SendOutcome::Sent { accepted, printed } => replies::sent(accepted, printed),
        };
        Ok(reply)
    }
}
