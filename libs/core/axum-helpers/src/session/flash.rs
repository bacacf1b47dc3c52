use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tower_sessions::Session;

use crate::errors::AppError;

const SESSION_FLASH: &str = "flash:messages";

/// Alert style for a flash message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Error,
}

/// A one-shot status message shown on the next rendered page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

/// Flash message queue stored in the session.
///
/// Messages pushed during one request are consumed by the next request
/// context that calls [`Flash::take`].
pub struct Flash<'a> {
    session: &'a Session,
}

impl<'a> Flash<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn push(&self, kind: FlashKind, message: impl Into<String>) -> Result<(), AppError> {
        let mut messages: Vec<FlashMessage> =
            self.session.get(SESSION_FLASH).await?.unwrap_or_default();
        messages.push(FlashMessage {
            kind,
            message: message.into(),
        });
        self.session.insert(SESSION_FLASH, messages).await?;
        Ok(())
    }

    pub async fn success(&self, message: impl Into<String>) -> Result<(), AppError> {
        self.push(FlashKind::Success, message).await
    }

    pub async fn info(&self, message: impl Into<String>) -> Result<(), AppError> {
        self.push(FlashKind::Info, message).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Result<(), AppError> {
        self.push(FlashKind::Error, message).await
    }

    /// Remove and return every pending message, oldest first.
    pub async fn take(&self) -> Result<Vec<FlashMessage>, AppError> {
        let messages = self.session.remove(SESSION_FLASH).await?;
        Ok(messages.unwrap_or_default())
    }
}
