use std::fmt::Display;

use crate::{platform::ModerationPlatform, types::IncomingMessage};

/// What happened when we tried to delete a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Telegram said no, but nothing broke. Already deleted, most likely.
    Refused,
    /// The request itself failed.
    Failed,
}

/// Delete the message and log how that went. Never retries, never errors out:
/// all that can happen on failure is the spam staying up.
///
/// `why` is only used for the log line.
pub async fn delete_message_logged<P: ModerationPlatform>(
    platform: &P,
    message: &IncomingMessage,
    why: impl Display,
) -> DeleteOutcome {
    let sender_name = message.sender_prettyprint();

    match platform.delete_message(message.chat.id, message.id).await {
        Ok(true) => {
            log::info!("Deleted a message from {sender_name}. {why}");
            DeleteOutcome::Deleted
        }
        Ok(false) => {
            log::warn!(
                "Telegram refused to delete message {} from {} in chat {}. Already deleted, or no rights?",
                message.id.0,
                sender_name,
                message.chat.id,
            );
            DeleteOutcome::Refused
        }
        Err(e) => {
            log::error!(
                "Failed to delete message {} from {} in chat {}: {}",
                message.id.0,
                sender_name,
                message.chat.id,
                e
            );
            DeleteOutcome::Failed
        }
    }
}
