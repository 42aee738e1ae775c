use std::{future::Future, time::Duration};

use teloxide::{
    prelude::Requester,
    types::{ChatId, MessageId, UserId},
    ApiError, Bot, RequestError,
};

use crate::types::ChatMemberStatus;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// The Telegram API calls needed to moderate a chat.
pub trait ModerationPlatform {
    /// Delete a message. `Ok(false)` means Telegram refused without anything
    /// actually breaking: the message is already gone, or can't be deleted by us.
    fn delete_message(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> impl Future<Output = Result<bool, PlatformError>> + Send;

    fn chat_member_status(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<ChatMemberStatus, PlatformError>> + Send;

    /// The channel linked to this group, or the discussion group linked to this channel.
    fn linked_chat(
        &self,
        chat: ChatId,
    ) -> impl Future<Output = Result<Option<ChatId>, PlatformError>> + Send;
}

/// A [`Bot`] with a timeout slapped on every request.
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
    timeout: Duration,
}

impl TelegramPlatform {
    pub fn new(bot: Bot, timeout: Duration) -> Self {
        TelegramPlatform { bot, timeout }
    }

    async fn with_timeout<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, RequestError>>,
    ) -> Result<T, PlatformError> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(PlatformError::Timeout {
                operation,
                after: self.timeout,
            }),
        }
    }
}

impl ModerationPlatform for TelegramPlatform {
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<bool, PlatformError> {
        let result = self
            .with_timeout("deleteMessage", async {
                self.bot.delete_message(chat, message).await
            })
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(PlatformError::Request(RequestError::Api(
                ApiError::MessageIdInvalid
                | ApiError::MessageToDeleteNotFound
                | ApiError::MessageCantBeDeleted,
            ))) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn chat_member_status(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<ChatMemberStatus, PlatformError> {
        let member = self
            .with_timeout("getChatMember", async {
                self.bot.get_chat_member(chat, user).await
            })
            .await?;
        Ok(member.status().into())
    }

    async fn linked_chat(&self, chat: ChatId) -> Result<Option<ChatId>, PlatformError> {
        let chat_full = self
            .with_timeout("getChat", async { self.bot.get_chat(chat).await })
            .await?;
        Ok(chat_full.linked_chat_id().map(ChatId))
    }
}
