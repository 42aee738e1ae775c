//! Message builders and a fake Telegram for tests.

use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use teloxide::{
    types::{ChatId, Message, MessageId, UserId},
    ApiError, RequestError,
};

use crate::{
    platform::{ModerationPlatform, PlatformError},
    types::{ChatKind, ChatMemberStatus, ChatRef, ForwardAttribution, IncomingMessage, Sender},
};

pub fn supergroup() -> ChatRef {
    ChatRef {
        id: ChatId(-1001234567890),
        kind: ChatKind::Supergroup,
    }
}

/// A made up user ID for `username`. The same username always gets the same ID.
pub fn user_id_for(username: Option<&str>) -> UserId {
    let Some(username) = username else {
        return UserId(1);
    };
    let mut hasher = DefaultHasher::new();
    username.hash(&mut hasher);
    // Keep clear of the small IDs used for users without a username.
    UserId(hasher.finish() | 1 << 32)
}

/// A plain text message in [`supergroup`], from [`user_id_for`] `username`.
pub fn group_message(id: i32, username: Option<&str>, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: MessageId(id),
        chat: supergroup(),
        sender: Some(Sender {
            id: user_id_for(username),
            username: username.map(str::to_owned),
            display_name: None,
        }),
        sender_chat: None,
        text: Some(text.to_owned()),
        reply_to: None,
        has_inline_keyboard: false,
        forward: ForwardAttribution::None,
    }
}

/// A message forwarded by a regular person from a channel called `@chat_username`.
pub fn forwarded_from_chat(id: i32, chat_username: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        forward: ForwardAttribution::FromChat {
            id: ChatId(-1009876543210),
            username: Some(chat_username.to_owned()),
        },
        ..group_message(id, Some("regular_person"), text)
    }
}

/// `target`, with `text` replying to it, sent by `username`.
pub fn reply_to(
    id: i32,
    username: Option<&str>,
    text: &str,
    target: IncomingMessage,
) -> IncomingMessage {
    IncomingMessage {
        reply_to: Some(Box::new(target)),
        ..group_message(id, username, text)
    }
}

/// A message in [`supergroup`] posted by an anonymous admin, which Telegram
/// shows as coming from @GroupAnonymousBot on behalf of the group itself.
/// It's a forward of `text` from @`forwarded_from`.
pub fn anonymous_admin_forward(id: i32, forwarded_from: &str, text: &str) -> Message {
    let group = serde_json::json!({
        "id": supergroup().id.0,
        "type": "supergroup",
        "title": "Chat",
        "is_forum": false,
    });
    serde_json::from_value(serde_json::json!({
        "message_id": id,
        "date": 1_700_000_000,
        "chat": group,
        "from": {
            "id": 1_087_968_824_u64,
            "is_bot": true,
            "first_name": "Group",
            "username": "GroupAnonymousBot",
        },
        "sender_chat": group,
        "forward_origin": {
            "type": "user",
            "date": 1_699_999_999,
            "sender_user": {
                "id": 5_000_000_001_u64,
                "is_bot": true,
                "first_name": "Save",
                "username": forwarded_from,
            },
        },
        "text": text,
    }))
    .unwrap()
}

/// Pretends to be Telegram. Everyone is a regular member unless told otherwise.
#[derive(Default)]
pub struct FakePlatform {
    statuses: HashMap<UserId, ChatMemberStatus>,
    linked_chats: HashMap<ChatId, ChatId>,
    failing_lookups: bool,
    refused_deletes: bool,
    failing_deletes: bool,
    lookups: AtomicUsize,
    deleted: Mutex<Vec<(ChatId, MessageId)>>,
}

impl FakePlatform {
    pub fn with_status(mut self, user: UserId, status: ChatMemberStatus) -> Self {
        self.statuses.insert(user, status);
        self
    }
    pub fn with_linked_chat(mut self, chat: ChatId, linked: ChatId) -> Self {
        self.linked_chats.insert(chat, linked);
        self
    }
    pub fn with_failing_lookups(mut self) -> Self {
        self.failing_lookups = true;
        self
    }
    pub fn with_refused_deletes(mut self) -> Self {
        self.refused_deletes = true;
        self
    }
    pub fn with_failing_deletes(mut self) -> Self {
        self.failing_deletes = true;
        self
    }

    /// Messages successfully deleted so far, in order.
    pub fn deleted(&self) -> Vec<(ChatId, MessageId)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ModerationPlatform for FakePlatform {
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<bool, PlatformError> {
        if self.failing_deletes {
            return Err(RequestError::Api(ApiError::BotKicked).into());
        }
        if self.refused_deletes {
            return Ok(false);
        }

        let mut deleted = self.deleted.lock().unwrap();
        if deleted.contains(&(chat, message)) {
            // Like Telegram, can't delete the same thing twice.
            return Ok(false);
        }
        deleted.push((chat, message));
        Ok(true)
    }

    async fn chat_member_status(
        &self,
        _chat: ChatId,
        user: UserId,
    ) -> Result<ChatMemberStatus, PlatformError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_lookups {
            let error = ApiError::Unknown("Bad Request: user not found".to_owned());
            return Err(RequestError::Api(error).into());
        }
        Ok(self
            .statuses
            .get(&user)
            .copied()
            .unwrap_or(ChatMemberStatus::Member))
    }

    async fn linked_chat(&self, chat: ChatId) -> Result<Option<ChatId>, PlatformError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_lookups {
            let error = ApiError::Unknown("Bad Request: chat not found".to_owned());
            return Err(RequestError::Api(error).into());
        }
        Ok(self.linked_chats.get(&chat).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anagram_usernames_get_different_ids() {
        assert_ne!(
            user_id_for(Some("instagrambot")),
            user_id_for(Some("botinstagram"))
        );
        assert_ne!(
            user_id_for(Some("SaveMedia_bot")),
            user_id_for(Some("SaveMedia_tob"))
        );
        assert_eq!(
            user_id_for(Some("instagrambot")),
            group_message(1, Some("instagrambot"), "").sender.unwrap().id
        );
        assert_eq!(user_id_for(None), UserId(1));
    }
}
