use std::fmt::Display;

use arch_bot_commons::useful_methods::MessageStuff;
use teloxide::types::{Chat, ChatId, Message, MessageId, MessageOrigin, User, UserId};

/// What kind of chat a message was sent in. Only groups have admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Other,
}

impl ChatKind {
    pub fn from_chat(chat: &Chat) -> Self {
        if chat.is_private() {
            ChatKind::Private
        } else if chat.is_group() {
            ChatKind::Group
        } else if chat.is_supergroup() {
            ChatKind::Supergroup
        } else {
            ChatKind::Other
        }
    }

    /// True for chats where the concept of chat admins applies.
    pub fn has_admins(self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatRef {
    pub id: ChatId,
    pub kind: ChatKind,
}

/// The user that sent a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    /// Username without the `@`.
    pub username: Option<String>,
    pub display_name: Option<String>,
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Sender {
            id: user.id,
            username: user.username.clone(),
            display_name: Some(user.full_name()),
        }
    }
}

/// Where a forwarded message originally came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ForwardAttribution {
    /// Not a forward, or forwarded from someone who hides their account.
    #[default]
    None,
    FromUser {
        id: UserId,
        username: Option<String>,
    },
    /// Forwarded from a channel, or from a group posting as itself.
    FromChat {
        id: ChatId,
        username: Option<String>,
    },
}

impl ForwardAttribution {
    pub fn from_origin(origin: Option<&MessageOrigin>) -> Self {
        match origin {
            Some(MessageOrigin::User { sender_user, .. }) => ForwardAttribution::FromUser {
                id: sender_user.id,
                username: sender_user.username.clone(),
            },
            Some(MessageOrigin::Chat { sender_chat, .. }) => ForwardAttribution::FromChat {
                id: sender_chat.id,
                username: sender_chat.username().map(str::to_owned),
            },
            Some(MessageOrigin::Channel { chat, .. }) => ForwardAttribution::FromChat {
                id: chat.id,
                username: chat.username().map(str::to_owned),
            },
            // Only a display name is given for these, nothing to match against.
            Some(MessageOrigin::HiddenUser { .. }) | None => ForwardAttribution::None,
        }
    }

    /// The username of the original sender, if there is one.
    pub fn username(&self) -> Option<&str> {
        match self {
            ForwardAttribution::None => None,
            ForwardAttribution::FromUser { username, .. }
            | ForwardAttribution::FromChat { username, .. } => username.as_deref(),
        }
    }
}

/// Everything the moderation logic needs to know about a single message,
/// pulled out of the Telegram update once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub chat: ChatRef,
    /// Absent for channel posts. For messages sent on behalf of a chat this is
    /// a placeholder account like @GroupAnonymousBot, see `sender_chat`.
    pub sender: Option<Sender>,
    /// The chat this was sent on behalf of: the group itself for anonymous
    /// admins, or a channel.
    pub sender_chat: Option<ChatId>,
    /// Text of the message, or the caption of its media.
    pub text: Option<String>,
    pub reply_to: Option<Box<IncomingMessage>>,
    pub has_inline_keyboard: bool,
    pub forward: ForwardAttribution,
}

impl IncomingMessage {
    /// Text or caption, empty if there's neither.
    pub fn effective_text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn sender_username(&self) -> Option<&str> {
        self.sender.as_ref().and_then(|s| s.username.as_deref())
    }

    /// `@username`, or the display name, or a placeholder. For logging.
    pub fn sender_prettyprint(&self) -> String {
        match &self.sender {
            Some(Sender {
                username: Some(username),
                ..
            }) => format!("@{username}"),
            Some(Sender {
                display_name: Some(name),
                ..
            }) => name.clone(),
            Some(Sender { id, .. }) => format!("user {id}"),
            None => match &self.forward {
                ForwardAttribution::FromUser {
                    username: Some(username),
                    ..
                }
                | ForwardAttribution::FromChat {
                    username: Some(username),
                    ..
                } => format!("@{username} (forwarded)"),
                ForwardAttribution::FromUser { id, .. } => format!("user {id} (forwarded)"),
                ForwardAttribution::FromChat { id, .. } => format!("chat {id} (forwarded)"),
                // Shouldn't happen, but eh.
                ForwardAttribution::None => "a private sender".to_string(),
            },
        }
    }
}

impl From<&Message> for IncomingMessage {
    fn from(message: &Message) -> Self {
        IncomingMessage {
            id: message.id,
            chat: ChatRef {
                id: message.chat.id,
                kind: ChatKind::from_chat(&message.chat),
            },
            sender: message.from.as_ref().map(Sender::from),
            sender_chat: message.sender_chat.as_ref().map(|chat| chat.id),
            text: message.text_full().map(str::to_owned),
            reply_to: message
                .reply_to_message()
                .map(|reply| Box::new(IncomingMessage::from(reply))),
            has_inline_keyboard: message.has_inline_keyboard(),
            forward: ForwardAttribution::from_origin(message.forward_origin()),
        }
    }
}

/// Status of a user in a chat, as far as deleting their messages is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMemberStatus {
    Member,
    Administrator,
    Creator,
    /// Restricted, left, banned, or something Telegram added later.
    Other,
}

impl ChatMemberStatus {
    pub fn is_privileged(self) -> bool {
        matches!(
            self,
            ChatMemberStatus::Administrator | ChatMemberStatus::Creator
        )
    }
}

impl From<teloxide::types::ChatMemberStatus> for ChatMemberStatus {
    fn from(status: teloxide::types::ChatMemberStatus) -> Self {
        use teloxide::types::ChatMemberStatus as Tg;
        match status {
            Tg::Owner => ChatMemberStatus::Creator,
            Tg::Administrator => ChatMemberStatus::Administrator,
            Tg::Member => ChatMemberStatus::Member,
            _ => ChatMemberStatus::Other,
        }
    }
}

/// How a message got attributed to a tracked bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionSource {
    /// Sent by the bot itself.
    Direct,
    /// Forwarded from the bot, or from a chat with its username.
    Forward,
}

impl Display for AttributionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributionSource::Direct => write!(f, "direct"),
            AttributionSource::Forward => write!(f, "forward"),
        }
    }
}

/// Why a message was considered spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagReason {
    /// Cyrillic and longer than the length threshold.
    Long,
    /// Cyrillic and has inline buttons.
    Buttons,
}

impl Display for FlagReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagReason::Long => write!(f, "Long"),
            FlagReason::Buttons => write!(f, "Buttons"),
        }
    }
}
