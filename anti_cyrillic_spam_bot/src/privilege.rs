use crate::{
    platform::{ModerationPlatform, PlatformError},
    types::{ChatRef, IncomingMessage, Sender},
};

/// Find out if whoever sent this message speaks for the chat: an admin, the
/// owner, an anonymous admin posting as the group, or the linked channel.
///
/// For messages sent on behalf of a chat, `message.sender` is a placeholder
/// like @GroupAnonymousBot, so the sender chat is checked instead of it.
///
/// # Errors
///
/// Errors if Telegram couldn't tell. Callers should not delete anything then.
pub async fn is_sender_privileged<P: ModerationPlatform>(
    platform: &P,
    message: &IncomingMessage,
) -> Result<bool, PlatformError> {
    let chat = message.chat;
    if !chat.kind.has_admins() {
        return Ok(false);
    }

    if let Some(sender_chat) = message.sender_chat {
        if sender_chat == chat.id {
            // Posted by the chat itself, so an anonymous admin.
            return Ok(true);
        }
        // May be the channel linked to this group, auto-forwarding its posts.
        let linked = platform.linked_chat(chat.id).await?;
        log::debug!(
            "Chat {} is linked to {:?}, message sent as {}",
            chat.id,
            linked,
            sender_chat
        );
        return Ok(linked == Some(sender_chat));
    }

    match &message.sender {
        Some(user) => has_elevated_privilege(platform, chat, user).await,
        None => Ok(false),
    }
}

/// Find out if this user is an admin or the owner of this chat.
///
/// Private chats and channels don't have admins in this sense, so for those
/// this is always `false` and Telegram is not asked at all.
///
/// # Errors
///
/// Errors if Telegram couldn't tell. Callers should not delete anything then.
pub async fn has_elevated_privilege<P: ModerationPlatform>(
    platform: &P,
    chat: ChatRef,
    user: &Sender,
) -> Result<bool, PlatformError> {
    if !chat.kind.has_admins() {
        return Ok(false);
    }

    // Not cached on purpose: admins come and go.
    let status = platform.chat_member_status(chat.id, user.id).await?;
    log::debug!("User {} in chat {} is {:?}", user.id, chat.id, status);
    Ok(status.is_privileged())
}
