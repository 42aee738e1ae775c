use crate::{
    actions::delete_message_logged, attribution::tracked_source_of, config::Config,
    platform::ModerationPlatform, privilege::is_sender_privileged, spam_checker,
    types::IncomingMessage,
};

use super::Verdict;

/// Delete the message if one of the tracked bots sent or forwarded it and it looks like spam.
pub async fn check_passive<P: ModerationPlatform>(
    platform: &P,
    config: &Config,
    message: &IncomingMessage,
) -> Verdict {
    let Some((username, source)) = tracked_source_of(message, &config.tracked_sources) else {
        return Verdict::Ignored;
    };

    let Some(reason) = spam_checker::check(
        message.effective_text(),
        message.has_inline_keyboard,
        config.length_threshold,
    ) else {
        log::debug!("Message from @{username} ({source}) doesn't look like spam.");
        return Verdict::Ignored;
    };

    match is_sender_privileged(platform, message).await {
        Ok(false) => (),
        Ok(true) => {
            log::info!(
                "Skipping deleting spam from @{} ({}), {} is an admin.",
                username,
                source,
                message.sender_prettyprint()
            );
            return Verdict::SkippedPrivileged;
        }
        Err(e) => {
            log::warn!(
                "Could not check if {} is an admin of chat {}, not deleting: {}",
                message.sender_prettyprint(),
                message.chat.id,
                e
            );
            return Verdict::LookupFailed;
        }
    }

    let outcome = delete_message_logged(
        platform,
        message,
        format!("Source: @{username} ({source}). Reason: {reason} with Cyrillic."),
    )
    .await;

    Verdict::Removed {
        source,
        reason,
        outcome,
    }
}
