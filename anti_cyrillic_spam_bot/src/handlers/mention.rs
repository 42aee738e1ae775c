use crate::{
    actions::delete_message_logged, attribution::tracked_source_of, config::Config,
    platform::ModerationPlatform, privilege::is_sender_privileged, spam_checker,
    types::IncomingMessage,
};

use super::Verdict;

/// True if `text` pings `@agent_username`, in any letter case.
fn mentions(text: &str, agent_username: &str) -> bool {
    if agent_username.is_empty() {
        return false;
    }
    let mention = format!("@{agent_username}").to_lowercase();
    text.to_lowercase().contains(&mention)
}

/// Handle someone replying to a tracked bot's message with a ping of this bot,
/// like "@this_bot spam". If the replied-to message has any Cyrillic in it,
/// delete it along with the reply.
///
/// Only Cyrillic is required here, not length or buttons: a person already
/// looked at it and decided it's spam.
pub async fn check_mention<P: ModerationPlatform>(
    platform: &P,
    config: &Config,
    agent_username: &str,
    message: &IncomingMessage,
) -> Verdict {
    let Some(target) = message.reply_to.as_deref() else {
        return Verdict::Ignored;
    };

    if !mentions(message.effective_text(), agent_username) {
        return Verdict::Ignored;
    }

    let reporter = message.sender_prettyprint();

    let Some((username, source)) = tracked_source_of(target, &config.tracked_sources) else {
        log::debug!(
            "{} pinged about a message from {}, which is not tracked.",
            reporter,
            target.sender_prettyprint()
        );
        return Verdict::Ignored;
    };

    if !spam_checker::has_cyrillic(target.effective_text()) {
        log::debug!("{reporter} pinged about a message from @{username}, but it has no Cyrillic.");
        return Verdict::Ignored;
    }

    match is_sender_privileged(platform, target).await {
        Ok(false) => (),
        Ok(true) => {
            // Leave the ping alone too, admins can sort it out themselves.
            log::info!(
                "{} reported a message from @{} ({}), but {} is an admin. Skipping.",
                reporter,
                username,
                source,
                target.sender_prettyprint()
            );
            return Verdict::SkippedPrivileged;
        }
        Err(e) => {
            log::warn!(
                "Could not check if {} is an admin of chat {}, not deleting: {}",
                target.sender_prettyprint(),
                target.chat.id,
                e
            );
            return Verdict::LookupFailed;
        }
    }

    // Two separate deletes. If the first one fails, still clean up the ping.
    let target_outcome = delete_message_logged(
        platform,
        target,
        format!("Source: @{username} ({source}). Reason: reported by {reporter}."),
    )
    .await;

    let trigger_outcome =
        delete_message_logged(platform, message, "Reason: spam report, no longer needed.").await;

    Verdict::Reported {
        source,
        target: target_outcome,
        trigger: trigger_outcome,
    }
}
