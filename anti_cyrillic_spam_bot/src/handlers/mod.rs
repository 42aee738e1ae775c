use std::sync::Arc;

use teloxide::{
    types::{Me, Message},
    RequestError,
};

use crate::{
    actions::DeleteOutcome,
    config::Config,
    platform::{ModerationPlatform, TelegramPlatform},
    types::{AttributionSource, FlagReason, IncomingMessage},
};

use self::{mention::check_mention, passive::check_passive};

pub mod mention;
pub mod passive;

/// What a single stage decided to do about a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not our business.
    Ignored,
    /// Would be deleted, but it's from an admin.
    SkippedPrivileged,
    /// Couldn't find out if it's from an admin, so left it alone.
    LookupFailed,
    /// Spam from a tracked bot, deletion attempted.
    Removed {
        source: AttributionSource,
        reason: FlagReason,
        outcome: DeleteOutcome,
    },
    /// Someone reported spam by pinging the bot. Both the spam and the
    /// report got a deletion attempt.
    Reported {
        source: AttributionSource,
        target: DeleteOutcome,
        trigger: DeleteOutcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MentionTrigger,
    PassiveSpam,
}

/// Every message goes through all of these, in this order.
pub const STAGES: [Stage; 2] = [Stage::MentionTrigger, Stage::PassiveSpam];

/// Run the message through every stage. Each stage decides on its own,
/// regardless of what the ones before it did.
pub async fn evaluate<P: ModerationPlatform>(
    platform: &P,
    config: &Config,
    agent_username: &str,
    message: &IncomingMessage,
) -> Vec<(Stage, Verdict)> {
    let mut verdicts = Vec::with_capacity(STAGES.len());

    for stage in STAGES {
        let verdict = match stage {
            Stage::MentionTrigger => check_mention(platform, config, agent_username, message).await,
            Stage::PassiveSpam => check_passive(platform, config, message).await,
        };
        verdicts.push((stage, verdict));
    }

    verdicts
}

/// Endpoint for new and edited messages, commands already filtered out.
pub async fn handle_message(
    platform: Arc<TelegramPlatform>,
    config: Arc<Config>,
    me: Me,
    message: Message,
) -> Result<(), RequestError> {
    let incoming = IncomingMessage::from(&message);

    for (stage, verdict) in evaluate(&*platform, &config, me.username(), &incoming).await {
        if verdict != Verdict::Ignored {
            log::debug!(
                "Message {} in chat {}: {:?} said {:?}",
                incoming.id.0,
                incoming.chat.id,
                stage,
                verdict
            );
        }
    }

    // Nothing in here is worth crashing the handler over.
    Ok(())
}
