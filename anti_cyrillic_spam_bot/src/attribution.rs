use crate::{
    config::TrackedSources,
    types::{AttributionSource, IncomingMessage},
};

/// Find out if this message is from one of the tracked bots, either sent by it
/// directly or forwarded from it. Returns the matching username and how it matched.
///
/// Direct wins if both match.
pub fn tracked_source_of<'a>(
    message: &'a IncomingMessage,
    tracked: &TrackedSources,
) -> Option<(&'a str, AttributionSource)> {
    if let Some(username) = message.sender_username() {
        if tracked.contains(username) {
            return Some((username, AttributionSource::Direct));
        }
    }

    // A forward either has a user or a chat to look at, never both.
    match message.forward.username() {
        Some(username) if tracked.contains(username) => {
            Some((username, AttributionSource::Forward))
        }
        _ => None,
    }
}
