//! Source code for a bot that removes Cyrillic spam posted by, or forwarded from,
//! a configured set of Telegram bots like `@SaveMedia_bot`.

/// Configuration read from the environment at startup.
mod config;

/// Various types used throughout.
mod types;

/// The API calls this bot makes, behind a trait.
mod platform;

/// Spam checker functionality.
mod spam_checker;

/// Figuring out who a message is really from.
mod attribution;

/// Checking if someone is an admin before deleting their stuff.
mod privilege;

/// Functions that perform stuff via the bot.
mod actions;

/// Functions that handle events from Telegram.
mod handlers;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;

#[cfg(test)]
mod testing;
