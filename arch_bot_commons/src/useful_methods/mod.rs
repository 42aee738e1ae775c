use teloxide::types::{Message, MessageEntityKind};

pub trait MessageStuff {
    /// Text of the message, or its media caption if it has no text.
    fn text_full(&self) -> Option<&str>;
    /// `true` if the message carries an inline keyboard with at least one row.
    fn has_inline_keyboard(&self) -> bool;
    /// `true` if Telegram recognizes this message as a slash-command,
    /// i.e. the first entity is a bot command starting at offset 0.
    fn is_command(&self) -> bool;
}

impl MessageStuff for Message {
    fn text_full(&self) -> Option<&str> {
        self.text().or_else(|| self.caption())
    }
    fn has_inline_keyboard(&self) -> bool {
        self.reply_markup()
            .is_some_and(|markup| !markup.inline_keyboard.is_empty())
    }
    fn is_command(&self) -> bool {
        // Commands only ever come as text, never as captions.
        let Some(first) = self.entities().and_then(|entities| entities.first()) else {
            return false;
        };
        matches!(first.kind, MessageEntityKind::BotCommand) && first.offset == 0
    }
}
