use crate::types::FlagReason;

/// Same as `[а-яА-ЯёЁ]` in a regex. Other Cyrillic letters don't count.
fn is_cyrillic(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// True if there's at least one Cyrillic letter in there.
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(is_cyrillic)
}

/// Check if this text looks like spam, and if so, why.
///
/// Spam is Cyrillic text that is either longer than `length_threshold`
/// characters, or comes with inline buttons. Length is counted in
/// characters, not bytes.
pub fn check(
    text: &str,
    has_inline_keyboard: bool,
    length_threshold: usize,
) -> Option<FlagReason> {
    if !has_cyrillic(text) {
        return None;
    }

    if text.chars().count() > length_threshold {
        Some(FlagReason::Long)
    } else if has_inline_keyboard {
        Some(FlagReason::Buttons)
    } else {
        None
    }
}
