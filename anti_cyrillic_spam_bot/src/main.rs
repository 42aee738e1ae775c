use arch_bot_commons::*;

fn main() {
    start_everything(
        "WARN,anti_cyrillic_spam_bot=info",
        anti_cyrillic_spam_bot::entry(),
    );
}
