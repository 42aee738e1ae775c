use std::sync::Arc;
use teloxide::{dptree::deps, prelude::*};

use arch_bot_commons::useful_methods::MessageStuff;

use crate::{
    config::{load_bot_token, Config},
    handlers::handle_message,
    platform::TelegramPlatform,
};

pub async fn entry() {
    log::info!("ASYNC WOOOO");

    let key = match load_bot_token() {
        Ok(key) => key,
        Err(e) => {
            log::error!("Can't start: {e}");
            return;
        }
    };

    let config = Arc::new(Config::from_env());
    log::info!(
        "Watching {} bots: {}",
        config.tracked_sources.len(),
        config.tracked_sources
    );

    let bot = Bot::new(key);
    let platform = Arc::new(TelegramPlatform::new(bot.clone(), config.request_timeout));

    log::info!("Creating the handler...");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|message: Message| !message.is_command())
                .endpoint(handle_message),
        )
        .branch(
            Update::filter_edited_message()
                .filter(|message: Message| !message.is_command())
                .endpoint(handle_message),
        );

    log::info!("Dispatching the dispatcher!");

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .dependencies(deps![platform, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("it appears we have been bonked.");
}
