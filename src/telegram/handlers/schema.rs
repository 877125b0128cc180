//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::callbacks::handle_callback;
use super::commands::{handle_command, handle_unknown_message};
use super::types::{CallbackOrigin, HandlerDeps, HandlerError, UserInfo};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and can be used in integration tests.
/// Branch order matters: commands first, then the free-text fallback, then
/// button presses.
///
/// # Arguments
/// * `deps` - Handler dependencies (config, catalog, subscribers, previews)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler())
        .branch(callback_handler(deps_callback))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let user = UserInfo::from_message(&msg);
                if let Err(e) = handle_command(&bot, &deps, &user, cmd).await {
                    log::error!("❌ Command handler failed for chat {}: {}", msg.chat.id, e);
                }
                Ok(())
            }
        },
    ))
}

/// Anything that is not a recognised command: unknown slash commands,
/// plain text, stickers and the like.
fn message_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |bot: Bot, msg: Message| async move {
        let user = UserInfo::from_message(&msg);
        if let Err(e) = handle_unknown_message(&bot, &user).await {
            log::warn!("Failed to answer unknown input in chat {}: {}", msg.chat.id, e);
        }
        Ok(())
    })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            let origin = CallbackOrigin::from_query(&q);
            log::debug!(
                "Callback {:?} from user {} in chat {}",
                q.data,
                origin.user.user_id,
                origin.user.chat_id
            );

            let answer = match handle_callback(&bot, &deps, &origin, q.data.as_deref()).await {
                Ok(answer) => answer,
                Err(e) => {
                    log::error!("❌ Callback handler failed for user {}: {}", origin.user.user_id, e);
                    Default::default()
                }
            };

            let mut request = bot.answer_callback_query(q.id.clone());
            if let Some(text) = answer.text {
                request = request.text(text).show_alert(answer.show_alert);
            }
            if let Err(e) = request.await {
                log::warn!("Failed to answer callback query {:?}: {}", q.id, e);
            }
            Ok(())
        }
    })
}
