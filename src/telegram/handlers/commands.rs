//! Command handler implementations (/start, /subscribe and admin dispatch)

use teloxide::types::ChatId;

use super::types::{HandlerDeps, UserInfo};
use crate::core::error::AppResult;
use crate::telegram::admin;
use crate::telegram::bot::Command;
use crate::telegram::cards::{show_profiles_keyboard, ProfileCard};
use crate::telegram::messenger::Messenger;

pub const WELCOME: &str =
    "👋 Привет! Листай анкеты кнопками ◀️ ▶️ и жми «Начать общение», если кто-то понравился.";
pub const NO_PROFILES: &str = "😔 Анкеты пока недоступны. Загляни позже!";
pub const SUBSCRIBED: &str = "🔔 Вы подписались на рассылку!";
pub const ALREADY_SUBSCRIBED: &str = "Вы уже подписаны на рассылку.";
pub const UNKNOWN_INPUT: &str = "Я понимаю только кнопки и команды. Нажми /start, чтобы посмотреть анкеты.";

/// Routes a parsed command to its handler
pub async fn handle_command<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo, cmd: Command) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    match cmd {
        Command::Start => handle_start_command(messenger, deps, user).await,
        Command::Subscribe => handle_subscribe_command(messenger, deps, user).await,
        Command::Preview(text) => admin::handle_preview(messenger, deps, user, &text).await,
        Command::BroadcastConfirm => admin::handle_broadcast_confirm(messenger, deps, user).await,
        Command::Broadcast(text) => admin::handle_broadcast(messenger, deps, user, &text).await,
        Command::SendProfile(args) => admin::handle_send_profile(messenger, deps, user, &args).await,
        Command::ListProfiles => admin::handle_list_profiles(messenger, deps, user).await,
    }
}

/// Handle /start command
///
/// Registers the chat as a subscriber when `SUBSCRIBE_ON_START` is on, then
/// greets the user and shows the first card.
pub async fn handle_start_command<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if deps.config.subscribe_on_start && deps.subscribers.add(user.chat_id.0).await {
        log::info!("New subscriber on /start: chat_id={}", user.chat_id.0);
    }

    messenger.send_text(user.chat_id, WELCOME).await?;
    send_profile(messenger, deps, user.chat_id, 0).await
}

/// Handle /subscribe command
pub async fn handle_subscribe_command<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if deps.subscribers.add(user.chat_id.0).await {
        log::info!("New subscriber on /subscribe: chat_id={}", user.chat_id.0);
        messenger
            .send_text_with_keyboard(user.chat_id, SUBSCRIBED, show_profiles_keyboard())
            .await
    } else {
        messenger
            .send_text_with_keyboard(user.chat_id, ALREADY_SUBSCRIBED, show_profiles_keyboard())
            .await
    }
}

/// Anything that is neither a known command nor a button press
pub async fn handle_unknown_message<M>(messenger: &M, user: &UserInfo) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    messenger
        .send_text_with_keyboard(user.chat_id, UNKNOWN_INPUT, show_profiles_keyboard())
        .await
}

/// Sends the card at `index mod N` as a new message, or the "no profiles"
/// text when the catalog is empty.
pub async fn send_profile<M>(messenger: &M, deps: &HandlerDeps, chat_id: ChatId, index: i64) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    match deps.catalog.get(index) {
        Some((idx, profile)) => messenger.send_card(chat_id, &ProfileCard::render(idx, profile)).await,
        None => messenger.send_text(chat_id, NO_PROFILES).await,
    }
}
