//! Inline button handlers: paging, "begin contact" and subscribe.

use super::commands::{ALREADY_SUBSCRIBED, NO_PROFILES, SUBSCRIBED};
use super::types::{CallbackAnswer, CallbackOrigin, HandlerDeps};
use crate::core::error::AppResult;
use crate::core::pagination::{advance, normalize, Direction};
use crate::telegram::callback::CallbackAction;
use crate::telegram::cards::{partner_link_keyboard, ProfileCard};
use crate::telegram::messenger::Messenger;
use crate::telegram::notifications::notify_admin_interest;

pub const UNKNOWN_ACTION: &str = "Неизвестное действие.";
pub const PROFILE_NOT_FOUND: &str = "Анкета не найдена.";
pub const CARD_APOLOGY: &str = "😔 Не удалось показать анкету, попробуйте ещё раз.";
pub const CONTACT_SENT: &str = "✅ Заявка отправлена! Мы уже передали её, а пока можешь перейти к общению по кнопке ниже.";
pub const CONTACT_SENT_TOAST: &str = "✅ Заявка отправлена";
pub const CONTACT_APOLOGY: &str = "😔 Извините, не удалось отправить заявку. Попробуйте позже.";

/// Handles a button press and returns what to show in the callback answer.
///
/// Malformed payloads are rejected here, before any state is touched.
pub async fn handle_callback<M>(
    messenger: &M,
    deps: &HandlerDeps,
    origin: &CallbackOrigin,
    data: Option<&str>,
) -> AppResult<CallbackAnswer>
where
    M: Messenger + ?Sized,
{
    let action = match data.unwrap_or_default().parse::<CallbackAction>() {
        Ok(action) => action,
        Err(e) => {
            log::warn!("Rejected callback from user {}: {}", origin.user.user_id, e);
            return Ok(CallbackAnswer::alert(UNKNOWN_ACTION));
        }
    };

    match action {
        CallbackAction::Navigate { direction, index } => navigate(messenger, deps, origin, direction, index).await,
        CallbackAction::Show { index } => show(messenger, deps, origin, index).await,
        CallbackAction::BeginContact { index } => begin_contact(messenger, deps, origin, index).await,
        CallbackAction::Subscribe => {
            if deps.subscribers.add(origin.user.chat_id.0).await {
                log::info!("New subscriber via button: chat_id={}", origin.user.chat_id.0);
                Ok(CallbackAnswer::toast(SUBSCRIBED))
            } else {
                Ok(CallbackAnswer::toast(ALREADY_SUBSCRIBED))
            }
        }
    }
}

async fn navigate<M>(
    messenger: &M,
    deps: &HandlerDeps,
    origin: &CallbackOrigin,
    direction: Direction,
    index: i64,
) -> AppResult<CallbackAnswer>
where
    M: Messenger + ?Sized,
{
    let len = deps.catalog.len();
    let Some(next) = advance(index, direction, len) else {
        return Ok(CallbackAnswer::alert(NO_PROFILES));
    };
    // Single-profile catalog: nothing to re-render.
    if normalize(index, len) == Some(next) {
        return Ok(CallbackAnswer::silent());
    }
    let Some(profile) = deps.catalog.nth(next) else {
        return Ok(CallbackAnswer::alert(NO_PROFILES));
    };

    let card = ProfileCard::render(next, profile);
    let chat_id = origin.user.chat_id;

    if let Some(message_id) = origin.message_id {
        match messenger.edit_card(chat_id, message_id, &card).await {
            Ok(()) => return Ok(CallbackAnswer::silent()),
            Err(e) => log::debug!("Editing card in chat {} failed, sending a new one: {}", chat_id.0, e),
        }
    }

    match messenger.send_card(chat_id, &card).await {
        Ok(()) => Ok(CallbackAnswer::silent()),
        Err(e) => {
            log::warn!("Failed to send profile #{} to chat {}: {}", next, chat_id.0, e);
            Ok(CallbackAnswer::alert(CARD_APOLOGY))
        }
    }
}

async fn show<M>(messenger: &M, deps: &HandlerDeps, origin: &CallbackOrigin, index: i64) -> AppResult<CallbackAnswer>
where
    M: Messenger + ?Sized,
{
    let Some((idx, profile)) = deps.catalog.get(index) else {
        return Ok(CallbackAnswer::alert(NO_PROFILES));
    };

    let chat_id = origin.user.chat_id;
    match messenger.send_card(chat_id, &ProfileCard::render(idx, profile)).await {
        Ok(()) => Ok(CallbackAnswer::silent()),
        Err(e) => {
            log::warn!("Failed to send profile #{} to chat {}: {}", idx, chat_id.0, e);
            Ok(CallbackAnswer::alert(CARD_APOLOGY))
        }
    }
}

async fn begin_contact<M>(
    messenger: &M,
    deps: &HandlerDeps,
    origin: &CallbackOrigin,
    index: i64,
) -> AppResult<CallbackAnswer>
where
    M: Messenger + ?Sized,
{
    let Some((idx, profile)) = deps.catalog.get_exact(index) else {
        return Ok(CallbackAnswer::alert(PROFILE_NOT_FOUND));
    };

    let chat_id = origin.user.chat_id;
    match notify_admin_interest(messenger, deps.config.admin_id, &origin.user, idx, profile).await {
        Ok(()) => {
            let ack = match partner_link_keyboard(profile) {
                Some(keyboard) => messenger.send_text_with_keyboard(chat_id, CONTACT_SENT, keyboard).await,
                None => messenger.send_text(chat_id, CONTACT_SENT).await,
            };
            if let Err(e) = ack {
                log::warn!("Failed to acknowledge contact request in chat {}: {}", chat_id.0, e);
            }
            Ok(CallbackAnswer::toast(CONTACT_SENT_TOAST))
        }
        Err(_) => match messenger.send_text(chat_id, CONTACT_APOLOGY).await {
            Ok(()) => Ok(CallbackAnswer::silent()),
            Err(e) => {
                log::warn!("Failed to send apology to chat {}: {}", chat_id.0, e);
                Ok(CallbackAnswer::alert(CONTACT_APOLOGY))
            }
        },
    }
}
