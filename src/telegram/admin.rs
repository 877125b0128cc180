//! Admin functionality for the Telegram bot
//!
//! This module contains the administrator-only commands:
//! - Broadcast with preview (/preview, /broadcast_confirm)
//! - Direct broadcast (/broadcast, /send_profile)
//! - Catalog listing (/list_profiles)
//!
//! Every command checks the sender against the configured admin id first;
//! anyone else gets an explicit refusal and nothing changes.

use crate::core::error::AppResult;
use crate::telegram::broadcast::{deliver, Payload};
use crate::telegram::cards::ProfileCard;
use crate::telegram::handlers::{HandlerDeps, UserInfo};
use crate::telegram::messenger::Messenger;

/// Maximum message length for Telegram (with margin)
pub const MAX_MESSAGE_LENGTH: usize = 4000;

pub const ACCESS_DENIED: &str = "⛔ Эта команда доступна только администратору.";
pub const NOTHING_TO_SEND: &str = "Нет сообщения для рассылки.";
pub const PREVIEW_USAGE: &str = "Использование: /preview <текст рассылки>";
pub const BROADCAST_USAGE: &str = "Использование: /broadcast <текст рассылки>";
pub const CONFIRM_HINT: &str = "Если всё верно, отправь команду /broadcast_confirm";
pub const EMPTY_CATALOG: &str = "Каталог анкет пуст.";

/// Check if user is admin, sending the refusal when not
async fn ensure_admin<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo, command: &str) -> AppResult<bool>
where
    M: Messenger + ?Sized,
{
    if deps.is_admin(user) {
        return Ok(true);
    }
    log::warn!("Refused {} for non-admin user {}", command, user.user_id);
    messenger.send_text(user.chat_id, ACCESS_DENIED).await?;
    Ok(false)
}

/// /preview <text>: stage a broadcast and echo it back for review
pub async fn handle_preview<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo, text: &str) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if !ensure_admin(messenger, deps, user, "/preview").await? {
        return Ok(());
    }

    let text = text.trim();
    if text.is_empty() {
        messenger.send_text(user.chat_id, PREVIEW_USAGE).await?;
        return Ok(());
    }

    if deps.previews.stage(user.chat_id, text).is_some() {
        log::info!("Admin {} replaced a pending preview", user.user_id);
    } else {
        log::info!("Admin {} staged a broadcast preview", user.user_id);
    }

    messenger
        .send_text(user.chat_id, &format!("📋 Предпросмотр сообщения:\n\n{}", text))
        .await?;
    messenger.send_text(user.chat_id, CONFIRM_HINT).await?;
    Ok(())
}

/// /broadcast_confirm: send the staged preview to every subscriber
pub async fn handle_broadcast_confirm<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if !ensure_admin(messenger, deps, user, "/broadcast_confirm").await? {
        return Ok(());
    }

    let Some(text) = deps.previews.take(user.chat_id) else {
        messenger.send_text(user.chat_id, NOTHING_TO_SEND).await?;
        return Ok(());
    };

    let recipients = deps.subscribers.list().await;
    log::info!(
        "Admin {} confirmed broadcast to {} subscriber(s)",
        user.user_id,
        recipients.len()
    );
    let report = deliver(messenger, &recipients, Payload::Text(&text)).await;

    messenger
        .send_text(
            user.chat_id,
            &format!("✅ Рассылка завершена! Отправлено {}", report.tally()),
        )
        .await?;
    Ok(())
}

/// /broadcast <text>: send immediately, no preview
pub async fn handle_broadcast<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo, text: &str) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if !ensure_admin(messenger, deps, user, "/broadcast").await? {
        return Ok(());
    }

    let text = text.trim();
    if text.is_empty() {
        messenger.send_text(user.chat_id, BROADCAST_USAGE).await?;
        return Ok(());
    }

    let recipients = deps.subscribers.list().await;
    log::info!(
        "Admin {} started direct broadcast to {} subscriber(s)",
        user.user_id,
        recipients.len()
    );
    let report = deliver(messenger, &recipients, Payload::Text(text)).await;

    messenger
        .send_text(
            user.chat_id,
            &format!("✅ Рассылка завершена! Отправлено {}", report.tally()),
        )
        .await?;
    Ok(())
}

/// /send_profile <index>: send one card, with working buttons, to every subscriber
pub async fn handle_send_profile<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo, args: &str) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if !ensure_admin(messenger, deps, user, "/send_profile").await? {
        return Ok(());
    }

    if deps.catalog.is_empty() {
        messenger.send_text(user.chat_id, EMPTY_CATALOG).await?;
        return Ok(());
    }

    let found = args
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|index| deps.catalog.get_exact(index));
    let Some((index, profile)) = found else {
        messenger
            .send_text(
                user.chat_id,
                &format!(
                    "Неверный номер анкеты. Использование: /send_profile <0..{}>",
                    deps.catalog.len() - 1
                ),
            )
            .await?;
        return Ok(());
    };

    let card = ProfileCard::render(index, profile);
    let recipients = deps.subscribers.list().await;
    log::info!(
        "Admin {} is sending profile #{} to {} subscriber(s)",
        user.user_id,
        index,
        recipients.len()
    );
    let report = deliver(messenger, &recipients, Payload::Card(&card)).await;

    messenger
        .send_text(
            user.chat_id,
            &format!("✅ Анкета #{} разослана! Отправлено {}", index, report.tally()),
        )
        .await?;
    Ok(())
}

/// /list_profiles: enumerated plain-text listing of the catalog
pub async fn handle_list_profiles<M>(messenger: &M, deps: &HandlerDeps, user: &UserInfo) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    if !ensure_admin(messenger, deps, user, "/list_profiles").await? {
        return Ok(());
    }

    if deps.catalog.is_empty() {
        messenger.send_text(user.chat_id, EMPTY_CATALOG).await?;
        return Ok(());
    }

    let header = format!("📇 Анкет в каталоге: {}", deps.catalog.len());
    let lines = std::iter::once(header).chain(deps.catalog.listing());
    for chunk in chunk_lines(lines, MAX_MESSAGE_LENGTH) {
        messenger.send_text(user.chat_id, &chunk).await?;
    }
    Ok(())
}

/// Joins lines into messages no longer than `limit` characters.
///
/// A single line longer than `limit` is cut.
pub fn chunk_lines<I>(lines: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in lines {
        let line: String = line.chars().take(limit).collect();
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(&line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
