use teloxide::types::ChatId;

use crate::core::error::AppResult;
use crate::storage::catalog::Profile;
use crate::telegram::handlers::UserInfo;
use crate::telegram::messenger::Messenger;

/// Builds the admin notification about a user who pressed "begin contact".
pub fn interest_message(user: &UserInfo, index: usize, profile: &Profile) -> String {
    let username = user
        .username
        .as_deref()
        .map(|u| format!("@{}", u))
        .unwrap_or_else(|| "—".to_string());
    let name = if profile.name.trim().is_empty() {
        "—".to_string()
    } else {
        profile.name.clone()
    };
    let age = profile.age.map(|a| a.to_string()).unwrap_or_else(|| "—".to_string());
    let link = profile
        .partner_link
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or("—");

    format!(
        "💌 Новая заявка на общение\n\n\
        Пользователь: {}\n\
        Username: {}\n\
        ID: {}\n\n\
        Анкета #{}\n\
        Имя: {}\n\
        Возраст: {}\n\
        Ссылка: {}",
        user.display_name(),
        username,
        user.user_id,
        index,
        name,
        age,
        link
    )
}

/// Sends the interest notification to the administrator.
///
/// No retry: the caller turns a failure into an apology for the user.
pub async fn notify_admin_interest<M>(
    messenger: &M,
    admin_id: i64,
    user: &UserInfo,
    index: usize,
    profile: &Profile,
) -> AppResult<()>
where
    M: Messenger + ?Sized,
{
    let message = interest_message(user, index, profile);
    match messenger.send_text(ChatId(admin_id), &message).await {
        Ok(()) => {
            log::info!(
                "Admin notified: user {} is interested in profile #{}",
                user.user_id,
                index
            );
            Ok(())
        }
        Err(e) => {
            log::error!(
                "Failed to notify admin {} about interest of user {} in profile #{}: {}",
                admin_id,
                user.user_id,
                index,
                e
            );
            Err(e)
        }
    }
}

/// Tells the administrator the bot (re)started.
pub async fn notify_admin_startup<M>(messenger: &M, admin_id: i64, profiles: usize, subscribers: usize)
where
    M: Messenger + ?Sized,
{
    let message = format!(
        "🚀 Бот запущен\n\nАнкет в каталоге: {}\nПодписчиков: {}",
        profiles, subscribers
    );
    if let Err(e) = messenger.send_text(ChatId(admin_id), &message).await {
        log::warn!("Failed to send startup notification to admin {}: {}", admin_id, e);
    }
}
