//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::{self, BotConfig};
use crate::core::error::AppResult;

/// Bot commands enum with descriptions
///
/// Admin commands are parsed like any other command and refused at handler
/// level for everyone except the configured administrator.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Я умею:")]
pub enum Command {
    #[command(description = "показать анкеты")]
    Start,
    #[command(description = "подписаться на рассылку")]
    Subscribe,
    #[command(description = "предпросмотр рассылки (только для администратора)")]
    Preview(String),
    #[command(description = "отправить подготовленную рассылку (только для администратора)")]
    BroadcastConfirm,
    #[command(description = "сразу разослать сообщение (только для администратора)")]
    Broadcast(String),
    #[command(description = "разослать анкету по номеру (только для администратора)")]
    SendProfile(String),
    #[command(description = "список анкет (только для администратора)")]
    ListProfiles,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError::Http)` - HTTP client setup failed
/// * `Err(AppError::Url)` - `BOT_API_URL` is not a valid URL
pub fn create_bot(bot_config: &BotConfig) -> AppResult<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(bot_config.bot_token(), client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(raw) => {
            let url = parse_api_url(raw)?;
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Parses a custom Bot API endpoint such as a local `telegram-bot-api` server.
pub fn parse_api_url(raw: &str) -> AppResult<url::Url> {
    Ok(url::Url::parse(raw.trim())?)
}

/// Sets up the public bot commands in Telegram UI
///
/// Admin commands stay out of the menu.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "показать анкеты"),
        BotCommand::new("subscribe", "подписаться на рассылку"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url(" http://localhost:8081 ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/");

        let err = parse_api_url("bot api").unwrap_err();
        assert!(matches!(err, crate::core::error::AppError::Url(_)));
        assert!(err.to_string().starts_with("URL parsing error"));
    }

    #[test]
    fn test_parse_public_commands() {
        assert_eq!(Command::parse("/start", "profilebot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/subscribe", "profilebot").unwrap(), Command::Subscribe);
    }

    #[test]
    fn test_parse_admin_commands_with_arguments() {
        assert_eq!(
            Command::parse("/preview Всем привет!", "profilebot").unwrap(),
            Command::Preview("Всем привет!".to_string())
        );
        assert_eq!(
            Command::parse("/broadcast hello world", "profilebot").unwrap(),
            Command::Broadcast("hello world".to_string())
        );
        assert_eq!(
            Command::parse("/send_profile 3", "profilebot").unwrap(),
            Command::SendProfile("3".to_string())
        );
        assert_eq!(
            Command::parse("/broadcast_confirm", "profilebot").unwrap(),
            Command::BroadcastConfirm
        );
        assert_eq!(Command::parse("/list_profiles", "profilebot").unwrap(), Command::ListProfiles);
    }

    #[test]
    fn test_parse_mention_form() {
        assert_eq!(Command::parse("/start@profilebot", "profilebot").unwrap(), Command::Start);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Command::parse("/unsubscribe", "profilebot").is_err());
        assert!(Command::parse("hello", "profilebot").is_err());
    }
}
