//! Outbound Telegram calls used by the handlers.
//!
//! Every call is a fallible RPC without automatic retry. Handlers only talk
//! to Telegram through this trait, which keeps the routing and broadcast
//! logic independent from a live Bot API connection.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputMedia, InputMediaPhoto, MessageId};

use crate::core::error::AppResult;
use crate::telegram::cards::ProfileCard;

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()>;

    /// Sends a text message with an inline keyboard.
    async fn send_text_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> AppResult<()>;

    /// Sends a profile card as a new message.
    async fn send_card(&self, chat_id: ChatId, card: &ProfileCard) -> AppResult<()>;

    /// Replaces an already sent card in place.
    async fn edit_card(&self, chat_id: ChatId, message_id: MessageId, card: &ProfileCard) -> AppResult<()>;
}

#[async_trait]
impl Messenger for Bot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()> {
        self.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_text_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> AppResult<()> {
        self.send_message(chat_id, text).reply_markup(keyboard).await?;
        Ok(())
    }

    async fn send_card(&self, chat_id: ChatId, card: &ProfileCard) -> AppResult<()> {
        match &card.photo {
            Some(photo) => {
                self.send_photo(chat_id, photo.to_input_file())
                    .caption(card.caption.clone())
                    .reply_markup(card.keyboard.clone())
                    .await?;
            }
            None => {
                self.send_message(chat_id, card.caption.clone())
                    .reply_markup(card.keyboard.clone())
                    .await?;
            }
        }
        Ok(())
    }

    async fn edit_card(&self, chat_id: ChatId, message_id: MessageId, card: &ProfileCard) -> AppResult<()> {
        match &card.photo {
            Some(photo) => {
                let media = InputMedia::Photo(InputMediaPhoto::new(photo.to_input_file()).caption(card.caption.clone()));
                self.edit_message_media(chat_id, message_id, media)
                    .reply_markup(card.keyboard.clone())
                    .await?;
            }
            None => {
                self.edit_message_text(chat_id, message_id, card.caption.clone())
                    .reply_markup(card.keyboard.clone())
                    .await?;
            }
        }
        Ok(())
    }
}
