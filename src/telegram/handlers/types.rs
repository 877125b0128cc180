//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::{CallbackQuery, ChatId, Message, MessageId, User};

use crate::core::config::BotConfig;
use crate::storage::{Catalog, SubscriberStore};
use crate::telegram::broadcast::PreviewCache;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
///
/// Owned by the router and cloned into every handler invocation; the mutable
/// pieces (subscribers, pending previews) synchronize internally.
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<BotConfig>,
    pub catalog: Arc<Catalog>,
    pub subscribers: Arc<SubscriberStore>,
    pub previews: Arc<PreviewCache>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(config: Arc<BotConfig>, catalog: Arc<Catalog>, subscribers: Arc<SubscriberStore>) -> Self {
        Self {
            config,
            catalog,
            subscribers,
            previews: Arc::new(PreviewCache::new()),
        }
    }

    /// Whether the sender may run admin commands
    pub fn is_admin(&self, user: &UserInfo) -> bool {
        self.config.is_admin(user.user_id)
    }
}

/// Sender of an update, as far as the handlers care
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub chat_id: ChatId,
    /// Telegram user id, 0 when the update has no sender (channel posts)
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl UserInfo {
    /// Extract user info from a Telegram message
    pub fn from_message(msg: &Message) -> Self {
        match msg.from.as_ref() {
            Some(user) => Self::from_user(msg.chat.id, user),
            None => Self {
                chat_id: msg.chat.id,
                user_id: 0,
                first_name: String::new(),
                last_name: None,
                username: None,
            },
        }
    }

    /// Extract user info from a callback query; the chat is the one holding
    /// the pressed message, falling back to the private chat with the user.
    pub fn from_callback(query: &CallbackQuery) -> Self {
        let chat_id = query
            .message
            .as_ref()
            .map(|m| m.chat().id)
            .unwrap_or_else(|| ChatId(user_id_of(&query.from)));
        Self::from_user(chat_id, &query.from)
    }

    fn from_user(chat_id: ChatId, user: &User) -> Self {
        Self {
            chat_id,
            user_id: user_id_of(user),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }

    /// "First Last" or just the first name
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

fn user_id_of(user: &User) -> i64 {
    i64::try_from(user.id.0).unwrap_or(0)
}

/// Where a pressed button lives
#[derive(Debug, Clone)]
pub struct CallbackOrigin {
    pub user: UserInfo,
    /// Message carrying the pressed keyboard, if Telegram still has it
    pub message_id: Option<MessageId>,
}

impl CallbackOrigin {
    pub fn from_query(query: &CallbackQuery) -> Self {
        Self {
            user: UserInfo::from_callback(query),
            message_id: query.message.as_ref().map(|m| m.id()),
        }
    }
}

/// Text shown in the callback query answer (toast or alert)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub text: Option<String>,
    pub show_alert: bool,
}

impl CallbackAnswer {
    /// Answer without text, just stops the button spinner
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn toast(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: false,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: true,
        }
    }
}
