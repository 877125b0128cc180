//! Common test utilities
//!
//! This module is shared across all integration tests. Handlers are driven
//! directly with a [`RecordingMessenger`] standing in for the Bot API.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use teloxide::types::{ChatId, InlineKeyboardButtonKind, InlineKeyboardMarkup, MessageId};
use tempfile::TempDir;

use profilebot::core::config::BotConfig;
use profilebot::core::error::{AppError, AppResult};
use profilebot::storage::{Catalog, Profile, SubscriberStore};
use profilebot::telegram::cards::ProfileCard;
use profilebot::telegram::handlers::{CallbackOrigin, HandlerDeps, UserInfo};
use profilebot::telegram::messenger::Messenger;

pub const ADMIN_ID: i64 = 1000;
pub const USER_ID: i64 = 2000;

/// One outbound call as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat: i64,
        text: String,
        buttons: Vec<String>,
    },
    Card {
        chat: i64,
        index: usize,
        caption: String,
        buttons: Vec<String>,
    },
    Edit {
        chat: i64,
        message_id: i32,
        index: usize,
    },
}

impl Sent {
    pub fn chat(&self) -> i64 {
        match self {
            Sent::Text { chat, .. } | Sent::Card { chat, .. } | Sent::Edit { chat, .. } => *chat,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Messenger that records every call and fails for selected chats.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    failing_chats: Mutex<HashSet<i64>>,
    fail_edits: Mutex<bool>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call addressed to `chat` fails from now on.
    pub fn fail_chat(&self, chat: i64) {
        self.failing_chats.lock().unwrap().insert(chat);
    }

    pub fn fail_edits(&self) {
        *self.fail_edits.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat: i64) -> Vec<Sent> {
        self.sent().into_iter().filter(|s| s.chat() == chat).collect()
    }

    pub fn texts_to(&self, chat: i64) -> Vec<String> {
        self.sent_to(chat)
            .iter()
            .filter_map(|s| s.text().map(str::to_string))
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn check(&self, chat: ChatId) -> AppResult<()> {
        if self.failing_chats.lock().unwrap().contains(&chat.0) {
            return Err(AppError::Io(std::io::Error::other(format!("chat {} is unreachable", chat.0))));
        }
        Ok(())
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()> {
        self.check(chat_id)?;
        self.record(Sent::Text {
            chat: chat_id.0,
            text: text.to_string(),
            buttons: Vec::new(),
        });
        Ok(())
    }

    async fn send_text_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> AppResult<()> {
        self.check(chat_id)?;
        self.record(Sent::Text {
            chat: chat_id.0,
            text: text.to_string(),
            buttons: button_payloads(&keyboard),
        });
        Ok(())
    }

    async fn send_card(&self, chat_id: ChatId, card: &ProfileCard) -> AppResult<()> {
        self.check(chat_id)?;
        self.record(Sent::Card {
            chat: chat_id.0,
            index: card.index,
            caption: card.caption.clone(),
            buttons: button_payloads(&card.keyboard),
        });
        Ok(())
    }

    async fn edit_card(&self, chat_id: ChatId, message_id: MessageId, card: &ProfileCard) -> AppResult<()> {
        self.check(chat_id)?;
        if *self.fail_edits.lock().unwrap() {
            return Err(AppError::Io(std::io::Error::other("message can't be edited")));
        }
        self.record(Sent::Edit {
            chat: chat_id.0,
            message_id: message_id.0,
            index: card.index,
        });
        Ok(())
    }
}

/// Callback data for callback buttons, the URL for link buttons.
pub fn button_payloads(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .map(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
            InlineKeyboardButtonKind::Url(url) => url.to_string(),
            other => format!("{:?}", other),
        })
        .collect()
}

/// Handler dependencies backed by a temporary subscriber file.
pub struct TestEnv {
    pub deps: HandlerDeps,
    pub messenger: RecordingMessenger,
    pub subscribers_path: PathBuf,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new(profiles: Vec<Profile>) -> Self {
        Self::with_env(profiles, &[]).await
    }

    /// Extra environment variables on top of the token and admin id.
    pub async fn with_env(profiles: Vec<Profile>, extra: &[(&str, &str)]) -> Self {
        let admin = ADMIN_ID.to_string();
        let mut vars: Vec<(String, String)> = vec![
            ("BOT_TOKEN".to_string(), "123:test".to_string()),
            ("ADMIN_ID".to_string(), admin),
        ];
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        let config = BotConfig::from_lookup(|key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
            .expect("test config");

        let dir = tempfile::tempdir().expect("tempdir");
        let subscribers_path = dir.path().join("subscribers.json");
        let subscribers = SubscriberStore::load(subscribers_path.clone()).await;

        Self {
            deps: HandlerDeps::new(
                Arc::new(config),
                Arc::new(Catalog::from_profiles(profiles)),
                Arc::new(subscribers),
            ),
            messenger: RecordingMessenger::new(),
            subscribers_path,
            _dir: dir,
        }
    }

    pub async fn subscribe_all(&self, chats: &[i64]) {
        for &chat in chats {
            self.deps.subscribers.add(chat).await;
        }
    }
}

pub fn profile(name: &str, age: Option<u32>) -> Profile {
    Profile {
        name: name.to_string(),
        age,
        bio: format!("Анкета {}", name),
        photo: format!("https://example.com/{}.jpg", name),
        partner_link: None,
    }
}

pub fn profiles(count: usize) -> Vec<Profile> {
    (0..count).map(|i| profile(&format!("P{}", i), Some(20 + i as u32))).collect()
}

pub fn user(id: i64) -> UserInfo {
    UserInfo {
        chat_id: ChatId(id),
        user_id: id,
        first_name: "Тест".to_string(),
        last_name: None,
        username: Some(format!("user{}", id)),
    }
}

pub fn admin() -> UserInfo {
    user(ADMIN_ID)
}

/// A press on a button of message #77 in the user's private chat.
pub fn origin(id: i64) -> CallbackOrigin {
    CallbackOrigin {
        user: user(id),
        message_id: Some(MessageId(77)),
    }
}
