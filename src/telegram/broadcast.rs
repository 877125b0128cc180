//! Broadcast delivery and the preview/confirm staging area.
//!
//! Delivery walks the subscriber list once, sequentially. Each recipient gets
//! exactly one attempt; a failure is logged, counted and the loop moves on.

use dashmap::DashMap;
use teloxide::types::ChatId;

use crate::telegram::cards::ProfileCard;
use crate::telegram::messenger::Messenger;

/// Pending broadcast texts keyed by the admin chat that staged them.
///
/// A new preview replaces the previous one; entries never expire.
#[derive(Debug, Default)]
pub struct PreviewCache {
    pending: DashMap<i64, String>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `text` for `chat_id`, returning the preview it replaced.
    pub fn stage(&self, chat_id: ChatId, text: impl Into<String>) -> Option<String> {
        self.pending.insert(chat_id.0, text.into())
    }

    /// Removes and returns the pending preview.
    pub fn take(&self, chat_id: ChatId) -> Option<String> {
        self.pending.remove(&chat_id.0).map(|(_, text)| text)
    }

    pub fn pending(&self, chat_id: ChatId) -> Option<String> {
        self.pending.get(&chat_id.0).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Outcome of one delivery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: usize,
    pub total: usize,
}

impl BroadcastReport {
    pub fn failed(&self) -> usize {
        self.total - self.sent
    }

    /// "<sent> из <total>" tally shown to the admin
    pub fn tally(&self) -> String {
        format!("{} из {}", self.sent, self.total)
    }
}

/// What goes out to every subscriber
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Text(&'a str),
    Card(&'a ProfileCard),
}

/// Delivers `payload` to every recipient, one attempt each.
pub async fn deliver<M>(messenger: &M, recipients: &[i64], payload: Payload<'_>) -> BroadcastReport
where
    M: Messenger + ?Sized,
{
    let mut report = BroadcastReport {
        sent: 0,
        total: recipients.len(),
    };

    for &recipient in recipients {
        let chat_id = ChatId(recipient);
        let result = match payload {
            Payload::Text(text) => messenger.send_text(chat_id, text).await,
            Payload::Card(card) => messenger.send_card(chat_id, card).await,
        };
        match result {
            Ok(()) => report.sent += 1,
            Err(e) => log::warn!("Broadcast delivery to {} failed: {}", recipient, e),
        }
    }

    log::info!(
        "Broadcast finished: {} delivered, {} failed",
        report.sent,
        report.failed()
    );
    report
}
