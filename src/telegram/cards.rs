//! Profile cards and the inline keyboards attached to them.

use std::path::PathBuf;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use url::Url;

use crate::core::pagination::Direction;
use crate::storage::catalog::Profile;
use crate::telegram::callback::CallbackAction;

/// Telegram limit for photo captions
pub const MAX_CAPTION_LENGTH: usize = 1024;

pub const CONTACT_BUTTON: &str = "Начать общение";
pub const SUBSCRIBE_BUTTON: &str = "🔔 Подписаться";
pub const SHOW_PROFILES_BUTTON: &str = "👀 Смотреть анкеты";
pub const PARTNER_LINK_BUTTON: &str = "💬 Перейти к общению";

/// Where the card photo comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Url(Url),
    File(PathBuf),
}

impl PhotoSource {
    /// URLs are sent by reference, anything else is treated as a local file.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(PhotoSource::Url(url)),
            _ => Some(PhotoSource::File(PathBuf::from(raw))),
        }
    }

    pub fn to_input_file(&self) -> InputFile {
        match self {
            PhotoSource::Url(url) => InputFile::url(url.clone()),
            PhotoSource::File(path) => InputFile::file(path.clone()),
        }
    }
}

/// A rendered profile ready to be sent or edited in place.
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub index: usize,
    pub photo: Option<PhotoSource>,
    pub caption: String,
    pub keyboard: InlineKeyboardMarkup,
}

impl ProfileCard {
    pub fn render(index: usize, profile: &Profile) -> Self {
        Self {
            index,
            photo: PhotoSource::parse(&profile.photo),
            caption: truncate_caption(&profile.caption()),
            keyboard: profile_keyboard(index),
        }
    }
}

fn truncate_caption(text: &str) -> String {
    if text.chars().count() <= MAX_CAPTION_LENGTH {
        return text.to_string();
    }
    let mut trimmed: String = text.chars().take(MAX_CAPTION_LENGTH - 1).collect();
    trimmed.push('…');
    trimmed
}

/// Paging + contact row, then the subscribe row.
///
/// Every button addresses the card's own index, so each rendered message is
/// independently navigable.
pub fn profile_keyboard(index: usize) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("◀️", CallbackAction::navigate(Direction::Backward, index).to_string()),
            InlineKeyboardButton::callback(CONTACT_BUTTON, CallbackAction::begin_contact(index).to_string()),
            InlineKeyboardButton::callback("▶️", CallbackAction::navigate(Direction::Forward, index).to_string()),
        ],
        vec![InlineKeyboardButton::callback(
            SUBSCRIBE_BUTTON,
            CallbackAction::Subscribe.to_string(),
        )],
    ])
}

/// Single "show profiles" button starting from the first card.
pub fn show_profiles_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        SHOW_PROFILES_BUTTON,
        CallbackAction::show(0).to_string(),
    )]])
}

/// URL button to the partner link, when the profile has a usable one.
pub fn partner_link_keyboard(profile: &Profile) -> Option<InlineKeyboardMarkup> {
    let link = profile.partner_link.as_deref()?.trim();
    let url = Url::parse(link).ok()?;
    Some(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        PARTNER_LINK_BUTTON,
        url,
    )]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_profile_keyboard_addresses_its_index() {
        let keyboard = profile_keyboard(7);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard), vec!["prev_7", "start_7", "next_7", "subscribe"]);
    }

    #[test]
    fn test_photo_source() {
        assert!(matches!(
            PhotoSource::parse("https://example.com/a.jpg"),
            Some(PhotoSource::Url(_))
        ));
        assert_eq!(
            PhotoSource::parse("photos/a.jpg"),
            Some(PhotoSource::File(PathBuf::from("photos/a.jpg")))
        );
        assert_eq!(PhotoSource::parse("   "), None);
    }

    #[test]
    fn test_render_truncates_long_caption() {
        let profile = Profile {
            name: String::new(),
            age: None,
            bio: "я".repeat(2000),
            photo: "https://example.com/a.jpg".to_string(),
            partner_link: None,
        };
        let card = ProfileCard::render(0, &profile);
        assert_eq!(card.caption.chars().count(), MAX_CAPTION_LENGTH);
        assert!(card.caption.ends_with('…'));
    }

    #[test]
    fn test_partner_link_keyboard() {
        let mut profile = Profile {
            name: "A".to_string(),
            age: None,
            bio: String::new(),
            photo: String::new(),
            partner_link: Some("https://partner.example.com/click?id=1".to_string()),
        };
        let keyboard = partner_link_keyboard(&profile).unwrap();
        assert!(matches!(
            &keyboard.inline_keyboard[0][0].kind,
            InlineKeyboardButtonKind::Url(url) if url.as_str() == "https://partner.example.com/click?id=1"
        ));

        profile.partner_link = Some("not a url".to_string());
        assert!(partner_link_keyboard(&profile).is_none());
        profile.partner_link = None;
        assert!(partner_link_keyboard(&profile).is_none());
    }
}
