//! Profile catalog: the fixed, ordered list of cards shown to users.
//!
//! Loaded once at startup from a JSON array and never mutated afterwards.
//! Profiles are addressed by their position in the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::AppResult;
use crate::core::pagination::normalize;

/// A single displayable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, alias = "text")]
    pub bio: String,
    /// URL or local file path of the card photo
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub partner_link: Option<String>,
}

impl Profile {
    /// "Name, 25" / "Name" / "" depending on which fields are filled.
    pub fn title(&self) -> String {
        match (self.name.trim(), self.age) {
            ("", Some(age)) => format!("{} лет", age),
            ("", None) => String::new(),
            (name, Some(age)) => format!("{}, {}", name, age),
            (name, None) => name.to_string(),
        }
    }

    /// Caption rendered under the card photo.
    pub fn caption(&self) -> String {
        let title = self.title();
        let bio = self.bio.trim();
        match (title.is_empty(), bio.is_empty()) {
            (true, _) => bio.to_string(),
            (false, true) => title,
            (false, false) => format!("{}\n\n{}", title, bio),
        }
    }

    /// Short one-line label used in admin listings and notifications.
    pub fn label(&self) -> String {
        let title = self.title();
        if !title.is_empty() {
            return title;
        }
        let first_line = self.bio.lines().next().unwrap_or("").trim();
        if first_line.chars().count() > 40 {
            let mut short: String = first_line.chars().take(40).collect();
            short.push('…');
            short
        } else if first_line.is_empty() {
            "(без описания)".to_string()
        } else {
            first_line.to_string()
        }
    }
}

/// Ordered, index-addressed sequence of profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    profiles: Vec<Profile>,
}

impl Catalog {
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Reads the catalog from a JSON array on disk.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = fs_err::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let profiles: Vec<Profile> = serde_json::from_str(raw)?;
        Ok(Self { profiles })
    }

    /// Loads the catalog, degrading to an empty one when the file is missing
    /// or corrupt. The bot keeps running and answers "no profiles" instead.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                log::info!("Loaded {} profile(s) from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                log::error!("Failed to load profile catalog from {}: {}", path.display(), e);
                log::error!("Continuing with an empty catalog, navigation will answer \"no profiles\"");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns the profile at `index mod len`, with the normalized index.
    pub fn get(&self, index: i64) -> Option<(usize, &Profile)> {
        let idx = normalize(index, self.len())?;
        self.profiles.get(idx).map(|profile| (idx, profile))
    }

    /// Returns the profile at exactly `index`, without wrapping.
    pub fn get_exact(&self, index: i64) -> Option<(usize, &Profile)> {
        let idx = usize::try_from(index).ok()?;
        self.profiles.get(idx).map(|profile| (idx, profile))
    }

    /// Profile at an already normalized position.
    pub fn nth(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    /// Enumerated plain-text listing, one line per profile.
    pub fn listing(&self) -> Vec<String> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(idx, profile)| match profile.partner_link.as_deref() {
                Some(link) if !link.is_empty() => format!("{}. {} — {}", idx, profile.label(), link),
                _ => format!("{}. {}", idx, profile.label()),
            })
            .collect()
    }
}
