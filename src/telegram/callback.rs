//! Inline button payloads.
//!
//! Buttons carry `action_index` strings (`next_3`, `prev_0`, `start_2`,
//! `nav_5`) or the literal `subscribe`. They are parsed once at the router
//! boundary into [`CallbackAction`]; malformed payloads are rejected with a
//! [`CallbackParseError`] instead of flowing further as raw strings.

use std::fmt;
use std::str::FromStr;

use crate::core::error::CallbackParseError;
use crate::core::pagination::Direction;

const SUBSCRIBE: &str = "subscribe";
const SHOW_PREFIX: &str = "nav";
const CONTACT_PREFIX: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Page away from the card at `index`
    Navigate { direction: Direction, index: i64 },
    /// Show the card at `index` as a new message
    Show { index: i64 },
    /// User wants to get in touch with the profile at `index`
    BeginContact { index: i64 },
    /// Opt into broadcasts
    Subscribe,
}

impl CallbackAction {
    pub fn navigate(direction: Direction, index: usize) -> Self {
        Self::Navigate {
            direction,
            index: index_to_i64(index),
        }
    }

    pub fn show(index: usize) -> Self {
        Self::Show {
            index: index_to_i64(index),
        }
    }

    pub fn begin_contact(index: usize) -> Self {
        Self::BeginContact {
            index: index_to_i64(index),
        }
    }
}

fn index_to_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::Navigate { direction, index } => write!(f, "{}_{}", direction.as_prefix(), index),
            CallbackAction::Show { index } => write!(f, "{}_{}", SHOW_PREFIX, index),
            CallbackAction::BeginContact { index } => write!(f, "{}_{}", CONTACT_PREFIX, index),
            CallbackAction::Subscribe => f.write_str(SUBSCRIBE),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = CallbackParseError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let data = data.trim();
        if data.is_empty() {
            return Err(CallbackParseError::Empty);
        }
        if data == SUBSCRIBE {
            return Ok(CallbackAction::Subscribe);
        }

        let (action, raw_index) = data
            .split_once('_')
            .ok_or_else(|| CallbackParseError::UnknownAction(data.to_string()))?;

        let parse_index = || {
            raw_index
                .parse::<i64>()
                .map_err(|_| CallbackParseError::BadIndex(raw_index.to_string()))
        };

        match action {
            "next" => Ok(CallbackAction::Navigate {
                direction: Direction::Forward,
                index: parse_index()?,
            }),
            "prev" => Ok(CallbackAction::Navigate {
                direction: Direction::Backward,
                index: parse_index()?,
            }),
            SHOW_PREFIX => Ok(CallbackAction::Show { index: parse_index()? }),
            CONTACT_PREFIX => Ok(CallbackAction::BeginContact { index: parse_index()? }),
            _ => Err(CallbackParseError::UnknownAction(action.to_string())),
        }
    }
}
