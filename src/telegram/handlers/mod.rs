//! Telegram bot handler tree configuration
//!
//! The dispatcher schema lives here together with the transport-independent
//! handlers it calls. Integration tests drive the handlers directly through a
//! recording [`Messenger`](crate::telegram::messenger::Messenger).

mod callbacks;
mod commands;
mod schema;
mod types;

pub use callbacks::{
    handle_callback, CARD_APOLOGY, CONTACT_APOLOGY, CONTACT_SENT, CONTACT_SENT_TOAST, PROFILE_NOT_FOUND,
    UNKNOWN_ACTION,
};
pub use commands::{
    handle_command, handle_start_command, handle_subscribe_command, handle_unknown_message, send_profile,
    ALREADY_SUBSCRIBED, NO_PROFILES, SUBSCRIBED, UNKNOWN_INPUT, WELCOME,
};
pub use schema::schema;
pub use types::{CallbackAnswer, CallbackOrigin, HandlerDeps, HandlerError, UserInfo};
