//! The inbound-update boundary.
//!
//! This module defines the [`Update`] trait, the dispatcher's read-only view
//! of one inbound platform event. The transport layer that long-polls (or
//! receives pushes from) the messaging platform owns the concrete update
//! type; this core only asks it two questions:
//!
//! - does the update carry a callback-query payload?
//! - does it carry a message payload, and is that message a command?
//!
//! A single update may qualify for the catch-all phase *and* at most one of
//! the callback / command phases — the categories are not mutually exclusive
//! for routing purposes.
//!
//! # Example
//!
//! ```rust,ignore
//! use updraft_core::{CallbackQuery, Message, Update};
//!
//! struct PlatformUpdate {
//!     callback_data: Option<String>,
//!     text: Option<String>,
//! }
//!
//! impl Update for PlatformUpdate {
//!     fn callback_query(&self) -> Option<CallbackQuery<'_>> {
//!         self.callback_data
//!             .as_deref()
//!             .map(|data| CallbackQuery { data })
//!     }
//!
//!     fn message(&self) -> Option<Message<'_>> {
//!         self.text.as_deref().map(|text| Message {
//!             text,
//!             is_command: text.starts_with('/'),
//!         })
//!     }
//! }
//! ```

/// Borrowed view of a callback-query payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackQuery<'a> {
    /// The opaque data string attached to the pressed inline button.
    pub data: &'a str,
}

/// Borrowed view of a message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// The full message text.
    pub text: &'a str,
    /// Whether the platform recognised this message as a command.
    ///
    /// The recognition rule (leading slash, bot mention, entity metadata, …)
    /// belongs to the transport; the dispatcher only consumes the verdict.
    pub is_command: bool,
}

/// One inbound event from the external messaging platform.
///
/// Both accessors return borrowed views so that classification never copies
/// payload text. Returning `None` from both is valid — such an update still
/// flows through the catch-all phase.
pub trait Update: Send + Sync {
    /// The callback-query payload, if this update carries one.
    fn callback_query(&self) -> Option<CallbackQuery<'_>>;

    /// The message payload, if this update carries one.
    fn message(&self) -> Option<Message<'_>>;
}

impl<U: Update + ?Sized> Update for &U {
    fn callback_query(&self) -> Option<CallbackQuery<'_>> {
        (**self).callback_query()
    }

    fn message(&self) -> Option<Message<'_>> {
        (**self).message()
    }
}
