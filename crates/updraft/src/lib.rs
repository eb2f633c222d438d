//! # Updraft
//!
//! Declarative routing of conversational-bot updates with failure isolation.
//!
//! ## Overview
//!
//! Updraft sits between a bot-platform transport and your handler code. The
//! transport produces inbound updates; Updraft classifies each one and runs
//! every registered handler whose declared rule matches, in registration
//! order, isolating handler failures from one another:
//!
//! ```text
//! ┌───────────┐     ┌────────────┐     ┌───────────────────────────────┐
//! │ Transport │────▶│ Dispatcher │────▶│ catch-all handlers (always)   │
//! │ (polling) │     │            │────▶│ callback OR command handlers  │
//! └───────────┘     └────────────┘     │   (rule-selected, in order)   │
//!                                      └───────────────────────────────┘
//! ```
//!
//! - **Registration phase**: [`HandlerSource`]s declare [`Binding`]s; the
//!   [`Registry`] collects them, partitioned by trigger kind.
//! - **Delivery phase**: the [`Dispatcher`] freezes the registry and routes
//!   each update; every failure from one delivery is aggregated into a
//!   single [`UpdateProcessError`], never dropped.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use updraft::prelude::*;
//! use futures::FutureExt;
//!
//! struct Greetings;
//!
//! impl HandlerSource<BotCtx, PlatformUpdate> for Greetings {
//!     fn bindings(&self) -> Vec<Binding<BotCtx, PlatformUpdate>> {
//!         vec![on_command(
//!             MatchRule::equals("/start"),
//!             handler_fn(|ctx: &BotCtx, _u: &PlatformUpdate| {
//!                 async move { ctx.send("welcome!").await }.boxed()
//!             }),
//!         )]
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register_source(&Greetings);
//! let dispatcher = Dispatcher::new(registry);
//! ```
//!
//! ## Features
//!
//! - `serde`: serializable routing vocabulary (`TriggerKind`, `Selector`,
//!   `MatchRule`)

pub use updraft_core as core;
pub use updraft_dispatch as dispatch;

pub use updraft_core::{
    BoxError, BoxedHandler, CallbackQuery, HandlerFailure, HandlerFn, HandlerResult, MatchRule,
    Message, RegisterError, Selector, TriggerKind, Update, UpdateHandler, UpdateProcessError,
    handler_fn,
};
pub use updraft_dispatch::{
    Binding, Candidate, Dispatcher, HandlerSource, Registry, on_any, on_callback, on_command,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use updraft::prelude::*;
/// ```
pub mod prelude {
    pub use updraft_core::{
        BoxError, HandlerResult, MatchRule, Selector, TriggerKind, Update, UpdateHandler,
        handler_fn,
    };
    pub use updraft_dispatch::{
        Binding, Candidate, Dispatcher, HandlerSource, Registry, on_any, on_callback, on_command,
    };
}
