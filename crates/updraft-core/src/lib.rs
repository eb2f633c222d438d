//! # Updraft Core
//!
//! Foundation types for the Updraft update dispatcher.
//!
//! This crate defines the vocabulary shared by the registry and the dispatch
//! engine, without any routing logic of its own:
//!
//! - **Update boundary** ([`Update`], [`CallbackQuery`], [`Message`]) — the
//!   read-only view of one inbound platform event
//! - **Handler contract** ([`UpdateHandler`], [`handler_fn`]) — the async
//!   routing target invoked with `(bot context, update)`
//! - **Routing rules** ([`TriggerKind`], [`Selector`], [`MatchRule`]) — the
//!   declarative matching vocabulary
//! - **Aggregate errors** ([`RegisterError`], [`UpdateProcessError`]) — the
//!   never-lose-a-failure error model shared by both phases of the system's
//!   life: registration and delivery
//!
//! The routing engine itself lives in `updraft-dispatch`; transports and
//! concrete handlers live with the application.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`TriggerKind`],
//!   [`Selector`], and [`MatchRule`]

pub mod error;
pub mod handler;
pub mod rule;
pub mod update;

pub use error::{HandlerFailure, RegisterError, UpdateProcessError};
pub use handler::{BoxError, BoxedHandler, HandlerFn, HandlerResult, UpdateHandler, handler_fn};
pub use rule::{MatchRule, Selector, TriggerKind};
pub use update::{CallbackQuery, Message, Update};
