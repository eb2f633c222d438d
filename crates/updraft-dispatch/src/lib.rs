//! # Updraft Dispatch
//!
//! The handler registry and routing engine of the Updraft dispatcher.
//!
//! This crate turns declared [`Binding`]s into routed deliveries:
//!
//! - [`Binding`] / [`HandlerSource`] / [`Candidate`] — registration-time
//!   descriptors replacing any runtime scanning of handler objects
//! - [`Registry`] — three append-only collections partitioned by trigger
//!   kind, filled during the registration phase
//! - [`Dispatcher`] — classifies one inbound update, runs the catch-all
//!   phase plus at most one kind-specific phase, and aggregates every
//!   handler failure into a single error
//!
//! ## Example
//!
//! ```rust,ignore
//! use updraft_core::{MatchRule, handler_fn};
//! use updraft_dispatch::{Dispatcher, Registry, on_command};
//! use futures::FutureExt;
//!
//! let mut registry = Registry::new();
//! registry.bind(on_command(
//!     MatchRule::equals("/start"),
//!     handler_fn(|ctx: &BotCtx, _u: &PlatformUpdate| {
//!         async move { ctx.send("welcome!").await }.boxed()
//!     }),
//! ));
//!
//! // Taking the registry by value freezes it: registration is over.
//! let dispatcher = Dispatcher::new(registry);
//!
//! while let Some(update) = transport.next_update().await {
//!     if let Err(err) = dispatcher.deliver(&ctx, &update).await {
//!         tracing::warn!(%err, "some handlers failed");
//!     }
//! }
//! ```

pub mod binding;
pub mod dispatcher;
pub mod registry;

pub use binding::{Binding, Candidate, HandlerSource, on_any, on_callback, on_command};
pub use dispatcher::Dispatcher;
pub use registry::Registry;
