//! The handler trait and closure adapter.
//!
//! An [`UpdateHandler`] is one registered routing target: it receives the
//! opaque bot context and the update, does its work, and reports success or
//! failure. Handlers never learn *why* they were selected — the registry and
//! dispatcher own that decision.
//!
//! Handlers are invoked sequentially, in registration order, within one
//! delivery. There is no timeout or cancellation primitive at this level; a
//! handler that never resolves blocks the whole delivery.
//!
//! # Example
//!
//! ```rust,ignore
//! use updraft_core::{HandlerResult, UpdateHandler, handler_fn};
//! use futures::FutureExt;
//!
//! struct Greeter;
//!
//! #[async_trait::async_trait]
//! impl UpdateHandler<BotCtx, PlatformUpdate> for Greeter {
//!     async fn handle(&self, ctx: &BotCtx, update: &PlatformUpdate) -> HandlerResult {
//!         ctx.send("hello").await?;
//!         Ok(())
//!     }
//! }
//!
//! // Or, as a closure:
//! let greeter = handler_fn(|ctx: &BotCtx, _u: &PlatformUpdate| {
//!     async move { ctx.send("hello").await }.boxed()
//! });
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

/// Type-erased error carried out of a failed handler invocation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by every handler invocation.
pub type HandlerResult = Result<(), BoxError>;

/// One registered routing target.
///
/// `C` is the bot-context type, passed through unchanged and never inspected
/// by the dispatcher. `U` is the concrete update type of the transport.
#[async_trait]
pub trait UpdateHandler<C, U>: Send + Sync {
    /// Processes one update.
    ///
    /// A returned error is collected by the dispatcher and aggregated with
    /// failures from sibling handlers; it never stops them from running.
    async fn handle(&self, ctx: &C, update: &U) -> HandlerResult;
}

/// A shared, type-erased handler as stored in the registry.
///
/// The registry holds handlers behind `Arc`, so the object providing the
/// handler stays alive for as long as any binding references it.
pub type BoxedHandler<C, U> = Arc<dyn UpdateHandler<C, U>>;

/// Adapter implementing [`UpdateHandler`] for boxed-future closures.
///
/// Built with [`handler_fn`].
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps a closure of shape `|ctx, update| async { … }.boxed()` into an
/// [`UpdateHandler`].
///
/// The closure must return a [`BoxFuture`]; `futures::FutureExt::boxed` does
/// the boxing at the call site.
pub fn handler_fn<C, U, F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a C, &'a U) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    HandlerFn { f }
}

#[async_trait]
impl<C, U, F> UpdateHandler<C, U> for HandlerFn<F>
where
    C: Send + Sync,
    U: Send + Sync,
    F: for<'a> Fn(&'a C, &'a U) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    async fn handle(&self, ctx: &C, update: &U) -> HandlerResult {
        (self.f)(ctx, update).await
    }
}
