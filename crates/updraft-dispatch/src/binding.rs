//! Binding descriptors and the handler-source capability.
//!
//! A [`Binding`] is one registered routing target: a handler paired with the
//! trigger kind it fires under and, for callback and command triggers, the
//! [`MatchRule`] that selects it. The rule's presence is carried by the enum
//! shape — a catch-all binding *cannot* carry one, a callback or command
//! binding *must*.
//!
//! [`HandlerSource`] replaces runtime scanning of annotated methods with an
//! explicit registration-time contract: a source hands the registry its list
//! of binding descriptors, and anything with an incompatible shape simply
//! does not compile. One logical handler may appear in several bindings,
//! registering it under several trigger kinds at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::FutureExt;
//! use updraft_core::{MatchRule, handler_fn};
//! use updraft_dispatch::{Binding, HandlerSource, on_any, on_command};
//!
//! struct Greetings;
//!
//! impl HandlerSource<BotCtx, PlatformUpdate> for Greetings {
//!     fn bindings(&self) -> Vec<Binding<BotCtx, PlatformUpdate>> {
//!         vec![
//!             on_command(
//!                 MatchRule::equals("/start"),
//!                 handler_fn(|ctx: &BotCtx, _u: &PlatformUpdate| {
//!                     async move { ctx.send("welcome!").await }.boxed()
//!                 }),
//!             ),
//!             on_any(handler_fn(|_: &BotCtx, u: &PlatformUpdate| {
//!                 async move {
//!                     tracing::debug!(?u, "saw update");
//!                     Ok(())
//!                 }
//!                 .boxed()
//!             })),
//!         ]
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use updraft_core::{BoxError, BoxedHandler, MatchRule, TriggerKind, UpdateHandler};

// ============================================================================
// Binding
// ============================================================================

/// One registered (handler, trigger kind, optional match rule) tuple.
pub enum Binding<C, U> {
    /// Fires for every update.
    Any(BoxedHandler<C, U>),
    /// Fires for callback-query updates whose data matches the rule.
    Callback(MatchRule, BoxedHandler<C, U>),
    /// Fires for command updates whose text matches the rule.
    Command(MatchRule, BoxedHandler<C, U>),
}

impl<C, U> Binding<C, U> {
    /// The trigger kind this binding participates in.
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Any(_) => TriggerKind::Any,
            Self::Callback(..) => TriggerKind::Callback,
            Self::Command(..) => TriggerKind::Command,
        }
    }

    /// The match rule, absent for catch-all bindings.
    pub fn rule(&self) -> Option<&MatchRule> {
        match self {
            Self::Any(_) => None,
            Self::Callback(rule, _) | Self::Command(rule, _) => Some(rule),
        }
    }
}

impl<C, U> fmt::Debug for Binding<C, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind())
            .field("rule", &self.rule())
            .finish_non_exhaustive()
    }
}

/// Builds a catch-all binding.
pub fn on_any<C, U>(handler: impl UpdateHandler<C, U> + 'static) -> Binding<C, U> {
    Binding::Any(Arc::new(handler))
}

/// Builds a callback-query binding selected by `rule`.
pub fn on_callback<C, U>(
    rule: MatchRule,
    handler: impl UpdateHandler<C, U> + 'static,
) -> Binding<C, U> {
    Binding::Callback(rule, Arc::new(handler))
}

/// Builds a command binding selected by `rule`.
pub fn on_command<C, U>(
    rule: MatchRule,
    handler: impl UpdateHandler<C, U> + 'static,
) -> Binding<C, U> {
    Binding::Command(rule, Arc::new(handler))
}

// ============================================================================
// HandlerSource
// ============================================================================

/// The capability that marks an object as a provider of handler bindings.
///
/// The registry holds only the returned bindings; the handlers inside them
/// are `Arc`-shared, so a source is free to be dropped after registration.
pub trait HandlerSource<C, U>: Send + Sync {
    /// Binding descriptors declared by this source, in declaration order.
    ///
    /// Declaration order becomes registration order, which in turn is the
    /// invocation order within each dispatch phase.
    fn bindings(&self) -> Vec<Binding<C, U>>;
}

// ============================================================================
// Candidate
// ============================================================================

/// One object yielded by an external handler-discovery scan.
///
/// Discovery itself (scanning a component registry, instantiating types, …)
/// is the caller's business; the registry only consumes the outcome per
/// candidate.
pub enum Candidate<C, U> {
    /// Carries the handler-source capability and was constructed successfully.
    Source {
        /// Diagnostic name used in logs and registration errors.
        name: String,
        /// The source to register.
        source: Box<dyn HandlerSource<C, U>>,
    },
    /// Does not carry the handler-source capability.
    Unmarked {
        /// Diagnostic name of the rejected object.
        name: String,
    },
    /// Carries the capability but could not be constructed.
    Broken {
        /// Diagnostic name of the failing object.
        name: String,
        /// Why construction failed.
        cause: BoxError,
    },
}

impl<C, U> Candidate<C, U> {
    /// A successfully constructed handler source.
    pub fn source(name: impl Into<String>, source: impl HandlerSource<C, U> + 'static) -> Self {
        Self::Source {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// An object that turned out not to be a handler source.
    pub fn unmarked(name: impl Into<String>) -> Self {
        Self::Unmarked { name: name.into() }
    }

    /// A handler source whose construction failed.
    pub fn broken(name: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Broken {
            name: name.into(),
            cause: cause.into(),
        }
    }

    /// Diagnostic name of the candidate.
    pub fn name(&self) -> &str {
        match self {
            Self::Source { name, .. } | Self::Unmarked { name } | Self::Broken { name, .. } => name,
        }
    }
}

impl<C, U> fmt::Debug for Candidate<C, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source { name, .. } => f.debug_struct("Source").field("name", name).finish(),
            Self::Unmarked { name } => f.debug_struct("Unmarked").field("name", name).finish(),
            Self::Broken { name, cause } => f
                .debug_struct("Broken")
                .field("name", name)
                .field("cause", cause)
                .finish(),
        }
    }
}
