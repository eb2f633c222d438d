//! The handler registry.
//!
//! The registry owns three ordered collections of bindings, partitioned by
//! trigger kind. Collections are append-only: registration appends, dispatch
//! only reads, and nothing is ever removed — bindings live for the process
//! lifetime.
//!
//! The caller must finish registration before dispatch begins. The
//! [`Dispatcher`](crate::Dispatcher) enforces this at the type level by
//! taking the registry by value; callers that need hot-reload must rebuild a
//! registry and swap dispatchers behind their own lock.

use std::fmt;

use tracing::{debug, warn};

use updraft_core::{BoxedHandler, MatchRule, RegisterError};

use crate::binding::{Binding, Candidate, HandlerSource};

/// Ordered collections of registered bindings, partitioned by trigger kind.
pub struct Registry<C, U> {
    any: Vec<BoxedHandler<C, U>>,
    callback: Vec<(MatchRule, BoxedHandler<C, U>)>,
    command: Vec<(MatchRule, BoxedHandler<C, U>)>,
}

impl<C, U> Default for Registry<C, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, U> Registry<C, U> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            any: Vec::new(),
            callback: Vec::new(),
            command: Vec::new(),
        }
    }

    /// Appends one binding to its kind's collection.
    pub fn bind(&mut self, binding: Binding<C, U>) {
        debug!(kind = %binding.kind(), rule = ?binding.rule(), "binding added");
        match binding {
            Binding::Any(handler) => self.any.push(handler),
            Binding::Callback(rule, handler) => self.callback.push((rule, handler)),
            Binding::Command(rule, handler) => self.command.push((rule, handler)),
        }
    }

    /// Registers every binding declared by `source`, in declaration order.
    ///
    /// Infallible: the [`HandlerSource`] trait *is* the handler-source
    /// capability, so "not a handler source" cannot reach this call.
    pub fn register_source(&mut self, source: &dyn HandlerSource<C, U>) {
        for binding in source.bindings() {
            self.bind(binding);
        }
    }

    /// Registers one discovery candidate.
    ///
    /// Candidates without the handler-source capability are rejected with
    /// [`RegisterError::NotAHandlerSource`], leaving the collections
    /// untouched; broken candidates are rejected with
    /// [`RegisterError::Source`].
    pub fn register_candidate(&mut self, candidate: Candidate<C, U>) -> Result<(), RegisterError> {
        match candidate {
            Candidate::Source { name, source } => {
                self.register_source(source.as_ref());
                debug!(source = %name, "handler source registered");
                Ok(())
            }
            Candidate::Unmarked { name } => Err(RegisterError::NotAHandlerSource { candidate: name }),
            Candidate::Broken { name, cause } => Err(RegisterError::Source { name, source: cause }),
        }
    }

    /// Registers every candidate yielded by a discovery scan, best-effort.
    ///
    /// Iteration never stops at a failure: valid sources before and after a
    /// failing candidate are registered regardless. Once the iterator is
    /// exhausted, all observed failures are folded into a single
    /// [`RegisterError`] — first failure primary, the rest suppressed.
    pub fn register_all(
        &mut self,
        candidates: impl IntoIterator<Item = Candidate<C, U>>,
    ) -> Result<(), RegisterError> {
        let mut causes = Vec::new();
        for candidate in candidates {
            let name = candidate.name().to_string();
            if let Err(cause) = self.register_candidate(candidate) {
                warn!(candidate = %name, error = %cause, "candidate registration failed");
                causes.push(cause);
            }
        }
        match RegisterError::from_causes(causes) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Catch-all handlers, in registration order.
    pub fn any_handlers(&self) -> &[BoxedHandler<C, U>] {
        &self.any
    }

    /// Callback bindings, in registration order.
    pub fn callback_handlers(&self) -> &[(MatchRule, BoxedHandler<C, U>)] {
        &self.callback
    }

    /// Command bindings, in registration order.
    pub fn command_handlers(&self) -> &[(MatchRule, BoxedHandler<C, U>)] {
        &self.command
    }

    /// Total number of registered bindings across all kinds.
    pub fn binding_count(&self) -> usize {
        self.any.len() + self.callback.len() + self.command.len()
    }

    /// Returns `true` when no binding is registered at all.
    pub fn is_empty(&self) -> bool {
        self.binding_count() == 0
    }
}

impl<C, U> fmt::Debug for Registry<C, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("any", &self.any.len())
            .field("callback", &self.callback.len())
            .field("command", &self.command.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{on_any, on_callback, on_command};
    use futures::FutureExt;
    use updraft_core::{BoxError, MatchRule, handler_fn};

    fn noop() -> impl updraft_core::UpdateHandler<(), ()> {
        handler_fn(|_: &(), _: &()| async move { Ok::<(), BoxError>(()) }.boxed())
    }

    struct PingSource;

    impl HandlerSource<(), ()> for PingSource {
        fn bindings(&self) -> Vec<Binding<(), ()>> {
            vec![
                on_command(MatchRule::equals("/ping"), noop()),
                on_callback(MatchRule::starts_with("ping:"), noop()),
                on_any(noop()),
            ]
        }
    }

    #[test]
    fn bind_partitions_by_kind() {
        let mut registry: Registry<(), ()> = Registry::new();
        registry.bind(on_any(noop()));
        registry.bind(on_command(MatchRule::equals("/a"), noop()));
        registry.bind(on_command(MatchRule::equals("/b"), noop()));

        assert_eq!(registry.any_handlers().len(), 1);
        assert_eq!(registry.callback_handlers().len(), 0);
        assert_eq!(registry.command_handlers().len(), 2);
        assert_eq!(registry.binding_count(), 3);
        assert_eq!(registry.command_handlers()[0].0.pattern(), "/a");
        assert_eq!(registry.command_handlers()[1].0.pattern(), "/b");
    }

    #[test]
    fn register_source_keeps_declaration_order() {
        let mut registry: Registry<(), ()> = Registry::new();
        registry.register_source(&PingSource);

        assert_eq!(registry.binding_count(), 3);
        assert_eq!(registry.command_handlers()[0].0.pattern(), "/ping");
        assert_eq!(registry.callback_handlers()[0].0.pattern(), "ping:");
    }

    #[test]
    fn unmarked_candidate_is_rejected_without_side_effects() {
        let mut registry: Registry<(), ()> = Registry::new();
        let err = registry
            .register_candidate(Candidate::unmarked("metrics_exporter"))
            .unwrap_err();

        assert!(matches!(
            err,
            RegisterError::NotAHandlerSource { candidate } if candidate == "metrics_exporter"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_all_is_best_effort_and_loses_no_failure() {
        let mut registry: Registry<(), ()> = Registry::new();
        let result = registry.register_all([
            Candidate::source("ping", PingSource),
            Candidate::unmarked("metrics_exporter"),
            Candidate::broken("admin", "constructor panicked"),
            Candidate::source("ping_again", PingSource),
        ]);

        // Both valid sources made it in despite the failures between them.
        assert_eq!(registry.binding_count(), 6);

        let err = result.unwrap_err();
        assert_eq!(err.cause_count(), 2);
        assert!(matches!(
            err.primary(),
            RegisterError::NotAHandlerSource { candidate } if candidate == "metrics_exporter"
        ));
        assert!(matches!(
            &err.suppressed()[0],
            RegisterError::Source { name, .. } if name == "admin"
        ));
    }

    #[test]
    fn register_all_with_only_valid_candidates_succeeds() {
        let mut registry: Registry<(), ()> = Registry::new();
        registry
            .register_all([Candidate::source("ping", PingSource)])
            .unwrap();
        assert_eq!(registry.binding_count(), 3);
    }
}
