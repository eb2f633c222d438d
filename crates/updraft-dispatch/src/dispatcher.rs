//! The dispatch engine.
//!
//! [`Dispatcher::deliver`] routes one inbound update through two phases:
//!
//! 1. **Catch-all phase** — every [`TriggerKind::Any`] handler runs,
//!    whatever the update carries.
//! 2. **Kind-specific phase** — at most one of:
//!    - *Callback*: the update carries a callback query; every callback
//!      binding whose rule matches the query data runs.
//!    - *Command*: the update carries a message the platform recognised as
//!      a command; every command binding whose rule matches the text runs.
//!
//! Within a phase, bindings are evaluated in registration order with no
//! deduplication and no first-match short-circuit: several bindings may
//! fire for one update. A delivery that matches nothing is a normal no-op.
//!
//! Each invocation is isolated: a failing handler never stops its siblings
//! nor the other phase. All failures from one delivery surface together in
//! a single [`UpdateProcessError`].
//!
//! The dispatcher is stateless across calls and holds the registry frozen;
//! whether separate updates are delivered sequentially or concurrently is
//! the caller's choice.

use tracing::{Level, debug, span, trace};

use updraft_core::{
    BoxedHandler, HandlerFailure, MatchRule, TriggerKind, Update, UpdateProcessError,
};

use crate::registry::Registry;

/// Routes inbound updates to the handlers registered in a frozen [`Registry`].
pub struct Dispatcher<C, U> {
    registry: Registry<C, U>,
}

impl<C, U> Dispatcher<C, U>
where
    C: Send + Sync,
    U: Update,
{
    /// Freezes `registry` and builds a dispatcher over it.
    ///
    /// Taking the registry by value ends the registration phase: no binding
    /// can be added once delivery may begin.
    pub fn new(registry: Registry<C, U>) -> Self {
        Self { registry }
    }

    /// Read-only view of the frozen registry.
    pub fn registry(&self) -> &Registry<C, U> {
        &self.registry
    }

    /// Delivers one update to every matching handler.
    ///
    /// Handlers run sequentially in registration order; a slow handler
    /// blocks the delivery (no timeout is modelled at this level). Returns
    /// `Ok(())` when every invoked handler succeeded — including when no
    /// handler matched at all.
    pub async fn deliver(&self, ctx: &C, update: &U) -> Result<(), UpdateProcessError> {
        let span = span!(Level::DEBUG, "deliver");
        let _enter = span.enter();

        let mut failures: Vec<HandlerFailure> = Vec::new();

        // Catch-all phase always runs.
        for (index, handler) in self.registry.any_handlers().iter().enumerate() {
            trace!(index, "invoking catch-all handler");
            if let Err(source) = handler.handle(ctx, update).await {
                failures.push(HandlerFailure {
                    kind: TriggerKind::Any,
                    index,
                    source,
                });
            }
        }

        // At most one kind-specific phase runs. A callback query wins over
        // a message; a non-command message triggers no phase at all.
        if let Some(query) = update.callback_query() {
            self.run_selected(
                TriggerKind::Callback,
                query.data,
                self.registry.callback_handlers(),
                ctx,
                update,
                &mut failures,
            )
            .await;
        } else if let Some(message) = update.message() {
            if message.is_command {
                self.run_selected(
                    TriggerKind::Command,
                    message.text,
                    self.registry.command_handlers(),
                    ctx,
                    update,
                    &mut failures,
                )
                .await;
            }
        }

        match UpdateProcessError::from_failures(failures) {
            None => Ok(()),
            Some(err) => {
                debug!(failures = err.failures().len(), "delivery completed with failures");
                Err(err)
            }
        }
    }

    /// Runs one kind-specific phase: every binding whose rule matches
    /// `subject`, in registration order.
    async fn run_selected(
        &self,
        kind: TriggerKind,
        subject: &str,
        bindings: &[(MatchRule, BoxedHandler<C, U>)],
        ctx: &C,
        update: &U,
        failures: &mut Vec<HandlerFailure>,
    ) {
        for (index, (rule, handler)) in bindings.iter().enumerate() {
            if !rule.matches(subject) {
                trace!(%kind, index, "rule did not match, skipping");
                continue;
            }
            debug!(%kind, index, pattern = rule.pattern(), "rule matched, invoking handler");
            if let Err(source) = handler.handle(ctx, update).await {
                failures.push(HandlerFailure {
                    kind,
                    index,
                    source,
                });
            }
        }
    }
}

impl<C, U> std::fmt::Debug for Dispatcher<C, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, HandlerSource, on_any, on_callback, on_command};
    use futures::FutureExt;
    use std::sync::Mutex;
    use updraft_core::{
        BoxError, CallbackQuery, MatchRule, Message, Selector, UpdateHandler, handler_fn,
    };

    #[derive(Default)]
    struct TestUpdate {
        callback_data: Option<String>,
        text: Option<String>,
        is_command: bool,
    }

    impl TestUpdate {
        fn command(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                is_command: true,
                ..Self::default()
            }
        }

        fn chatter(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                ..Self::default()
            }
        }

        fn callback(data: &str) -> Self {
            Self {
                callback_data: Some(data.to_string()),
                ..Self::default()
            }
        }
    }

    impl Update for TestUpdate {
        fn callback_query(&self) -> Option<CallbackQuery<'_>> {
            self.callback_data
                .as_deref()
                .map(|data| CallbackQuery { data })
        }

        fn message(&self) -> Option<Message<'_>> {
            self.text.as_deref().map(|text| Message {
                text,
                is_command: self.is_command,
            })
        }
    }

    /// Bot context for the tests: records which handlers ran, in order.
    type Journal = Mutex<Vec<&'static str>>;

    fn recorder(tag: &'static str) -> impl UpdateHandler<Journal, TestUpdate> {
        handler_fn(move |journal: &Journal, _u: &TestUpdate| {
            async move {
                journal.lock().unwrap().push(tag);
                Ok::<(), BoxError>(())
            }
            .boxed()
        })
    }

    fn failing(tag: &'static str) -> impl UpdateHandler<Journal, TestUpdate> {
        handler_fn(move |journal: &Journal, _u: &TestUpdate| {
            async move {
                journal.lock().unwrap().push(tag);
                Err::<(), BoxError>(format!("{tag} exploded").into())
            }
            .boxed()
        })
    }

    fn dispatcher(
        bindings: Vec<Binding<Journal, TestUpdate>>,
    ) -> Dispatcher<Journal, TestUpdate> {
        let mut registry = Registry::new();
        for binding in bindings {
            registry.bind(binding);
        }
        Dispatcher::new(registry)
    }

    #[tokio::test]
    async fn catch_all_handlers_run_for_every_update_in_order() {
        let dispatcher = dispatcher(vec![on_any(recorder("a1")), on_any(recorder("a2"))]);
        let journal = Journal::default();

        dispatcher
            .deliver(&journal, &TestUpdate::chatter("hello"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["a1", "a2"]);

        journal.lock().unwrap().clear();
        dispatcher
            .deliver(&journal, &TestUpdate::callback("page:2"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn several_command_bindings_may_fire_for_one_update() {
        let dispatcher = dispatcher(vec![
            on_command(MatchRule::equals("/start"), recorder("exact")),
            on_command(MatchRule::starts_with("/st"), recorder("prefix")),
        ]);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::command("/start"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["exact", "prefix"]);
    }

    #[tokio::test]
    async fn non_matching_bindings_are_skipped() {
        let dispatcher = dispatcher(vec![
            on_command(MatchRule::equals("/start"), recorder("exact")),
            on_command(MatchRule::starts_with("/st"), recorder("prefix")),
        ]);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::command("/stop"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["prefix"]);
    }

    #[tokio::test]
    async fn a_failing_handler_never_stops_its_siblings() {
        let dispatcher = dispatcher(vec![
            on_command(MatchRule::equals("/go"), recorder("c1")),
            on_command(MatchRule::equals("/go"), failing("c2")),
            on_command(MatchRule::equals("/go"), recorder("c3")),
        ]);

        let journal = Journal::default();
        let err = dispatcher
            .deliver(&journal, &TestUpdate::command("/go"))
            .await
            .unwrap_err();

        assert_eq!(*journal.lock().unwrap(), vec!["c1", "c2", "c3"]);
        assert_eq!(err.failures().len(), 1);
        assert_eq!(err.primary().kind, TriggerKind::Command);
        assert_eq!(err.primary().index, 1);
        assert_eq!(err.primary().source.to_string(), "c2 exploded");
    }

    #[tokio::test]
    async fn catch_all_failure_does_not_abort_the_command_phase() {
        let dispatcher = dispatcher(vec![
            on_any(failing("any")),
            on_command(MatchRule::equals("/go"), failing("cmd")),
        ]);

        let journal = Journal::default();
        let err = dispatcher
            .deliver(&journal, &TestUpdate::command("/go"))
            .await
            .unwrap_err();

        assert_eq!(*journal.lock().unwrap(), vec!["any", "cmd"]);
        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.primary().kind, TriggerKind::Any);
        assert_eq!(err.suppressed()[0].kind, TriggerKind::Command);
    }

    #[tokio::test]
    async fn callback_and_command_phases_are_mutually_exclusive() {
        let dispatcher = dispatcher(vec![
            on_callback(MatchRule::contains("page"), recorder("cb")),
            on_command(MatchRule::contains("page"), recorder("cmd")),
        ]);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::callback("page:2"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["cb"]);
    }

    #[tokio::test]
    async fn a_plain_message_triggers_no_command_phase() {
        let dispatcher = dispatcher(vec![on_command(
            MatchRule::contains("/start"),
            recorder("cmd"),
        )]);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::chatter("say /start please"))
            .await
            .unwrap();
        assert!(journal.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_with_no_bindings_is_a_successful_no_op() {
        let dispatcher = dispatcher(Vec::new());
        let journal = Journal::default();

        dispatcher
            .deliver(&journal, &TestUpdate::command("/start"))
            .await
            .unwrap();
        assert!(journal.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn case_insensitive_rules_match_shouty_commands() {
        let dispatcher = dispatcher(vec![on_command(
            MatchRule::new("/start", Selector::EqualsIgnoreCase),
            recorder("cmd"),
        )]);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::command("/START"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["cmd"]);
    }

    #[tokio::test]
    async fn one_source_may_register_a_handler_under_several_kinds() {
        struct Everywhere;

        impl HandlerSource<Journal, TestUpdate> for Everywhere {
            fn bindings(&self) -> Vec<Binding<Journal, TestUpdate>> {
                vec![
                    on_any(recorder("seen")),
                    on_command(MatchRule::equals("/seen"), recorder("seen-cmd")),
                    on_callback(MatchRule::equals("seen"), recorder("seen-cb")),
                ]
            }
        }

        let mut registry = Registry::new();
        registry.register_source(&Everywhere);
        let dispatcher = Dispatcher::new(registry);

        let journal = Journal::default();
        dispatcher
            .deliver(&journal, &TestUpdate::command("/seen"))
            .await
            .unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["seen", "seen-cmd"]);
    }
}
