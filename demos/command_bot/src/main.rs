//! Command Bot Demo
//!
//! Wires a synthetic transport through the Updraft dispatcher: a handful of
//! handler sources are registered, then a scripted feed of updates is
//! delivered one at a time, exactly the way a long-polling loop would.
//!
//! Run it to watch routing decisions at debug level:
//!
//! ```bash
//! RUST_LOG=updraft=debug,command_bot=debug cargo run --package command-bot
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use futures::FutureExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use updraft::prelude::*;
use updraft::{CallbackQuery, Message};

// ============================================================================
// Boundary collaborators: the transport's update type and the bot context
// ============================================================================

/// One inbound update as a real transport would produce it.
#[derive(Debug, Default)]
struct DemoUpdate {
    callback_data: Option<String>,
    text: Option<String>,
}

impl DemoUpdate {
    fn incoming(text: &str) -> Self {
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

impl Update for DemoUpdate {
    fn callback_query(&self) -> Option<CallbackQuery<'_>> {
        self.callback_data
            .as_deref()
            .map(|data| CallbackQuery { data })
    }

    fn message(&self) -> Option<Message<'_>> {
        // This demo platform's command rule: a leading slash.
        self.text.as_deref().map(|text| Message {
            text,
            is_command: text.starts_with('/'),
        })
    }
}

/// The opaque capability object handed to every handler.
struct BotApi {
    sent: AtomicUsize,
}

impl BotApi {
    fn new() -> Self {
        Self {
            sent: AtomicUsize::new(0),
        }
    }

    async fn send(&self, text: &str) -> HandlerResult {
        self.sent.fetch_add(1, Ordering::SeqCst);
        info!("reply: {text}");
        Ok(())
    }
}

// ============================================================================
// Handler sources
// ============================================================================

/// `/start` and `/help`, the usual onboarding commands.
struct Greetings;

impl HandlerSource<BotApi, DemoUpdate> for Greetings {
    fn bindings(&self) -> Vec<Binding<BotApi, DemoUpdate>> {
        vec![
            on_command(
                MatchRule::equals("/start"),
                handler_fn(|bot: &BotApi, _u: &DemoUpdate| {
                    async move { bot.send("Welcome aboard!").await }.boxed()
                }),
            ),
            on_command(
                MatchRule::equals_ignore_case("/help"),
                handler_fn(|bot: &BotApi, _u: &DemoUpdate| {
                    async move { bot.send("Commands: /start, /help, /page").await }.boxed()
                }),
            ),
        ]
    }
}

/// Inline-keyboard paging: buttons carry `page:<n>` callback data.
struct Pager;

impl HandlerSource<BotApi, DemoUpdate> for Pager {
    fn bindings(&self) -> Vec<Binding<BotApi, DemoUpdate>> {
        vec![on_callback(
            MatchRule::starts_with("page:"),
            handler_fn(|bot: &BotApi, u: &DemoUpdate| {
                async move {
                    let data = u.callback_query().map(|q| q.data.to_string());
                    let page = data
                        .as_deref()
                        .and_then(|d| d.strip_prefix("page:"))
                        .unwrap_or("?");
                    bot.send(&format!("Turning to page {page}")).await
                }
                .boxed()
            }),
        )]
    }
}

/// Sees every update, whatever it carries.
struct AuditLog;

impl HandlerSource<BotApi, DemoUpdate> for AuditLog {
    fn bindings(&self) -> Vec<Binding<BotApi, DemoUpdate>> {
        vec![on_any(handler_fn(|_: &BotApi, u: &DemoUpdate| {
            async move {
                info!(?u, "update received");
                Ok::<(), BoxError>(())
            }
            .boxed()
        }))]
    }
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,updraft=debug")),
        )
        .init();

    // Registration phase: everything a discovery scan would have yielded.
    let mut registry = Registry::new();
    registry.register_all([
        Candidate::source("greetings", Greetings),
        Candidate::source("pager", Pager),
        Candidate::source("audit_log", AuditLog),
    ])?;
    info!(bindings = registry.binding_count(), "registration complete");

    let dispatcher = Dispatcher::new(registry);
    let bot = BotApi::new();

    // Scripted stand-in for the transport's polling loop.
    let feed = vec![
        DemoUpdate::incoming("/start"),
        DemoUpdate::incoming("/HELP"),
        DemoUpdate::incoming("just chatting, not a command"),
        DemoUpdate::callback("page:2"),
        DemoUpdate::incoming("/unknown"),
    ];

    for update in feed {
        if let Err(err) = dispatcher.deliver(&bot, &update).await {
            warn!(%err, primary = %err.primary(), "delivery finished with failures");
        }
    }

    info!(
        replies = bot.sent.load(Ordering::SeqCst),
        "feed drained, shutting down"
    );
    Ok(())
}
